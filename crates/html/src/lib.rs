//! HTML parsing and a small mutable DOM for patching server-rendered pages.

pub mod head;
pub mod serialize;
pub mod style;

mod dom;
mod dom_builder;
mod entities;
mod selector;
mod tokenizer;
mod types;

use memchr::{memchr, memchr2};

pub use crate::dom::Document;
pub use crate::dom_builder::build_document;
pub use crate::selector::{Selector, SelectorError};
pub use crate::tokenizer::tokenize;
pub use crate::types::{ElementData, Id, NodeId, NodeKind, Token};

/// Parses a full page or a fragment into a detached document.
pub fn parse_document(input: &str) -> Document {
    build_document(tokenize(input))
}

pub fn is_html(ct: Option<&str>) -> bool {
    let Some(value) = ct else {
        return false;
    };
    contains_ignore_ascii_case(value, b"text/html")
        || contains_ignore_ascii_case(value, b"application/xhtml")
}

fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    let hay = haystack.as_bytes();
    let n = needle.len();
    if n == 0 {
        return true;
    }
    if hay.len() < n {
        return false;
    }
    let first = needle[0];
    let (a, b) = (first.to_ascii_lowercase(), first.to_ascii_uppercase());
    let mut i = 0;
    while i + n <= hay.len() {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        };
        let Some(rel) = rel else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay.len() && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}

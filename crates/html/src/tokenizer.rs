//! Small HTML tokenizer for server-rendered pages and fragments.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased on the way out.
//! `<script>` and `<style>` bodies are emitted as a single raw text token.
//!
//! Known limitations:
//! - No HTML5 parse-error recovery; malformed markup degrades to text or is skipped.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack
        .get(start..start + needle.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(needle))
}

/// Returns `(start, end)` of the first `</tag\s*>` in `haystack`, `end` exclusive.
fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= len {
        i += memchr(b'<', &bytes[i..])?;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    out: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            out: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    // Slice endpoints always sit on ASCII structural bytes, so they are char boundaries.
    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn text(&mut self) {
        let start = self.pos;
        self.pos = memchr(b'<', &self.bytes[start..]).map_or(self.bytes.len(), |rel| start + rel);
        let decoded = decode_entities(&self.input[start..self.pos]);
        if !decoded.is_empty() {
            self.out.push(Token::Text(decoded));
        }
    }

    /// Returns false when the rest of the input was consumed.
    fn comment(&mut self) -> bool {
        let body_start = self.pos + COMMENT_START.len();
        match self.input[body_start..].find(COMMENT_END) {
            Some(rel) => {
                let body = &self.input[body_start..body_start + rel];
                self.out.push(Token::Comment(body.to_string()));
                self.pos = body_start + rel + COMMENT_END.len();
                true
            }
            None => {
                self.out
                    .push(Token::Comment(self.input[body_start..].to_string()));
                self.pos = self.bytes.len();
                false
            }
        }
    }

    fn doctype(&mut self) -> bool {
        let rest = &self.input[self.pos + 2..];
        let Some(end) = rest.find('>') else {
            self.pos = self.bytes.len();
            return false;
        };
        self.out.push(Token::Doctype(rest[..end].trim().to_string()));
        self.pos += 2 + end + 1;
        true
    }

    fn end_tag(&mut self) {
        self.pos += 2;
        let name = self.take_name().to_ascii_lowercase();
        self.pos = memchr(b'>', &self.bytes[self.pos..])
            .map_or(self.bytes.len(), |rel| self.pos + rel + 1);
        if !name.is_empty() {
            self.out.push(Token::EndTag(name));
        }
    }

    fn attribute_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                self.pos = memchr(quote, &self.bytes[start..])
                    .map_or(self.bytes.len(), |rel| start + rel);
                let raw = &self.input[start..self.pos];
                if !self.at_end() {
                    self.pos += 1;
                }
                decode_entities(raw)
            }
            _ => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    if b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>') {
                        break;
                    }
                    self.pos += 1;
                }
                decode_entities(&self.input[start..self.pos])
            }
        }
    }

    fn start_tag(&mut self) -> bool {
        self.pos += 1;
        let name = self.take_name().to_ascii_lowercase();
        if name.is_empty() {
            // A stray '<' is literal text.
            self.out.push(Token::Text("<".to_string()));
            return true;
        }

        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let attr_name = self.take_name();
                    if attr_name.is_empty() {
                        self.pos += 1;
                        continue;
                    }
                    let attr_name = attr_name.to_ascii_lowercase();
                    self.skip_whitespace();
                    let value = if self.peek() == Some(b'=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        Some(self.attribute_value())
                    } else {
                        None
                    };
                    attributes.push((attr_name, value));
                }
            }
        }

        let self_closing = self_closing || is_void_element(&name);
        let rawtext = !self_closing && (name == "script" || name == "style");
        self.out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        if rawtext {
            return self.rawtext(name);
        }
        true
    }

    fn rawtext(&mut self, name: String) -> bool {
        let close_tag = if name == "script" {
            SCRIPT_CLOSE_TAG
        } else {
            STYLE_CLOSE_TAG
        };
        let body_start = self.pos;
        let (body_end, resume, more) =
            match find_rawtext_close_tag(&self.input[body_start..], close_tag) {
                Some((rel_start, rel_end)) => {
                    (body_start + rel_start, body_start + rel_end, true)
                }
                // Missing close tag: the remainder is rawtext and the element closes implicitly.
                None => (self.bytes.len(), self.bytes.len(), false),
            };
        let body = &self.input[body_start..body_end];
        if !body.is_empty() {
            self.out.push(Token::Text(body.to_string()));
        }
        self.out.push(Token::EndTag(name));
        self.pos = resume;
        more
    }

    fn run(mut self) -> Vec<Token> {
        while !self.at_end() {
            if self.bytes[self.pos] != b'<' {
                self.text();
                continue;
            }
            let more = if self.input[self.pos..].starts_with(COMMENT_START) {
                self.comment()
            } else if starts_with_ignore_ascii_case_at(self.bytes, self.pos, b"<!doctype") {
                self.doctype()
            } else if self.bytes.get(self.pos + 1) == Some(&b'/') {
                self.end_tag();
                true
            } else {
                self.start_tag()
            };
            if !more {
                break;
            }
        }
        self.out
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Scanner::new(input).run()
}

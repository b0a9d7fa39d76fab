use crate::dom::Document;
use crate::types::{Id, Token};

/// Builds a document from a token stream.
///
/// Unmatched end tags are dropped. An end tag that matches an element further down the
/// open-element stack closes everything above it. Elements still open at end of input are
/// closed implicitly.
pub fn build_document(tokens: Vec<Token>) -> Document {
    let mut doc = Document::new();
    let mut open_elements: Vec<(Id, String)> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().map_or(doc.root(), |(id, _)| *id);
        match token {
            Token::Doctype(s) => doc.set_doctype(s),
            Token::Comment(c) => {
                let node = doc.create_comment(&c);
                doc.append_child(parent, node);
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    let node = doc.create_text(&text);
                    doc.append_child(parent, node);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let node = doc.create_element(&name, attributes);
                doc.append_child(parent, node);
                if !self_closing {
                    open_elements.push((node, name));
                }
            }
            Token::EndTag(name) => {
                if let Some(pos) = open_elements.iter().rposition(|(_, n)| *n == name) {
                    open_elements.truncate(pos);
                } else {
                    log::trace!("dropping unmatched end tag </{name}>");
                }
            }
        }
    }

    doc
}

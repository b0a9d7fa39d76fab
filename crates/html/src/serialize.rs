use crate::dom::Document;
use crate::tokenizer::is_void_element;
use crate::types::{Id, NodeKind};

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn write_node(doc: &Document, id: Id, out: &mut String) {
    match doc.kind(id) {
        Some(NodeKind::Element(e)) => {
            out.push('<');
            out.push_str(&e.name);
            for (k, v) in &e.attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_attr(v, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(&e.name) {
                return;
            }
            let raw = e.name == "script" || e.name == "style";
            for &c in doc.children(id) {
                match doc.kind(c) {
                    Some(NodeKind::Text(t)) if raw => out.push_str(t),
                    _ => write_node(doc, c, out),
                }
            }
            out.push_str("</");
            out.push_str(&e.name);
            out.push('>');
        }
        Some(NodeKind::Text(t)) => escape_text(t, out),
        Some(NodeKind::Comment(t)) => {
            out.push_str("<!--");
            out.push_str(t);
            out.push_str("-->");
        }
        Some(NodeKind::Document { .. }) => {
            for &c in doc.children(id) {
                write_node(doc, c, out);
            }
        }
        None => {}
    }
}

pub fn inner_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    for &c in doc.children(id) {
        write_node(doc, c, &mut out);
    }
    out
}

/// Indented one-line-per-element summary, at most `cap` lines. Text is clipped to 40 chars.
pub fn outline(doc: &Document, scope: Id, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, id: Id, depth: usize, out: &mut Vec<String>, cap: usize) {
        if out.len() >= cap {
            return;
        }
        let indent = "  ".repeat(depth);
        match doc.kind(id) {
            Some(NodeKind::Element(e)) => {
                let mut line = format!("{indent}<{}", e.name);
                if let Some(id_attr) = e.attr("id").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" id="{id_attr}""#));
                }
                if let Some(class) = e.attr("class").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                if e.has_attr("open") {
                    line.push_str(" open");
                }
                line.push('>');
                out.push(line);
                for &c in doc.children(id) {
                    walk(doc, c, depth + 1, out, cap);
                }
            }
            Some(NodeKind::Text(t)) => {
                let t = t.replace('\n', " ");
                let t = t.trim();
                if !t.is_empty() {
                    let show: String = if t.chars().count() > 40 {
                        format!("{}…", t.chars().take(40).collect::<String>())
                    } else {
                        t.to_string()
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            Some(NodeKind::Document { .. }) => {
                for &c in doc.children(id) {
                    walk(doc, c, depth, out, cap);
                }
            }
            Some(NodeKind::Comment(_)) | None => {}
        }
    }
    let mut out = Vec::new();
    walk(doc, scope, 0, &mut out, cap);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Selector, parse_document};

    #[test]
    fn inner_html_reparses_to_same_markup() {
        let src = r#"<nav class="breadcrumb"><a href="/md/docs" data-spa>Docs</a> &amp; <span>Intro</span><br></nav>"#;
        let doc = parse_document(src);
        let nav = doc.query(doc.root(), &Selector::class("breadcrumb")).unwrap();
        let html = inner_html(&doc, nav);
        assert_eq!(html, r#"<a href="/md/docs" data-spa>Docs</a> &amp; <span>Intro</span><br>"#);
        let again = parse_document(&html);
        assert_eq!(inner_html(&again, again.root()), html);
    }

    #[test]
    fn outline_respects_cap_and_clips_text() {
        let long = "x".repeat(60);
        let doc = parse_document(&format!("<div class=\"a\"><p>{long}</p><p>y</p></div>"));
        let lines = outline(&doc, doc.root(), 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"<div class="a">"#);
        assert!(lines[2].ends_with("…\""));
    }
}

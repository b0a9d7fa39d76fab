use crate::Document;
use crate::selector::Selector;

/// Text of the first `<title>` anywhere in the document, trimmed. A present but empty
/// `<title>` yields an empty string; `None` means there is no `<title>` at all.
///
/// Fragments returned for programmatic requests are not guaranteed to have a `<head>`, so
/// this does not restrict the search to it.
pub fn document_title(doc: &Document) -> Option<String> {
    let title = doc.query(doc.root(), &Selector::tag("title"))?;
    Some(doc.text_content(title).trim().to_string())
}

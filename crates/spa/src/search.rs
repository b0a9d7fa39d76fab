use html::{Document, Id};

use crate::config::IconConfig;
use crate::names;

/// Filters sidebar entries by a case-insensitive substring of their display name.
///
/// Folders holding at least one visible file are shown and forced open; every other folder
/// is hidden. An empty query clears every override.
pub fn apply_search(doc: &mut Document, query: &str, icons: &IconConfig) {
    let query = query.trim().to_lowercase();
    let root = doc.root();
    let items = doc.query_all(root, &names::file_item());
    let folders = doc.query_all(root, &names::folder());

    if query.is_empty() {
        for &id in items.iter().chain(&folders) {
            doc.set_style(id, "display", "");
        }
        for &item in &items {
            doc.remove_class(item, names::SEARCH_HIGHLIGHT);
        }
        return;
    }

    let mut shown = 0usize;
    for &item in &items {
        if display_name(doc, item).to_lowercase().contains(&query) {
            doc.set_style(item, "display", "");
            doc.add_class(item, names::SEARCH_HIGHLIGHT);
            shown += 1;
        } else {
            doc.set_style(item, "display", "none");
            doc.remove_class(item, names::SEARCH_HIGHLIGHT);
        }
    }

    for folder in folders {
        let has_visible = doc
            .query_all(folder, &names::file_item())
            .into_iter()
            .any(|item| !doc.is_hidden(item));
        if has_visible {
            doc.set_style(folder, "display", "");
            doc.set_open(folder, true);
            if let Some(icon) = doc.query(folder, &names::folder_icon()) {
                doc.set_text_content(icon, &icons.folder_open);
            }
        } else {
            doc.set_style(folder, "display", "none");
        }
    }
    log::debug!("search {query:?}: {shown}/{} entries", items.len());
}

fn display_name(doc: &Document, item: Id) -> String {
    doc.query(item, &names::file_name())
        .map(|name| doc.text_content(name))
        .unwrap_or_default()
}

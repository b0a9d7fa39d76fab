//! Applying a fetched page to the live document.
//!
//! Within a project only the content pane, the breadcrumb and the sidebar's active entry
//! change; the sidebar itself survives. Across projects the whole main content region is
//! replaced.

use html::{Document, Id, Selector};

use crate::config::IconConfig;
use crate::names;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    Partial,
    Full,
    /// Either document lacks a main content region; nothing was touched.
    Skipped,
}

pub fn apply(
    live: &mut Document,
    fetched: &Document,
    same_project: bool,
    icons: &IconConfig,
) -> PatchOutcome {
    let container = live.query(live.root(), &names::main_content());
    let incoming = fetched.query(fetched.root(), &names::main_content());
    let (Some(container), Some(incoming)) = (container, incoming) else {
        log::warn!("patch: no main content region, page left as is");
        return PatchOutcome::Skipped;
    };

    if !same_project {
        live.replace_children_from(container, fetched, incoming);
        return PatchOutcome::Full;
    }

    replace_inner(live, container, fetched, incoming, &names::md_content());
    replace_inner(live, container, fetched, incoming, &names::breadcrumb());

    if let Some(sidebar) = live.query(container, &names::sidebar()) {
        clear_active(live, sidebar, icons);
        if let Some(item) = incoming_active_item(live, sidebar, fetched, incoming) {
            mark_active(live, item, icons);
        }
    }
    PatchOutcome::Partial
}

fn replace_inner(
    live: &mut Document,
    container: Id,
    fetched: &Document,
    incoming: Id,
    selector: &Selector,
) {
    let target = live.query(container, selector);
    let source = fetched.query(incoming, selector);
    if let (Some(target), Some(source)) = (target, source) {
        live.replace_children_from(target, fetched, source);
    }
}

/// The live sidebar entry whose link points where the fetched page's active entry points.
fn incoming_active_item(
    live: &Document,
    sidebar: Id,
    fetched: &Document,
    incoming: Id,
) -> Option<Id> {
    let fetched_sidebar = fetched.query(incoming, &names::sidebar())?;
    let active = fetched.query(fetched_sidebar, &names::file_item().and_class(names::ACTIVE))?;
    let link = fetched.query(active, &names::file_link())?;
    let href = fetched.attr(link, "href")?;
    let current = live.query(sidebar, &Selector::default().and_attr("href", Some(href)))?;
    live.closest(current, &names::file_item())
}

/// Removes the active marker from every file entry under `scope`, putting back the idle
/// glyph where the active one was showing.
pub fn clear_active(doc: &mut Document, scope: Id, icons: &IconConfig) {
    for item in doc.query_all(scope, &names::file_item()) {
        doc.remove_class(item, names::ACTIVE);
        if let Some(icon) = doc.query(item, &names::file_icon()) {
            if doc.text_content(icon) == icons.file_active {
                doc.set_text_content(icon, &icons.file_idle);
            }
        }
    }
}

pub fn mark_active(doc: &mut Document, item: Id, icons: &IconConfig) {
    doc.add_class(item, names::ACTIVE);
    if let Some(icon) = doc.query(item, &names::file_icon()) {
        doc.set_text_content(icon, &icons.file_active);
    }
}

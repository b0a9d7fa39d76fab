use html::{Document, Id};

use crate::names;

/// Open folders (by document-order index among the sidebar's `details.folder` elements) and
/// the sidebar scroll offset, as captured from one project's sidebar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarSnapshot {
    pub open_folder_indexes: Vec<usize>,
    pub scroll_offset: f32,
}

/// Holds the most recent snapshot only.
#[derive(Debug, Default)]
pub struct SidebarStore {
    snapshot: Option<SidebarSnapshot>,
}

fn find_sidebar(doc: &Document) -> Option<Id> {
    doc.query(doc.root(), &names::sidebar())
}

impl SidebarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&SidebarSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// No sidebar, no snapshot change.
    pub fn save(&mut self, doc: &Document) {
        let Some(sidebar) = find_sidebar(doc) else {
            return;
        };
        let open_folder_indexes = doc
            .query_all(sidebar, &names::sidebar_folder())
            .into_iter()
            .enumerate()
            .filter(|(_, folder)| doc.is_open(*folder))
            .map(|(index, _)| index)
            .collect();
        self.snapshot = Some(SidebarSnapshot {
            open_folder_indexes,
            scroll_offset: doc.scroll_top(sidebar),
        });
    }

    /// Re-opens the recorded folders and restores the scroll offset. Folders not recorded are
    /// left as they are.
    pub fn restore(&self, doc: &mut Document, open_glyph: &str) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let Some(sidebar) = find_sidebar(doc) else {
            return;
        };
        let folders = doc.query_all(sidebar, &names::sidebar_folder());
        for &index in &snapshot.open_folder_indexes {
            let Some(&folder) = folders.get(index) else {
                continue;
            };
            doc.set_open(folder, true);
            if let Some(icon) = doc.query(folder, &names::folder_icon()) {
                doc.set_text_content(icon, open_glyph);
            }
        }
        doc.set_scroll_top(sidebar, snapshot.scroll_offset);
    }
}

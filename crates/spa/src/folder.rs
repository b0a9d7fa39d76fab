//! Folder open/close sequencing.
//!
//! The `open` attribute stays the store of record for open vs closed. The only extra state is
//! which folders are mid-close: between the click that starts a close and the timer that
//! finishes it, the folder is still open in the DOM but already animating away.

use std::collections::HashSet;

use html::{Document, Id};

use crate::config::{IconConfig, NavConfig};
use crate::events::EventOutcome;
use crate::names;
use crate::timers::{Scheduler, Timer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderPhase {
    Open,
    Closing,
    Closed,
}

#[derive(Debug, Default)]
pub struct FolderController {
    closing: HashSet<Id>,
}

fn set_icon(doc: &mut Document, folder: Id, glyph: &str) {
    if let Some(icon) = doc.query(folder, &names::folder_icon()) {
        doc.set_text_content(icon, glyph);
    }
}

impl FolderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, doc: &Document, folder: Id) -> FolderPhase {
        if self.closing.contains(&folder) {
            FolderPhase::Closing
        } else if doc.is_open(folder) {
            FolderPhase::Open
        } else {
            FolderPhase::Closed
        }
    }

    /// Syncs every folder icon with its open flag and forgets in-flight closes. Run whenever
    /// the sidebar markup has been replaced.
    pub fn initialize(&mut self, doc: &mut Document, icons: &IconConfig) {
        self.closing.clear();
        for summary in doc.query_all(doc.root(), &names::folder_summary()) {
            let Some(folder) = doc.parent(summary) else {
                continue;
            };
            let glyph = if doc.is_open(folder) {
                &icons.folder_open
            } else {
                &icons.folder_closed
            };
            if let Some(icon) = doc.query(summary, &names::folder_icon()) {
                doc.set_text_content(icon, glyph);
            }
        }
    }

    /// Click on a folder's summary.
    pub fn on_summary_click(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &NavConfig,
        folder: Id,
    ) -> EventOutcome {
        match self.phase(doc, folder) {
            FolderPhase::Closed => {
                // Native toggle; the glyph follows once it has applied.
                doc.set_open(folder, true);
                scheduler.schedule(config.icon_open_delay_ms, Timer::FolderIconOpen { folder });
                EventOutcome::Default
            }
            FolderPhase::Open => {
                self.begin_close(doc, scheduler, config, folder);
                EventOutcome::PreventDefault
            }
            FolderPhase::Closing => EventOutcome::PreventDefault,
        }
    }

    pub fn icon_open(&self, doc: &mut Document, icons: &IconConfig, folder: Id) {
        if doc.is_live(folder) && doc.is_open(folder) {
            set_icon(doc, folder, &icons.folder_open);
        }
    }

    /// `Open -> Closing`: animate the content region and its children, then close once the
    /// animation has had time to play.
    pub fn begin_close(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &NavConfig,
        folder: Id,
    ) {
        if !doc.is_live(folder) || self.phase(doc, folder) != FolderPhase::Open {
            return;
        }
        if let Some(content) = doc.query(folder, &names::folder_content()) {
            let item_animation = config.item_slide_animation();
            for (index, item) in doc.element_children(content).into_iter().enumerate() {
                doc.set_style(item, "animation", &item_animation);
                doc.set_style(item, "animation-delay", &config.item_delay(index));
            }
            doc.set_style(content, "animation", &config.folder_slide_animation());
        }
        self.closing.insert(folder);
        scheduler.schedule(config.close_duration_ms, Timer::FolderCloseFinish { folder });
    }

    /// `Closing -> Closed`: close, show the closed glyph and drop every animation style so
    /// the next open starts clean.
    pub fn finish_close(&mut self, doc: &mut Document, icons: &IconConfig, folder: Id) {
        if !self.closing.remove(&folder) || !doc.is_live(folder) {
            return;
        }
        doc.set_open(folder, false);
        set_icon(doc, folder, &icons.folder_closed);
        if let Some(content) = doc.query(folder, &names::folder_content()) {
            doc.set_style(content, "animation", "");
            for item in doc.element_children(content) {
                doc.set_style(item, "animation", "");
                doc.set_style(item, "animation-delay", "");
            }
        }
    }

    /// Opens every closed folder, folder `i` (position among all folders) after
    /// `i * bulk_stagger_ms`.
    pub fn expand_all(&self, doc: &Document, scheduler: &mut Scheduler, config: &NavConfig) {
        for (index, folder) in doc.query_all(doc.root(), &names::folder()).into_iter().enumerate() {
            if !doc.is_open(folder) {
                scheduler.schedule(
                    config.bulk_stagger_ms * index as u64,
                    Timer::FolderExpand { folder },
                );
            }
        }
    }

    pub fn expand(&self, doc: &mut Document, icons: &IconConfig, folder: Id) {
        if !doc.is_live(folder) {
            return;
        }
        doc.set_open(folder, true);
        set_icon(doc, folder, &icons.folder_open);
    }

    /// Starts closing every open folder, the `k`-th open one after `k * bulk_stagger_ms`.
    pub fn collapse_all(&self, doc: &Document, scheduler: &mut Scheduler, config: &NavConfig) {
        let open_folders = doc
            .query_all(doc.root(), &names::folder())
            .into_iter()
            .filter(|folder| doc.is_open(*folder));
        for (index, folder) in open_folders.enumerate() {
            scheduler.schedule(
                config.bulk_stagger_ms * index as u64,
                Timer::FolderCloseBegin { folder },
            );
        }
    }
}

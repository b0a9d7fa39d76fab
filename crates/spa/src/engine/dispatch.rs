use html::Id;

use super::Navigator;
use crate::events::{DomEvent, EventOutcome, Key};
use crate::host::Host;
use crate::keyboard::{self, Direction};
use crate::names;
use crate::patch;
use crate::search::apply_search;
use crate::timers::Timer;

impl<H: Host> Navigator<H> {
    /// Delegated handling of a page event, as the body-level listeners would see it.
    pub fn dispatch(&mut self, event: DomEvent) -> EventOutcome {
        if !self.enabled {
            return EventOutcome::Default;
        }
        match event {
            DomEvent::Click { target } => self.on_click(target),
            DomEvent::MouseEnter { target } => {
                self.on_mouse_enter(target);
                EventOutcome::Default
            }
            DomEvent::KeyDown { key, focus } => self.on_key_down(&key, focus),
            DomEvent::Input { target, value } => {
                self.on_input(target, &value);
                EventOutcome::Default
            }
            DomEvent::PopState => {
                self.on_pop_state();
                EventOutcome::Default
            }
        }
    }

    fn on_click(&mut self, target: Id) -> EventOutcome {
        if !self.doc.is_live(target) {
            return EventOutcome::Default;
        }

        if let Some(link) = self.doc.closest(target, &names::spa_link()) {
            if self.doc.has_attr(link, "target") {
                return EventOutcome::Default;
            }
            let Some(href) = self.doc.attr(link, "href").map(str::to_string) else {
                return EventOutcome::Default;
            };
            self.navigate(&href);
            return EventOutcome::PreventDefault;
        }

        if let Some(summary) = self.doc.closest(target, &names::folder_summary()) {
            if let Some(folder) = self.doc.parent(summary) {
                return self.folders.on_summary_click(
                    &mut self.doc,
                    &mut self.scheduler,
                    &self.config,
                    folder,
                );
            }
        }

        if self
            .doc
            .closest(target, &names::expand_all_button())
            .is_some()
        {
            self.folders
                .expand_all(&self.doc, &mut self.scheduler, &self.config);
        } else if self
            .doc
            .closest(target, &names::collapse_all_button())
            .is_some()
        {
            self.folders
                .collapse_all(&self.doc, &mut self.scheduler, &self.config);
        }
        EventOutcome::Default
    }

    fn on_mouse_enter(&mut self, target: Id) {
        if !self.doc.is_live(target) {
            return;
        }
        let Some(link) = self.doc.closest(target, &names::spa_link()) else {
            return;
        };
        let Some(href) = self
            .doc
            .attr(link, "href")
            .filter(|h| !h.is_empty())
            .map(str::to_string)
        else {
            return;
        };
        match self.host.location().join(&href) {
            Ok(url) => self.prefetch(url),
            Err(err) => log::debug!("spa: not prefetching {href:?}: {err}"),
        }
    }

    fn on_key_down(&mut self, key: &Key, focus: Option<Id>) -> EventOutcome {
        let root = self.doc.root();
        if self.doc.query(root, &names::sidebar()).is_none()
            || keyboard::is_text_entry(&self.doc, focus)
            || keyboard::active_entry(&self.doc).is_none()
        {
            return EventOutcome::Default;
        }
        let Some(direction) = Direction::from_key(key) else {
            return EventOutcome::Default;
        };
        let Some(step) = keyboard::plan_step(&self.doc, direction) else {
            return EventOutcome::PreventDefault;
        };

        patch::clear_active(&mut self.doc, root, &self.config.icons);
        patch::mark_active(&mut self.doc, step.to, &self.config.icons);
        let _ = self.on_click(step.link);
        self.scheduler
            .schedule(self.config.reveal_delay_ms, Timer::RevealEntry { item: step.to });
        EventOutcome::PreventDefault
    }

    fn on_input(&mut self, target: Id, value: &str) {
        if !self.doc.matches(target, &names::search_input()) {
            return;
        }
        self.doc.set_attr(target, "value", Some(value));
        apply_search(&mut self.doc, value, &self.config.icons);
    }
}

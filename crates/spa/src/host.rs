//! The window the navigator runs in: location, session history, title and scrolling.

use html::Id;
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

pub trait Host {
    fn location(&self) -> &Url;

    /// Pushes a same-origin entry (`path?query#fragment`) without loading it.
    fn push_state(&mut self, relative: &str);

    /// Leaves the SPA: a full browser navigation to `url`.
    fn assign(&mut self, url: &Url);

    fn set_title(&mut self, title: &str);

    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    fn scroll_into_view(&mut self, node: Id);
}

/// Records everything the navigator asks of the window.
#[derive(Debug)]
pub struct HeadlessHost {
    history: Vec<Url>,
    index: usize,
    pushes: Vec<String>,
    assigned: Option<Url>,
    title: String,
    scrolls: Vec<ScrollBehavior>,
    revealed: Vec<Id>,
}

impl HeadlessHost {
    pub fn new(start: Url) -> Self {
        Self {
            history: vec![start],
            index: 0,
            pushes: Vec::new(),
            assigned: None,
            title: String::new(),
            scrolls: Vec::new(),
            revealed: Vec::new(),
        }
    }

    /// Moves back one entry. Returns false at the start of history. The caller then delivers
    /// `DomEvent::PopState`.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.history.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Every `push_state` argument, in order.
    pub fn pushes(&self) -> &[String] {
        &self.pushes
    }

    pub fn assigned(&self) -> Option<&Url> {
        self.assigned.as_ref()
    }

    pub fn take_assigned(&mut self) -> Option<Url> {
        self.assigned.take()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scrolls(&self) -> &[ScrollBehavior] {
        &self.scrolls
    }

    pub fn revealed(&self) -> &[Id] {
        &self.revealed
    }
}

impl Host for HeadlessHost {
    fn location(&self) -> &Url {
        &self.history[self.index]
    }

    fn push_state(&mut self, relative: &str) {
        self.pushes.push(relative.to_string());
        let next = match self.location().join(relative) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("push_state: cannot resolve {relative:?}: {err}");
                return;
            }
        };
        self.history.truncate(self.index + 1);
        self.history.push(next);
        self.index = self.history.len() - 1;
    }

    fn assign(&mut self, url: &Url) {
        self.assigned = Some(url.clone());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scrolls.push(behavior);
    }

    fn scroll_into_view(&mut self, node: Id) {
        self.revealed.push(node);
    }
}

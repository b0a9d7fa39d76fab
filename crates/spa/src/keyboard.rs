use html::{Document, Id};

use crate::events::Key;
use crate::names;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowUp => Some(Direction::Up),
            Key::Other(_) => None,
        }
    }
}

/// Where an arrow key moves the active file entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub to: Id,
    /// The entry's link; activating it navigates.
    pub link: Id,
}

/// Whether key presses with focus on `focus` belong to a text field.
pub fn is_text_entry(doc: &Document, focus: Option<Id>) -> bool {
    focus
        .and_then(|f| doc.tag_name(f))
        .is_some_and(|tag| tag == "input" || tag == "textarea")
}

pub fn active_entry(doc: &Document) -> Option<Id> {
    doc.query(doc.root(), &names::file_item().and_class(names::ACTIVE))
}

/// Next or previous file entry in document order, clamped at both ends. `None` when there is
/// no active entry, the move is clamped away, or the target has no link.
pub fn plan_step(doc: &Document, direction: Direction) -> Option<Step> {
    let items = doc.query_all(doc.root(), &names::file_item());
    let current = items.iter().position(|&i| doc.has_class(i, names::ACTIVE))?;
    let target = match direction {
        Direction::Down => (current + 1).min(items.len() - 1),
        Direction::Up => current.saturating_sub(1),
    };
    if target == current {
        return None;
    }
    let link = doc.query(items[target], &names::file_link())?;
    Some(Step {
        to: items[target],
        link,
    })
}

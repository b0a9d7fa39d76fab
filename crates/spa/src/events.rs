use html::Id;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Other(String),
}

impl Key {
    /// Maps DOM `KeyboardEvent.key` names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Events the embedder forwards from the page. Targets are nodes of the navigator's own
/// document; delegated handling walks up from them.
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent {
    Click { target: Id },
    MouseEnter { target: Id },
    KeyDown { key: Key, focus: Option<Id> },
    Input { target: Id, value: String },
    /// Session history moved; the host location already reflects the new entry.
    PopState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Default,
    PreventDefault,
}

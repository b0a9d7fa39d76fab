pub type NodeId = u32;

/// Handle to a node inside one [`Document`](crate::Document).
///
/// Ids are only meaningful for the document that produced them. Once a node is removed its
/// slot may hold a new node, but the old id carries the previous generation and
/// [`Document::is_live`](crate::Document::is_live) keeps reporting `false` for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id {
    index: NodeId,
    generation: u32,
}

impl Id {
    pub const ROOT: Id = Id::new(0, 0);

    pub const fn new(index: NodeId, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Document { doctype: Option<String> },
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub name: String,
    pub attributes: Vec<(String, Option<String>)>,
    /// Vertical scroll offset in px. Not serialized; lives only on the live tree.
    pub scroll_top: f32,
}

impl ElementData {
    pub fn new(name: &str, attributes: Vec<(String, Option<String>)>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attributes,
            scroll_top: 0.0,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

//! Mutable arena DOM.
//!
//! Invariants:
//! - `Id::ROOT` is always the live document node.
//! - A live node has at most one parent and appears exactly once in that parent's children.
//! - Removing a subtree frees its slots for reuse. Each reuse bumps the slot generation, so
//!   ids handed out before the removal stay dead.
//! - Element and attribute names are ASCII-lowercase.

use crate::selector::Selector;
use crate::style;
use crate::types::{ElementData, Id, NodeId, NodeKind};

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<NodeRecord>,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: Id::ROOT.generation(),
                node: Some(NodeRecord {
                    kind: NodeKind::Document { doctype: None },
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> Id {
        Id::ROOT
    }

    fn record(&self, id: Id) -> Option<&NodeRecord> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())?
            .node
            .as_ref()
    }

    fn record_mut(&mut self, id: Id) -> Option<&mut NodeRecord> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())?
            .node
            .as_mut()
    }

    pub fn is_live(&self, id: Id) -> bool {
        self.record(id).is_some()
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn element(&self, id: Id) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: Id) -> Option<&mut ElementData> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn set_doctype(&mut self, doctype: String) {
        if let Some(NodeKind::Document { doctype: dt }) =
            self.record_mut(Id::ROOT).map(|r| &mut r.kind)
        {
            *dt = Some(doctype);
        }
    }

    // --- Tree structure ---

    fn push(&mut self, kind: NodeKind) -> Id {
        let record = NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(record);
            return Id::new(index, slot.generation);
        }
        let index = self.slots.len() as NodeId;
        self.slots.push(Slot {
            generation: 0,
            node: Some(record),
        });
        Id::new(index, 0)
    }

    /// Frees the slot of a live node and returns its children, which are not freed yet.
    fn release(&mut self, id: Id) -> Vec<Id> {
        let Some(slot) = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation() && slot.node.is_some())
        else {
            return Vec::new();
        };
        let children = slot.node.take().map(|r| r.children).unwrap_or_default();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as NodeId);
        children
    }

    pub fn create_element(&mut self, name: &str, attributes: Vec<(String, Option<String>)>) -> Id {
        self.push(NodeKind::Element(ElementData::new(name, attributes)))
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> Id {
        self.push(NodeKind::Comment(text.to_string()))
    }

    /// Appends a parentless node. Returns false (and does nothing) if either node is dead,
    /// the parent cannot hold children, or the child is already attached.
    pub fn append_child(&mut self, parent: Id, child: Id) -> bool {
        let parent_ok = self
            .record(parent)
            .is_some_and(|r| matches!(r.kind, NodeKind::Document { .. } | NodeKind::Element(_)));
        let child_ok = parent != child
            && child != Id::ROOT
            && self.record(child).is_some_and(|r| r.parent.is_none());
        if !parent_ok || !child_ok || self.is_ancestor(child, parent) {
            return false;
        }
        if let Some(record) = self.record_mut(parent) {
            record.children.push(child);
        }
        if let Some(record) = self.record_mut(child) {
            record.parent = Some(parent);
        }
        true
    }

    fn is_ancestor(&self, maybe_ancestor: Id, of: Id) -> bool {
        let mut cur = self.parent(of);
        while let Some(p) = cur {
            if p == maybe_ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id)?.parent
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: Id) -> Vec<Id> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// Descendants of `scope` in document order, `scope` itself excluded.
    pub fn descendants(&self, scope: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack: Vec<Id> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Removes every descendant of `id` and frees their slots. Their ids stop being live.
    pub fn remove_children(&mut self, id: Id) {
        let Some(record) = self.record_mut(id) else {
            return;
        };
        let mut stack = std::mem::take(&mut record.children);
        while let Some(child) = stack.pop() {
            stack.extend(self.release(child));
        }
    }

    /// Replaces the children of `target` with deep copies of the children of `source_parent`
    /// in `source`. This is `target.innerHTML = source_parent.innerHTML` without the round
    /// trip through markup.
    pub fn replace_children_from(&mut self, target: Id, source: &Document, source_parent: Id) {
        if !self.is_live(target) {
            return;
        }
        self.remove_children(target);
        for &child in source.children(source_parent) {
            self.import_subtree(target, source, child);
        }
    }

    fn import_subtree(&mut self, parent: Id, source: &Document, source_root: Id) {
        let mut stack = vec![(parent, source_root)];
        while let Some((into, from)) = stack.pop() {
            let Some(kind) = source.kind(from) else {
                continue;
            };
            let kind = match kind {
                NodeKind::Element(data) => NodeKind::Element(ElementData {
                    scroll_top: 0.0,
                    ..data.clone()
                }),
                NodeKind::Document { .. } => continue,
                other => other.clone(),
            };
            let copy = self.push(kind);
            self.append_child(into, copy);
            for &grandchild in source.children(from).iter().rev() {
                stack.push((copy, grandchild));
            }
        }
    }

    // --- Queries ---

    pub fn matches(&self, id: Id, selector: &Selector) -> bool {
        self.element(id).is_some_and(|e| selector.matches(e))
    }

    pub fn query(&self, scope: Id, selector: &Selector) -> Option<Id> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    pub fn query_all(&self, scope: Id, selector: &Selector) -> Vec<Id> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    /// Nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: Id, selector: &Selector) -> Option<Id> {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.matches(node, selector) {
                return Some(node);
            }
            cur = self.parent(node);
        }
        None
    }

    pub fn contains(&self, ancestor: Id, id: Id) -> bool {
        ancestor == id || self.is_ancestor(ancestor, id)
    }

    // --- Attributes ---

    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn has_attr(&self, id: Id, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attr(&mut self, id: Id, name: &str, value: Option<&str>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        let value = value.map(str::to_string);
        match element.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => element.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, id: Id, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element
                .attributes
                .retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: Id, class: &str) {
        if self.has_class(id, class) || self.element(id).is_none() {
            return;
        }
        let list = match self.attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", Some(&list));
    }

    pub fn remove_class(&mut self, id: Id, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let list = self
            .attr(id, "class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "class", Some(&list));
    }

    // --- Inline style ---

    pub fn style(&self, id: Id, property: &str) -> Option<String> {
        style::property(self.attr(id, "style")?, property)
    }

    /// Sets one inline style property; an empty value removes it.
    pub fn set_style(&mut self, id: Id, property: &str, value: &str) {
        if self.element(id).is_none() {
            return;
        }
        match style::with_property(self.attr(id, "style"), property, value) {
            Some(s) => self.set_attr(id, "style", Some(&s)),
            None => self.remove_attr(id, "style"),
        }
    }

    pub fn is_hidden(&self, id: Id) -> bool {
        self.style(id, "display").as_deref() == Some("none")
    }

    // --- Element state ---

    /// `<details open>` state.
    pub fn is_open(&self, id: Id) -> bool {
        self.has_attr(id, "open")
    }

    pub fn set_open(&mut self, id: Id, open: bool) {
        if open {
            if !self.is_open(id) {
                self.set_attr(id, "open", None);
            }
        } else {
            self.remove_attr(id, "open");
        }
    }

    pub fn scroll_top(&self, id: Id) -> f32 {
        self.element(id).map_or(0.0, |e| e.scroll_top)
    }

    pub fn set_scroll_top(&mut self, id: Id, offset: f32) {
        if let Some(element) = self.element_mut(id) {
            element.scroll_top = offset.max(0.0);
        }
    }

    // --- Text ---

    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text(t)) = self.kind(id) {
            out.push_str(t);
            return out;
        }
        for d in self.descendants(id) {
            if let Some(NodeKind::Text(t)) = self.kind(d) {
                out.push_str(t);
            }
        }
        out
    }

    pub fn set_text_content(&mut self, id: Id, text: &str) {
        if !self.is_live(id) {
            return;
        }
        if let Some(NodeKind::Text(t)) = self.record_mut(id).map(|r| &mut r.kind) {
            *t = text.to_string();
            return;
        }
        self.remove_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }
}

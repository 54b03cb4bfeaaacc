//! Reference in-memory element tree.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Element 0 is the document root, tagged `#document`, which no
//! selector can name; it is stored beside the arena rather than in it. [`NodeRef`] borrows the document, so a tree cannot be
//! mutated while a search over it is running.

use std::fmt;

use crate::node::Node;

/// Index of an element inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    class: String,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: String::new(),
            text: None,
            parent,
            children: Vec::new(),
        }
    }
}

/// Nested description of an element and its children.
///
/// With the `serde` feature this deserialises from JSON such as
/// `{"tag": "ul", "id": "list", "children": [{"tag": "li", "class": "item"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct ElementSpec {
    /// Tag name.
    pub tag: String,
    /// Id attribute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<String>,
    /// Raw class attribute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: Option<String>,
    /// Text content, used only for display.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,
    /// Child elements in document order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// An element with no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the id attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the class attribute.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// An arena-backed element tree.
///
/// The root is held outside the arena, so it exists for the whole life of
/// the document; arena slot `n` stores the element with id `n + 1`.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Tag name of the document root.
    pub const ROOT_TAG: &'static str = "#document";

    /// An empty document holding only its root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Element::new(Self::ROOT_TAG, None),
            elements: Vec::new(),
        }
    }

    /// A document whose root has `spec` as its only child.
    #[must_use]
    pub fn from_spec(spec: ElementSpec) -> Self {
        let mut document = Self::new();
        document.append_spec(document.root_id(), spec);
        document
    }

    /// Id of the document root.
    #[must_use]
    pub const fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Handle to the document root.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: self.root_id(),
            element: &self.root,
        }
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match id.0.checked_sub(1) {
            None => Some(&self.root),
            Some(slot) => self.elements.get(slot),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match id.0.checked_sub(1) {
            None => Some(&mut self.root),
            Some(slot) => self.elements.get_mut(slot),
        }
    }

    /// Handle to the element `id`, if it belongs to this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.element(id).map(|element| NodeRef {
            document: self,
            id,
            element,
        })
    }

    /// Number of elements, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len() + 1
    }

    /// Whether the document holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an empty `tag` element as the last child of `parent`.
    ///
    /// Returns `None` when `parent` does not belong to this document.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        let id = NodeId(self.len());
        self.element_mut(parent)?.children.push(id);
        self.elements.push(Element::new(tag, Some(parent)));
        Some(id)
    }

    /// Append `spec` and its children below `parent`.
    ///
    /// Returns the id of the element built from `spec`, or `None` when
    /// `parent` does not belong to this document.
    pub fn append_spec(&mut self, parent: NodeId, spec: ElementSpec) -> Option<NodeId> {
        let ElementSpec {
            tag,
            id,
            class,
            text,
            children,
        } = spec;
        let node = self.append_element(parent, &tag)?;
        if let Some(element) = self.element_mut(node) {
            element.id = id;
            element.class = class.unwrap_or_default();
            element.text = text;
        }
        for child in children {
            self.append_spec(node, child);
        }
        Some(node)
    }

    /// Set or clear the id attribute. Returns `false` for a foreign id.
    pub fn set_id(&mut self, node: NodeId, id: Option<&str>) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.id = id.map(str::to_string);
        true
    }

    /// Replace the class attribute. Returns `false` for a foreign id.
    pub fn set_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.class = class.to_string();
        true
    }

    /// Set or clear the text content. Returns `false` for a foreign id.
    pub fn set_text(&mut self, node: NodeId, text: Option<&str>) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        element.text = text.map(str::to_string);
        true
    }

    /// The first element in document order whose id attribute is `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        self.root().find_by_id(id)
    }
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    document: &'d Document,
    id: NodeId,
    element: &'d Element,
}

impl<'d> NodeRef<'d> {
    /// The element's id within its document.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// Text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&'d str> {
        self.element.text.as_deref()
    }

    /// Whether this is the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.element.parent.is_none()
    }

    /// Readable location such as `ul#list > li.item.first`.
    ///
    /// The document root renders as `#document`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.is_root() {
            return Document::ROOT_TAG.to_string();
        }
        let mut segments = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current.filter(|n| !n.is_root()) {
            segments.push(node.segment());
            current = node.parent();
        }
        segments.reverse();
        segments.join(" > ")
    }

    fn segment(&self) -> String {
        let mut out = self.element.tag.clone();
        if let Some(id) = &self.element.id {
            out.push('#');
            out.push_str(id);
        }
        for class in self.element.class.split_ascii_whitespace() {
            out.push('.');
            out.push_str(class);
        }
        out
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.path())
            .finish()
    }
}

impl Node for NodeRef<'_> {
    fn tag_name(&self) -> &str {
        &self.element.tag
    }

    fn id(&self) -> Option<&str> {
        self.element.id.as_deref()
    }

    fn class_list(&self) -> &str {
        &self.element.class
    }

    fn parent(&self) -> Option<Self> {
        self.element.parent.and_then(|id| self.document.node(id))
    }

    fn children(&self) -> Vec<Self> {
        self.element
            .children
            .iter()
            .filter_map(|id| self.document.node(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Document {
        Document::from_spec(
            ElementSpec::new("ul")
                .with_id("list")
                .with_child(ElementSpec::new("li").with_class("item first").with_text("A"))
                .with_child(ElementSpec::new("li").with_class("item").with_text("B")),
        )
    }

    #[test]
    fn builds_tree_from_spec() {
        let document = list();
        assert_eq!(document.len(), 4);
        let root = document.root();
        assert!(root.is_root());
        assert_eq!(root.tag_name(), Document::ROOT_TAG);
        let ul = root.children();
        assert_eq!(ul.len(), 1);
        let items: Vec<_> = ul
            .first()
            .map(Node::children)
            .unwrap_or_default()
            .iter()
            .filter_map(NodeRef::text)
            .collect();
        assert_eq!(items, ["A", "B"]);
    }

    #[test]
    fn renders_paths_from_the_top() {
        let document = list();
        let first = document
            .root()
            .find_by_class_token("first")
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("first item should exist"));
        assert_eq!(first.path(), "ul#list > li.item.first");
        assert_eq!(document.root().path(), "#document");
    }

    #[test]
    fn mutations_update_lookups() {
        let mut document = list();
        let Some(ul) = document.element_by_id("list").map(|n| n.node_id()) else {
            panic!("list should exist");
        };
        assert!(document.set_class(ul, "menu"));
        assert!(document.set_id(ul, Some("nav")));
        assert!(document.element_by_id("list").is_none());
        assert!(
            document
                .element_by_id("nav")
                .is_some_and(|n| n.has_class_token("menu"))
        );
        let Some(li) = document.append_element(ul, "li") else {
            panic!("append should succeed");
        };
        assert!(document.set_text(li, Some("C")));
        assert_eq!(document.node(li).and_then(|n| n.text()), Some("C"));
    }

    #[test]
    fn foreign_ids_are_rejected() {
        let mut document = Document::new();
        assert!(document.is_empty());
        let stray = NodeId(42);
        assert!(document.append_element(stray, "div").is_none());
        assert!(!document.set_class(stray, "x"));
        assert!(document.node(stray).is_none());
    }

    #[test]
    fn root_is_addressable_like_any_element() {
        let mut document = list();
        let root = document.root_id();
        assert!(document.set_class(root, "page"));
        assert_eq!(document.root().class_list(), "page");
        assert_eq!(document.node(root), Some(document.root()));

        let Some(footer) = document.append_element(root, "footer") else {
            panic!("append below the root should succeed");
        };
        assert_eq!(document.len(), 5);
        assert_eq!(
            document.node(footer).and_then(|n| n.parent()),
            Some(document.root())
        );
        assert_eq!(tags_below_root(&document), ["ul", "footer"]);
    }

    fn tags_below_root(document: &Document) -> Vec<String> {
        document
            .root()
            .children()
            .iter()
            .map(|n| n.tag_name().to_string())
            .collect()
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = list();
        let b = list();
        assert_eq!(a.root(), a.root());
        assert_ne!(a.root(), b.root());
    }
}

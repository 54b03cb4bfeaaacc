//! The host-tree collaborator interface.
//!
//! The engine never owns or mutates nodes. It reads the facets below and asks
//! the host for subtree scans. Hosts implement the five required methods; the
//! scan methods have pre-order defaults built on [`Node::children`] that hosts
//! with their own indexes can override.

/// A handle to one element of a host tree.
///
/// Equality must be node identity, not structural equality.
pub trait Node: Clone + PartialEq {
    /// The element's tag name, in any case.
    fn tag_name(&self) -> &str;

    /// The id attribute, if present.
    fn id(&self) -> Option<&str>;

    /// The raw class attribute, whitespace-delimited. Empty when absent.
    fn class_list(&self) -> &str;

    /// The parent element, or `None` at the top of the tree.
    fn parent(&self) -> Option<Self>;

    /// Child elements in document order.
    fn children(&self) -> Vec<Self>;

    /// All descendants in pre-order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Whether the tag name equals `name`, ignoring ASCII case.
    fn has_tag_name(&self, name: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(name)
    }

    /// Whether the class list holds `token` as a whole entry.
    fn has_class_token(&self, token: &str) -> bool {
        self.class_list()
            .split_ascii_whitespace()
            .any(|entry| entry == token)
    }

    /// The first descendant whose id is `id`.
    fn find_by_id(&self, id: &str) -> Option<Self> {
        self.descendants()
            .into_iter()
            .find(|node| node.id() == Some(id))
    }

    /// Descendants whose tag name is `name`, in document order.
    fn find_by_tag_name(&self, name: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|node| node.has_tag_name(name))
            .collect()
    }

    /// Descendants whose class list holds `token`, in document order.
    fn find_by_class_token(&self, token: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|node| node.has_class_token(token))
            .collect()
    }
}

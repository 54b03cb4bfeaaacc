//! Chainable search results.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::node::Node;

/// Nodes matched by one selector, able to search again beneath its first
/// node.
#[derive(Debug, Clone)]
pub struct Selection<'e, N> {
    engine: &'e Engine,
    selector: String,
    nodes: Vec<N>,
}

impl<'e, N: Node> Selection<'e, N> {
    pub(crate) fn new(engine: &'e Engine, selector: &str, nodes: Vec<N>) -> Self {
        Self {
            engine,
            selector: selector.to_string(),
            nodes,
        }
    }

    /// Search beneath the first node of this selection.
    ///
    /// An empty selection has no root to search from and yields another
    /// empty selection.
    ///
    /// # Errors
    /// Returns [`EngineError::Tokenize`] when `selector` cannot be tokenized.
    ///
    /// # Examples
    /// ```
    /// use selq::Engine;
    /// use selq::dom::{Document, ElementSpec};
    ///
    /// let document = Document::from_spec(
    ///     ElementSpec::new("div").with_id("a")
    ///         .with_child(ElementSpec::new("p").with_text("inside")),
    /// );
    /// let engine = Engine::new().expect("standard grammar compiles");
    /// let root = document.root();
    /// let inner = engine
    ///     .select("#a", Some(&root))
    ///     .and_then(|s| s.find("p"))
    ///     .expect("selectors evaluate");
    /// assert_eq!(inner.len(), 1);
    /// ```
    pub fn find(&self, selector: &str) -> Result<Self, EngineError> {
        self.engine.select(selector, self.nodes.first())
    }

    /// The selector that produced this selection.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The first matched node.
    #[must_use]
    pub fn first(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Number of matched nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the matched nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    /// The matched nodes as a slice.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Take the matched nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

impl<N> IntoIterator for Selection<'_, N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'s, N> IntoIterator for &'s Selection<'_, N> {
    type Item = &'s N;
    type IntoIter = std::slice::Iter<'s, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::Engine;
    use crate::dom::{Document, ElementSpec, NodeRef};

    fn page() -> Document {
        Document::from_spec(
            ElementSpec::new("body")
                .with_child(
                    ElementSpec::new("section")
                        .with_class("news")
                        .with_child(ElementSpec::new("h2").with_text("first")),
                )
                .with_child(
                    ElementSpec::new("section")
                        .with_class("news")
                        .with_child(ElementSpec::new("h2").with_text("second")),
                ),
        )
    }

    fn engine() -> Engine {
        Engine::new().unwrap_or_else(|err| panic!("engine should build: {err}"))
    }

    #[test]
    fn find_searches_beneath_the_first_node_only() {
        let document = page();
        let engine = engine();
        let root = document.root();
        let sections = engine
            .select("section.news", Some(&root))
            .unwrap_or_else(|err| panic!("select should succeed: {err}"));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.selector(), "section.news");

        let headings = sections
            .find("h2")
            .unwrap_or_else(|err| panic!("find should succeed: {err}"));
        let texts: Vec<_> = headings.iter().filter_map(NodeRef::text).collect();
        assert_eq!(texts, ["first"]);
    }

    #[test]
    fn empty_selection_finds_nothing() {
        let document = page();
        let engine = engine();
        let root = document.root();
        let none = engine
            .select("#missing", Some(&root))
            .unwrap_or_else(|err| panic!("select should succeed: {err}"));
        assert!(none.is_empty());
        assert!(none.first().is_none());
        let chained = none
            .find("h2")
            .unwrap_or_else(|err| panic!("find should succeed: {err}"));
        assert!(chained.is_empty());
        assert!(chained.into_nodes().is_empty());
    }
}

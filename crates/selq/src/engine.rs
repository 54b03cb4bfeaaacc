//! Engine facade tying the grammar, tokenizer and searcher together.

use std::sync::Arc;

use selq_grammar::{Grammar, TokenSequence, TokenizeMode, Tokenizer};

use crate::error::EngineError;
use crate::node::Node;
use crate::search::Searcher;
use crate::selection::Selection;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// How tokenizing treats text no grammar rule accepts.
    pub mode: TokenizeMode,
}

impl EngineConfig {
    /// Use `mode` for unmatched selector text.
    #[must_use]
    pub const fn with_mode(mut self, mode: TokenizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject selectors with unmatched text instead of skipping it.
    #[must_use]
    pub const fn strict(self) -> Self {
        self.with_mode(TokenizeMode::Strict)
    }
}

/// Compiled grammar plus settings; evaluates selectors against any [`Node`]
/// tree.
///
/// The grammar is compiled once and shared; cloning an engine or building
/// several from one `Arc<Grammar>` does not recompile it.
///
/// # Examples
/// ```
/// use selq::{Engine, Node};
/// use selq::dom::{Document, ElementSpec};
///
/// let document = Document::from_spec(
///     ElementSpec::new("ul").with_id("list")
///         .with_child(ElementSpec::new("li").with_class("item").with_text("A"))
///         .with_child(ElementSpec::new("li").with_class("item").with_text("B")),
/// );
/// let engine = Engine::new().expect("standard grammar compiles");
/// let found = engine.search("ul#list li.item", Some(&document.root())).expect("search runs");
/// let texts: Vec<_> = found.iter().filter_map(|n| n.text()).collect();
/// assert_eq!(texts, ["A", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    grammar: Arc<Grammar>,
    config: EngineConfig,
}

impl Engine {
    /// Compile the standard grammar with default settings.
    ///
    /// # Errors
    /// Returns [`EngineError::Grammar`] if the grammar fails to compile.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Compile the standard grammar with `config`.
    ///
    /// # Errors
    /// Returns [`EngineError::Grammar`] if the grammar fails to compile.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let grammar = Grammar::standard()?;
        log::debug!("selector engine ready ({:?} tokenizing)", config.mode);
        Ok(Self::from_grammar(Arc::new(grammar), config))
    }

    /// Wrap an already compiled grammar.
    #[must_use]
    pub fn from_grammar(grammar: Arc<Grammar>, config: EngineConfig) -> Self {
        Self { grammar, config }
    }

    /// The shared grammar.
    #[must_use]
    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// The active settings.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// Tokenize `selector` without touching any tree.
    ///
    /// # Errors
    /// Returns [`EngineError::Tokenize`] for unsupported tokens, or for
    /// unmatched text in strict mode.
    pub fn tokenize(&self, selector: &str) -> Result<TokenSequence, EngineError> {
        Ok(Tokenizer::new(&self.grammar)
            .with_mode(self.config.mode)
            .tokenize(selector)?)
    }

    /// All nodes below `root` matching `selector`, in key-finder order.
    ///
    /// A blank selector or a `None` root yields an empty result.
    ///
    /// # Errors
    /// Returns [`EngineError::Tokenize`] when the selector cannot be
    /// tokenized; no partial results are produced.
    pub fn search<N: Node>(&self, selector: &str, root: Option<&N>) -> Result<Vec<N>, EngineError> {
        let tokens = self.tokenize(selector)?;
        let found = Searcher::new(&tokens).map_or_else(Vec::new, |searcher| searcher.search(root));
        log::debug!("`{selector}` matched {} nodes", found.len());
        Ok(found)
    }

    /// The first node at or above `node` that matches `selector`.
    ///
    /// The walk stops after testing `root`. Ancestor constraints of each
    /// tested node are checked against its full ancestor chain.
    ///
    /// # Errors
    /// Returns [`EngineError::Tokenize`] when the selector cannot be
    /// tokenized.
    pub fn element_satisfies<N: Node>(
        &self,
        node: &N,
        selector: &str,
        root: &N,
    ) -> Result<Option<N>, EngineError> {
        let tokens = self.tokenize(selector)?;
        let Some(searcher) = Searcher::new(&tokens) else {
            return Ok(None);
        };
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if searcher.matches(&candidate) {
                return Ok(Some(candidate));
            }
            if candidate == *root {
                break;
            }
            current = candidate.parent();
        }
        Ok(None)
    }

    /// Search below `root` and keep the result as a chainable selection.
    ///
    /// # Errors
    /// Returns [`EngineError::Tokenize`] when the selector cannot be
    /// tokenized.
    pub fn select<N: Node>(
        &self,
        selector: &str,
        root: Option<&N>,
    ) -> Result<Selection<'_, N>, EngineError> {
        let nodes = self.search(selector, root)?;
        Ok(Selection::new(self, selector, nodes))
    }
}

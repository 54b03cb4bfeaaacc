//! Selector search over host-owned element trees.
//!
//! `selq` evaluates a small CSS-like selector language (`tag`, `#id`,
//! `.class`, `tag#id`, `tag.class`, and whitespace-separated descendant
//! chains) against any tree that implements [`Node`].
//!
//! # Overview
//!
//! - [`Engine`] owns the compiled grammar and exposes `tokenize`, `search`,
//!   `element_satisfies` and `select`.
//! - [`Criterion`] is the finder/matcher table: one scan and one single-node
//!   test per [`SelectorKind`].
//! - [`Searcher`] scans for the key token and verifies ancestor chains.
//! - [`dom`] holds a small arena-backed reference tree.
//!
//! # Example
//!
//! ```
//! use selq::Engine;
//! use selq::dom::{Document, ElementSpec};
//!
//! let document = Document::from_spec(
//!     ElementSpec::new("div").with_class("card")
//!         .with_child(ElementSpec::new("p").with_child(ElementSpec::new("a"))),
//! );
//! let engine = Engine::new()?;
//! assert_eq!(engine.search("div.card a", Some(&document.root()))?.len(), 1);
//! assert!(engine.search("div.other a", Some(&document.root()))?.is_empty());
//! # Ok::<(), selq::EngineError>(())
//! ```

pub mod dom;
mod engine;
mod error;
mod finder;
mod node;
mod search;
mod selection;

pub use engine::{Engine, EngineConfig};
pub use error::EngineError;
pub use finder::{Criterion, find, matches};
pub use node::Node;
pub use search::Searcher;
pub use selection::Selection;
pub use selq_grammar::{
    Grammar, GrammarBuilder, GrammarError, Rule, SelectorKind, Token, TokenSequence,
    TokenizeError, TokenizeMode,
};

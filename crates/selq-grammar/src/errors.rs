//! Error types shared by the grammar, scanner and tokenizer modules.

use std::fmt;
use thiserror::Error;

use crate::rule::Rule;

/// Additional context for malformed `#{...}` macro references.
///
/// # Examples
/// ```
/// use selq_grammar::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("invalid macro reference", 3, Some("ident".into()));
/// assert_eq!(info.placeholder.as_deref(), Some("ident"));
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Human-readable description of the failure.
    pub message: &'static str,
    /// Byte offset of the reference within its template.
    pub position: usize,
    /// Name of the referenced macro, when one could be read.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Create a new error description for a macro reference failure.
    ///
    /// # Examples
    /// ```
    /// use selq_grammar::PlaceholderErrorInfo;
    /// let info = PlaceholderErrorInfo::new("invalid", 1, None);
    /// assert_eq!(info.message, "invalid");
    /// ```
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.placeholder {
            Some(name) => write!(
                f,
                "{} for macro `{}` at byte {} (zero-based)",
                self.message, name, self.position
            ),
            None => write!(f, "{} at byte {} (zero-based)", self.message, self.position),
        }
    }
}

/// Configuration errors raised while compiling a selector grammar.
///
/// All variants are fatal for the grammar being built; a grammar either
/// compiles completely or not at all.
///
/// # Examples
/// ```
/// use selq_grammar::{GrammarError, PlaceholderErrorInfo};
/// let info = PlaceholderErrorInfo::new("invalid", 2, Some("ident".into()));
/// let err = GrammarError::Placeholder(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A `#{...}` reference is syntactically malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// A template references a macro that was never defined.
    #[error("unknown macro `{name}` referenced by template `{template}`")]
    UnknownMacro {
        /// Name of the missing macro.
        name: String,
        /// Name of the macro or rule whose template holds the reference.
        template: String,
    },
    /// Macro references loop back to a macro that is still being expanded.
    #[error("macro `{0}` refers to itself through its own expansion")]
    MacroCycle(String),
    /// No template was supplied for one of the fixed rules.
    #[error("missing template for rule `{0}`")]
    MissingRule(Rule),
    /// The joined scanner pattern failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> GrammarError {
    GrammarError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}

/// A selector token whose rule has no finder or matcher.
///
/// The grammar recognises pseudo-classes such as `:hover` so they are not
/// silently dropped, but nothing can search for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedSelector {
    /// The matched selector text.
    pub text: String,
    /// The rule that recognised the text.
    pub rule: Rule,
}

impl fmt::Display for UnsupportedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported selector `{}` ({})", self.text, self.rule)
    }
}

impl std::error::Error for UnsupportedSelector {}

/// Selector text that strict tokenizing could not consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSelector {
    /// Byte offset of the unconsumed text in the normalised selector.
    pub position: usize,
    /// The unconsumed text itself.
    pub fragment: String,
}

impl fmt::Display for MalformedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected `{}` in selector at byte {} (zero-based)",
            self.fragment, self.position
        )
    }
}

impl std::error::Error for MalformedSelector {}

/// Errors surfaced by a single tokenize call.
///
/// Neither variant affects the grammar; the same tokenizer can be reused with
/// different input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A token classified to a rule with no selector kind.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSelector),
    /// Strict mode found characters no rule accepts.
    #[error(transparent)]
    Malformed(#[from] MalformedSelector),
}

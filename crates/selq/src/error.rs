//! Errors returned by the selector engine.

use selq_grammar::{GrammarError, TokenizeError};
use thiserror::Error;

/// Errors that can occur while building an engine or evaluating a selector.
///
/// A failed evaluation never returns partial results and leaves the engine
/// usable for the next call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The grammar failed to compile. Fatal for the engine being built.
    #[error("grammar configuration error: {0}")]
    Grammar(#[from] GrammarError),

    /// The selector could not be tokenized.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

impl EngineError {
    /// Whether the selector used a form with no finder, such as `:hover`.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Tokenize(TokenizeError::Unsupported(_)))
    }

    /// Whether strict tokenizing rejected unmatched selector text.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Tokenize(TokenizeError::Malformed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selq_grammar::{MalformedSelector, Rule, UnsupportedSelector};

    #[test]
    fn grammar_error_displays_context() {
        let error = EngineError::from(GrammarError::MacroCycle("ident".into()));
        assert_eq!(
            error.to_string(),
            "grammar configuration error: macro `ident` refers to itself through its own expansion"
        );
    }

    #[test]
    fn classifies_tokenize_failures() {
        let unsupported = EngineError::from(TokenizeError::from(UnsupportedSelector {
            text: ":hover".into(),
            rule: Rule::PseudoClass,
        }));
        assert!(unsupported.is_unsupported());
        assert!(!unsupported.is_malformed());

        let malformed = EngineError::from(TokenizeError::from(MalformedSelector {
            position: 0,
            fragment: ">".into(),
        }));
        assert!(malformed.is_malformed());
        assert_eq!(
            malformed.to_string(),
            "unexpected `>` in selector at byte 0 (zero-based)"
        );
    }
}

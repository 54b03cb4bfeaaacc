//! Classify scanner output into typed selector tokens.

use std::fmt;

use crate::errors::{MalformedSelector, TokenizeError, UnsupportedSelector};
use crate::grammar::Grammar;
use crate::rule::SelectorKind;

/// A classified piece of selector text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    kind: SelectorKind,
}

impl Token {
    /// Create a token from its text and kind.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SelectorKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// The matched selector text, e.g. `li.item`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The kind the text was classified as.
    #[must_use]
    pub const fn kind(&self) -> SelectorKind {
        self.kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity: {}, finder: {}", self.text, self.kind)
    }
}

/// Tokens of one selector in textual order.
///
/// The last token is the key token; the ones before it are ancestor
/// constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no token was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tokens in textual order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// The tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    /// Split into the key token and its ancestor constraints.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn split_key(&self) -> Option<(&Token, &[Token])> {
        self.0.split_last()
    }

    /// The kind of every token in textual order.
    #[must_use]
    pub fn kinds(&self) -> Vec<SelectorKind> {
        self.0.iter().map(Token::kind).collect()
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// How the tokenizer treats text no rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizeMode {
    /// Skip unmatched characters, logging a warning.
    #[default]
    Lenient,
    /// Fail with [`MalformedSelector`] on unmatched characters.
    Strict,
}

/// Trim `selector` and collapse inner whitespace runs to one space.
///
/// # Examples
/// ```
/// use selq_grammar::normalize;
///
/// assert_eq!(normalize("  ul#list \t\n li.item "), "ul#list li.item");
/// ```
#[must_use]
pub fn normalize(selector: &str) -> String {
    selector.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns selector strings into [`TokenSequence`]s using a shared grammar.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'g> {
    grammar: &'g Grammar,
    mode: TokenizeMode,
}

impl<'g> Tokenizer<'g> {
    /// Create a lenient tokenizer over `grammar`.
    #[must_use]
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            mode: TokenizeMode::default(),
        }
    }

    /// Use `mode` for unmatched text.
    #[must_use]
    pub fn with_mode(mut self, mode: TokenizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// The active mode.
    #[must_use]
    pub const fn mode(&self) -> TokenizeMode {
        self.mode
    }

    /// Tokenize `selector` after normalising its whitespace.
    ///
    /// Blank input yields an empty sequence.
    ///
    /// # Errors
    /// Returns [`TokenizeError::Unsupported`] when a token classifies to a
    /// rule with no selector kind, and [`TokenizeError::Malformed`] in strict
    /// mode when characters other than single separating spaces are left
    /// unmatched or when two tokens touch without a space between them.
    ///
    /// # Examples
    /// ```
    /// use selq_grammar::{Grammar, SelectorKind, Tokenizer};
    ///
    /// let grammar = Grammar::standard().expect("standard grammar compiles");
    /// let tokens = Tokenizer::new(&grammar).tokenize("ul#list li.item").expect("tokenizes");
    /// assert_eq!(tokens.kinds(), [SelectorKind::NameAndId, SelectorKind::NameAndClass]);
    /// ```
    pub fn tokenize(&self, selector: &str) -> Result<TokenSequence, TokenizeError> {
        let normalized = normalize(selector);
        let mut tokens = Vec::new();
        let mut cursor = 0usize;

        for hit in self.grammar.scanner().scan(&normalized) {
            let kind = SelectorKind::try_from(hit.rule).map_err(|_| UnsupportedSelector {
                text: hit.text.to_string(),
                rule: hit.rule,
            })?;
            if !tokens.is_empty() && hit.start == cursor {
                // Compound parts such as `li.item.first` have no descendant
                // reading; only a space may separate two tokens.
                self.reject(MalformedSelector {
                    position: hit.start,
                    fragment: hit.text.to_string(),
                })?;
            } else {
                self.check_gap(&normalized, cursor, hit.start)?;
            }
            cursor = hit.end;
            tokens.push(Token::new(hit.text, kind));
        }
        self.check_gap(&normalized, cursor, normalized.len())?;

        log::debug!("tokenized `{normalized}` into {} tokens", tokens.len());
        Ok(TokenSequence(tokens))
    }

    fn check_gap(&self, subject: &str, start: usize, end: usize) -> Result<(), MalformedSelector> {
        let gap = subject.get(start..end).unwrap_or_default();
        if gap.is_empty() || gap == " " {
            return Ok(());
        }
        self.reject(MalformedSelector {
            position: start,
            fragment: gap.to_string(),
        })
    }

    /// Fail in strict mode; log and carry on in lenient mode.
    fn reject(&self, error: MalformedSelector) -> Result<(), MalformedSelector> {
        match self.mode {
            TokenizeMode::Lenient => {
                log::warn!("ignoring {error}");
                Ok(())
            }
            TokenizeMode::Strict => Err(error),
        }
    }
}

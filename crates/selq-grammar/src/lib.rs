//! Selector grammar compilation for selq.
//!
//! The grammar is written as named regular-expression macros that reference
//! each other with `#{name}`. Rule templates built from those macros are
//! expanded, joined into one scanner pattern, and used by the tokenizer to
//! classify selector text into typed tokens.

mod errors;
mod grammar;
mod rule;
mod scanner;
mod template;
mod tokenizer;

pub use errors::{
    GrammarError, MalformedSelector, PlaceholderErrorInfo, TokenizeError, UnsupportedSelector,
};
pub use grammar::{Grammar, GrammarBuilder, STANDARD_MACROS, STANDARD_RULES};
pub use rule::{Rule, SelectorKind, UnsupportedRule};
pub use scanner::{RawMatch, Scan, Scanner};
pub use template::{expand_macros, expand_template};
pub use tokenizer::{Token, TokenSequence, TokenizeMode, Tokenizer, normalize};

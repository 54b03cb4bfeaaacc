//! Template lexing and macro expansion helpers.

mod expander;
mod lexer;
mod placeholder;

pub use expander::{expand_macros, expand_template};

//! Command-line front end for the `selq` selector engine.
//!
//! The binary in `main.rs` is a thin clap layer over these modules:
//!
//! - [`config`]: log level and strictness from `SELQ_*` variables and flags
//! - [`logging`]: tracing subscriber setup on stderr
//! - [`commands`]: subcommand bodies writing to any [`std::io::Write`]
//! - [`error`]: CLI-specific error types

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

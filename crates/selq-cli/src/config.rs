//! CLI configuration parsed from environment variables.
//!
//! Settings can be overridden via environment variables prefixed with
//! `SELQ_`; command-line flags take precedence over both.

use std::env;
use std::str::FromStr;

use selq::{EngineConfig, TokenizeMode};

use crate::error::CliError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so normal output stays clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes expanded grammar fragments.
    Trace,
    /// Tokenizer and search summaries.
    Debug,
    /// Informational messages.
    Info,
    /// Warnings such as skipped selector text.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid {name} value '{value}', expected true or false"
        ))),
    }
}

/// Configuration for one CLI run.
///
/// # Environment Variables
///
/// - `SELQ_LOG_LEVEL`: Sets the log level (trace, debug, info, warn, error)
/// - `SELQ_STRICT`: Reject selectors with text no grammar rule accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Strict tokenizing.
    pub strict: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `SELQ_LOG_LEVEL` and `SELQ_STRICT`, falling back to defaults for
    /// missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable contains an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup("SELQ_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let strict = match lookup("SELQ_STRICT") {
            Some(val) => parse_flag("SELQ_STRICT", &val)?,
            None => false,
        };

        Ok(Self { log_level, strict })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI flags that should take precedence over
    /// environment-based values.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, strict: Option<bool>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(strict) = strict {
            self.strict = strict;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Engine settings derived from this configuration.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        let mode = if self.strict {
            TokenizeMode::Strict
        } else {
            TokenizeMode::Lenient
        };
        EngineConfig::default().with_mode(mode)
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[rstest]
    #[case("1", true)]
    #[case("TRUE", true)]
    #[case(" on ", true)]
    #[case("0", false)]
    #[case("no", false)]
    fn flags_accept_common_spellings(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse_flag("SELQ_STRICT", input).ok(), Some(expected));
    }

    #[test]
    fn flags_reject_other_values() {
        let err = parse_flag("SELQ_STRICT", "maybe").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: invalid SELQ_STRICT value 'maybe', expected true or false"
        );
    }

    #[test]
    fn default_config_is_lenient_and_quiet() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.strict);
        assert_eq!(config.engine_config().mode, TokenizeMode::Lenient);
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Debug), Some(true));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.engine_config().mode, TokenizeMode::Strict);

        let config = CliConfig::default().apply_overrides(None, None);
        assert_eq!(config, CliConfig::default());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn lookup_reads_prefixed_variables() {
        let vars = [("SELQ_LOG_LEVEL", "debug"), ("SELQ_STRICT", "yes")];
        let config = CliConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.strict);
    }

    #[test]
    fn lookup_falls_back_to_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[rstest]
    #[case("SELQ_STRICT", "sometimes")]
    #[case("SELQ_LOG_LEVEL", "chatty")]
    fn lookup_rejects_invalid_values(#[case] name: &str, #[case] value: &str) {
        let vars = [(name, value)];
        assert!(CliConfig::from_lookup(lookup(&vars)).is_err());
    }
}

//! Error types for the command-line front end.

use thiserror::Error;

/// Errors raised before or around selector evaluation.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No element in the loaded tree has the requested id attribute.
    #[error("no element with id `{0}` in the tree")]
    UnknownNode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = CliError::InvalidConfig("unknown log level".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level"
        );
    }

    #[test]
    fn unknown_node_error_names_the_id() {
        let error = CliError::UnknownNode("nav".to_string());
        assert_eq!(error.to_string(), "no element with id `nav` in the tree");
    }
}

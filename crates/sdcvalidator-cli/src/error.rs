//! Error types and handling for the CLI
//!
//! Every failure that happens before a classified result exists maps to
//! exit code 2, the same code as a structural rejection.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from sdcvalidator-core
    #[error("{0}")]
    Core(#[from] sdcvalidator_core::Error),

    /// Instance engine failure
    #[error("{0}")]
    Engine(#[from] sdcvalidator_core::EngineError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        2
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_exits_with_two() {
        let errors = [
            Error::config("bad"),
            Error::invalid_args("no engine"),
            Error::FileNotFound {
                path: PathBuf::from("missing.xml"),
            },
            Error::Engine(sdcvalidator_core::EngineError::EmptyCommand),
        ];
        for error in errors {
            assert_eq!(error.exit_code(), 2, "{error}");
        }
    }

    #[test]
    fn test_format_without_color() {
        let error = Error::invalid_args("no instance engine configured");
        assert_eq!(
            format_error(&error, false),
            "Error: Invalid arguments: no instance engine configured"
        );
        assert!(error.should_show_help());
    }
}

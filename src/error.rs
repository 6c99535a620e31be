//! Error types and error handling for pygmy.
//!
//! This module defines all error types used throughout the application,
//! along with the CLI exit codes they map to. The configuration core never
//! terminates the process itself; it returns a typed error and the CLI
//! boundary decides the exit code.

use thiserror::Error;

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error (including mandatory-field validation)
    pub const CONFIG_ERROR: i32 = 2;
    /// Container runtime error
    pub const RUNTIME_ERROR: i32 = 3;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for pygmy.
#[derive(Debug, Error)]
pub enum PygmyError {
    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A service is missing a mandatory label.
    #[error("service '{service}' does not have a value for label '{label}'")]
    MissingLabel { service: String, label: String },

    /// A service is missing its container image reference.
    #[error("service '{service}' does not have a value for its image")]
    MissingImage { service: String },

    /// Container runtime operation failed.
    #[error("Runtime error: {message}")]
    Runtime {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Runtime operation timed out.
    #[error("Timeout: {operation} (waited {seconds}s)")]
    Timeout { operation: String, seconds: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PygmyError {
    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PygmyError::Config { .. }
            | PygmyError::MissingLabel { .. }
            | PygmyError::MissingImage { .. }
            | PygmyError::Yaml(_) => exit_code::CONFIG_ERROR,
            PygmyError::Runtime { .. } | PygmyError::Timeout { .. } => exit_code::RUNTIME_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        PygmyError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PygmyError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a runtime error with a message.
    pub fn runtime(message: impl Into<String>) -> Self {
        PygmyError::Runtime {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a runtime error with a message and source.
    pub fn runtime_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PygmyError::Runtime {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for pygmy operations.
pub type Result<T> = std::result::Result<T, PygmyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_exit_with_config_code() {
        let err = PygmyError::MissingLabel {
            service: "amazeeio-haproxy".to_string(),
            label: "pygmy.name".to_string(),
        };
        assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);

        let err = PygmyError::MissingImage {
            service: "amazeeio-haproxy".to_string(),
        };
        assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);

        let err = PygmyError::config("bad yaml");
        assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);
    }

    #[test]
    fn test_runtime_error_exit_code() {
        let err = PygmyError::runtime("docker unreachable");
        assert_eq!(err.exit_code(), exit_code::RUNTIME_ERROR);

        let err = PygmyError::Timeout {
            operation: "docker start".to_string(),
            seconds: 60,
        };
        assert_eq!(err.exit_code(), exit_code::RUNTIME_ERROR);
    }

    #[test]
    fn test_error_display_names_service_and_field() {
        let err = PygmyError::MissingLabel {
            service: "custom".to_string(),
            label: "pygmy.name".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "service 'custom' does not have a value for label 'pygmy.name'"
        );

        let err = PygmyError::MissingImage {
            service: "custom".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "service 'custom' does not have a value for its image"
        );
    }

    #[test]
    fn test_io_error_is_general() {
        let err = PygmyError::Io(std::io::Error::other("boom"));
        assert_eq!(err.exit_code(), exit_code::GENERAL_ERROR);
    }
}

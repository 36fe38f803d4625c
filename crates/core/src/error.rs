//! Error types for descriptor loading, configuration and synthesis.
//!
//! Synthesis errors are scoped to a single operation. The client assembler
//! collects them per operation instead of aborting the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Failure while synthesizing code for one operation.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The schema `type` is not one of the kinds the synthesizer understands.
    #[error("unsupported schema kind `{kind}`")]
    UnsupportedSchemaKind {
        /// The `type` value as written
        kind: String,
    },

    /// A reference path could not be turned into an identifier expression.
    #[error("invalid identifier `{name}`: a path segment cannot start with '/'")]
    InvalidIdentifier {
        /// The full dotted path
        name: String,
    },

    /// A declared path parameter has no `{placeholder}` in the request URI.
    #[error("path parameter `{name}` not found in request URI `{uri}`")]
    UndefinedPathParameter {
        /// Parameter name
        name: String,
        /// Request URI that lacks `{name}`
        uri: String,
    },

    /// An internal builder contract was broken by upstream input.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl SynthesisError {
    /// True when the error signals a broken internal contract rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, SynthesisError::Invariant(_))
    }
}

/// A builder received an item sequence it can never produce itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("builder invariant violated at template item {index}: {detail}")]
pub struct InvariantViolation {
    /// Position of the offending item in the template item list.
    pub index: usize,
    /// What the builder expected at that position.
    pub detail: String,
}

/// Failure while reading an operation descriptor document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not valid YAML for the expected shape.
    #[error("failed to parse descriptor YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported descriptor format for {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat {
        /// Offending file
        path: PathBuf,
    },
}

/// Failure while reading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML or has wrongly typed keys.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_is_internal() {
        let err = SynthesisError::from(InvariantViolation {
            index: 2,
            detail: "expected an expression item".into(),
        });
        assert!(err.is_internal());
        assert_eq!(
            err.to_string(),
            "builder invariant violated at template item 2: expected an expression item"
        );
    }

    #[test]
    fn test_input_errors_are_not_internal() {
        let err = SynthesisError::InvalidIdentifier { name: "/a".into() };
        assert!(!err.is_internal());
        let err = SynthesisError::UnsupportedSchemaKind { kind: "tuple".into() };
        assert!(!err.is_internal());
        assert_eq!(err.to_string(), "unsupported schema kind `tuple`");
    }
}

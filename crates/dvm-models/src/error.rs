//! # Error Types
//!
//! Errors raised by the entity models. Schema failures are carried through
//! unchanged from `dvm-schema` so callers can inspect the violations.

use thiserror::Error;

use dvm_schema::SchemaValidationError;

/// Top-level error type for entity operations.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The requested data format is not one of the supported formats.
    #[error("data format '{0}' is not supported")]
    UnsupportedFormat(String),

    /// A value could not be stored in the named attribute.
    #[error("invalid value for attribute '{attribute}': {reason}")]
    InvalidAttribute {
        /// Attribute (or bookkeeping field) name.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The input file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("cannot decode JSON in '{path}': {source}")]
    Decode {
        /// Path of the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The input file is valid JSON but not an object.
    #[error("JSON document in '{path}' is not an object")]
    NotAnObject {
        /// Path of the file.
        path: String,
    },

    /// Schema loading or validation failed.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// Serialization of the exported document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Whether the error is a schema mismatch of the document.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Schema(e) if e.is_validation_failure())
    }
}

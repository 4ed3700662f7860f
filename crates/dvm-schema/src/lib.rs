//! # dvm-schema: Schema Validation for Upload Documents
//!
//! Provides runtime JSON Schema validation for the JSON documents exchanged
//! with the Dataverse API (dataverse and datafile upload metadata).
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module loads a single JSON Schema document from disk,
//! detects its draft from the `$schema` keyword, resolves cross-document
//! `$ref`s from sibling files, and validates JSON documents against it.
//! Key entry points:
//!
//! - [`SchemaValidator::validate_document`]: validates an in-memory value.
//! - [`validate_data`]: one-shot load-and-validate used by the entity models.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dvm-*` crates.
//! - Validation never touches the network: `$ref`s resolve to local files only.
//! - Invalid documents are rejected with structured errors including the
//!   instance path, schema path and message of every violation.

pub mod validate;

pub use validate::{
    validate_data, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
};

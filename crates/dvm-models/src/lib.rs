//! # dvm-models: Dataverse API Data Models
//!
//! Entity objects for the Dataverse research-data repository API. Each
//! entity holds a fixed, format-defined set of attributes plus bookkeeping
//! fields, and converts between that attribute set and the JSON documents the
//! API exchanges.
//!
//! ## Entities
//!
//! - [`Dataverse`]: a collection (`alias`, `name`, `dataverseContacts`, ...).
//! - [`Datafile`]: metadata of an uploaded file (`pid`, `filename`, ...).
//!
//! Both implement [`DvObject`], which provides:
//!
//! - [`DvObject::set`]: copy recognized keys from a flat mapping.
//! - [`DvObject::dict`]: full dump of attributes and bookkeeping fields.
//! - [`DvObject::to_json`]: format-scoped export, validated by default.
//! - [`DvObject::from_json`]: import from a JSON file, validated by default.
//! - [`DvObject::validate_json`]: validate the format-scoped attributes.
//!
//! ## Schemas
//!
//! The upload schemas live in this crate under `schemas/json/`. The default
//! schema paths are relative and resolve against the working directory; use
//! [`EntityConfig::with_schema_root`] to anchor them elsewhere.
//!
//! ## Crate Policy
//!
//! - Depends only on `dvm-schema` internally.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod datafile;
pub mod dataverse;
pub mod error;
pub mod format;
pub mod object;

pub use config::{EntityConfig, JsonOptions, BOOKKEEPING_FIELDS};
pub use datafile::{Datafile, DATAFILE_SCHEMA_FILENAME, DATAFILE_UPLOAD_ATTRIBUTES};
pub use dataverse::{Contact, Dataverse, DATAVERSE_SCHEMA_FILENAME, DATAVERSE_UPLOAD_ATTRIBUTES};
pub use error::ModelError;
pub use format::DataFormat;
pub use object::DvObject;

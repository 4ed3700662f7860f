//! # dvm-cli: CLI Tool for Dataverse Upload Documents
//!
//! Provides the `dvm` command-line interface on top of `dvm-models`.
//!
//! ## Subcommands
//!
//! - `dvm validate`: Validate a dataverse or datafile document.
//! - `dvm convert`: Import a document and re-export it in a format.
//!
//! ```bash
//! dvm validate tests/data/dataverse_upload_full.json
//! dvm convert upload.json --kind datafile --output clean.json
//! ```
//!
//! Relative schema paths are resolved against the schema root: the first
//! ancestor of the working directory that contains `schemas/json/`, or the
//! directory given with `--schema-root`.

pub mod convert;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use dvm_models::{Datafile, Dataverse, DvObject};

/// Entity kind of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Dataverse,
    Datafile,
}

impl EntityKind {
    /// The entity's default schema, resolved against `schema_root`.
    pub fn default_schema(&self, schema_root: &Path) -> PathBuf {
        let config = match self {
            Self::Dataverse => new_entity::<Dataverse>(schema_root).config().clone(),
            Self::Datafile => new_entity::<Datafile>(schema_root).config().clone(),
        };
        config.default_validate_schema_filename
    }
}

/// A fresh entity whose default schema path is anchored at `schema_root`.
pub fn new_entity<T: DvObject + Default>(schema_root: &Path) -> T {
    let mut entity = T::default();
    let config = entity.config().clone().with_schema_root(schema_root);
    *entity.config_mut() = config;
    entity
}

/// Resolve a path that may be relative to the schema root.
///
/// Absolute paths are returned as-is. A relative path is taken relative to
/// `schema_root` if it exists there, and relative to the current directory
/// otherwise.
pub fn resolve_path(path: &Path, schema_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let rooted = schema_root.join(path);
    if rooted.exists() {
        rooted
    } else {
        path.to_path_buf()
    }
}

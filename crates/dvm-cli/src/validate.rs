//! # Validate Subcommand
//!
//! Imports a dataverse or datafile document with schema validation turned
//! on and reports every violation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dvm_models::{Datafile, Dataverse, DvObject, JsonOptions, ModelError};
use dvm_schema::SchemaValidationError;

use crate::{new_entity, resolve_path, EntityKind};

/// Arguments for the `dvm validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON document to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entity kind of the document.
    #[arg(long, value_enum, default_value_t = EntityKind::Dataverse)]
    pub kind: EntityKind,

    /// Schema to validate against instead of the kind's default.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document is valid, 1 when it violates the
/// schema. Read and schema-load failures are returned as errors.
pub fn run_validate(args: &ValidateArgs, schema_root: &Path) -> Result<u8> {
    let schema = args
        .schema
        .as_deref()
        .map(|p| resolve_path(p, schema_root))
        .unwrap_or_else(|| args.kind.default_schema(schema_root));
    tracing::info!(schema = %schema.display(), kind = ?args.kind, "validating document");

    let opts = JsonOptions::new().schema(&schema);
    let result = match args.kind {
        EntityKind::Dataverse => import::<Dataverse>(&args.file, &opts, schema_root),
        EntityKind::Datafile => import::<Datafile>(&args.file, &opts, schema_root),
    };

    match result {
        Ok(()) => {
            println!("OK: {}", args.file.display());
            Ok(0)
        }
        Err(ModelError::Schema(SchemaValidationError::ValidationFailed {
            violations, ..
        })) => {
            eprintln!(
                "FAIL: {}: {} violation(s) against {}",
                args.file.display(),
                violations.len(),
                schema.display()
            );
            for violation in violations.violations() {
                eprintln!("{violation}");
            }
            Ok(1)
        }
        Err(e) => Err(e).with_context(|| format!("cannot validate {}", args.file.display())),
    }
}

fn import<T: DvObject + Default>(
    file: &Path,
    opts: &JsonOptions,
    schema_root: &Path,
) -> Result<(), ModelError> {
    let mut entity: T = new_entity(schema_root);
    entity.from_json(file, opts)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_root() -> PathBuf {
        // crates/dvm-cli -> crates/dvm-models
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop();
        dir.join("dvm-models")
    }

    fn write_doc(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("doc.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn valid_dataverse_returns_0() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(
            dir.path(),
            r#"{"alias": "science", "name": "Scientific Research",
                "dataverseContacts": [{"contactEmail": "pi@example.edu"}]}"#,
        );
        let args = ValidateArgs {
            file,
            kind: EntityKind::Dataverse,
            schema: None,
        };
        assert_eq!(run_validate(&args, &schema_root()).unwrap(), 0);
    }

    #[test]
    fn invalid_dataverse_returns_1() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(dir.path(), r#"{"alias": "science"}"#);
        let args = ValidateArgs {
            file,
            kind: EntityKind::Dataverse,
            schema: None,
        };
        assert_eq!(run_validate(&args, &schema_root()).unwrap(), 1);
    }

    #[test]
    fn dataverse_against_datafile_schema_returns_1() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(
            dir.path(),
            r#"{"alias": "science", "name": "Scientific Research",
                "dataverseContacts": [{"contactEmail": "pi@example.edu"}]}"#,
        );
        let args = ValidateArgs {
            file,
            kind: EntityKind::Dataverse,
            schema: Some(PathBuf::from("schemas/json/datafile_upload_schema.json")),
        };
        assert_eq!(run_validate(&args, &schema_root()).unwrap(), 1);
    }

    #[test]
    fn missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            file: dir.path().join("missing.json"),
            kind: EntityKind::Datafile,
            schema: None,
        };
        assert!(run_validate(&args, &schema_root()).is_err());
    }
}

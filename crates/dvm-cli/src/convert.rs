//! # Convert Subcommand
//!
//! Imports a document and exports the attributes of the requested format.
//! Keys outside the format are dropped, so the output is the document the
//! Dataverse API accepts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dvm_models::{DataFormat, Datafile, Dataverse, DvObject, JsonOptions, ModelError};

use crate::{new_entity, resolve_path, EntityKind};

/// Arguments for the `dvm convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// JSON document to convert.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entity kind of the document.
    #[arg(long, value_enum, default_value_t = EntityKind::Dataverse)]
    pub kind: EntityKind,

    /// Output format (default: the entity's default format).
    #[arg(long)]
    pub format: Option<String>,

    /// Skip schema validation on import and export.
    #[arg(long)]
    pub no_validate: bool,

    /// Schema to validate against instead of the kind's default.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs, schema_root: &Path) -> Result<u8> {
    let mut opts = JsonOptions::new().validate(!args.no_validate);
    if let Some(name) = &args.format {
        // Import tolerates unknown formats; reject them before reading.
        let format: DataFormat = name.parse()?;
        opts = opts.format(format.as_str());
    }
    if let Some(schema) = &args.schema {
        opts = opts.schema(resolve_path(schema, schema_root));
    }

    let json = match args.kind {
        EntityKind::Dataverse => convert::<Dataverse>(&args.file, &opts, schema_root),
        EntityKind::Datafile => convert::<Datafile>(&args.file, &opts, schema_root),
    }
    .with_context(|| format!("cannot convert {}", args.file.display()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!(output = %path.display(), "wrote converted document");
        }
        None => println!("{json}"),
    }
    Ok(0)
}

fn convert<T: DvObject + Default>(
    file: &Path,
    opts: &JsonOptions,
    schema_root: &Path,
) -> Result<String, ModelError> {
    let mut entity: T = new_entity(schema_root);
    entity.from_json(file, opts)?;
    entity.to_json(opts)
}

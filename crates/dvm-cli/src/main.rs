//! # dvm CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dvm_cli::convert::{run_convert, ConvertArgs};
use dvm_cli::validate::{run_validate, ValidateArgs};

/// Dataverse upload document toolchain.
///
/// Validates dataverse and datafile metadata against the upload schemas and
/// converts documents into the form the Dataverse API accepts.
#[derive(Parser, Debug)]
#[command(name = "dvm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory that relative schema paths are resolved against.
    #[arg(long, global = true)]
    schema_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against its upload schema.
    Validate(ValidateArgs),

    /// Import a document and re-export it in an upload format.
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let schema_root = cli.schema_root.clone().unwrap_or_else(|| {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        resolve_schema_root(&cwd).unwrap_or_else(|| {
            tracing::warn!("no schemas/json directory found; using current directory");
            cwd
        })
    });

    tracing::debug!(schema_root = %schema_root.display(), "resolved schema root");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &schema_root),
        Commands::Convert(args) => run_convert(&args, &schema_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Walk up from `start` to the first directory containing `schemas/json/`.
fn resolve_schema_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("schemas").join("json").is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    use dvm_cli::EntityKind;

    #[test]
    fn cli_parse_validate_defaults() {
        let cli = Cli::try_parse_from(["dvm", "validate", "upload.json"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.file, PathBuf::from("upload.json"));
        assert_eq!(args.kind, EntityKind::Dataverse);
        assert!(args.schema.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parse_convert_flags() {
        let cli = Cli::try_parse_from([
            "dvm",
            "-vv",
            "convert",
            "file.json",
            "--kind",
            "datafile",
            "--no-validate",
            "--format",
            "dataverse_upload",
            "-o",
            "out.json",
            "--schema-root",
            "/srv/dvm",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.schema_root, Some(PathBuf::from("/srv/dvm")));
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.kind, EntityKind::Datafile);
        assert!(args.no_validate);
        assert_eq!(args.format.as_deref(), Some("dataverse_upload"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn cli_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["dvm", "validate", "f.json", "--kind", "dataset"]).is_err());
    }

    #[test]
    fn schema_root_found_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("schemas/json")).unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(resolve_schema_root(&nested), Some(dir.path().to_path_buf()));
    }
}

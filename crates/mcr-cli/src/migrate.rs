//! # Migrate Subcommand
//!
//! Decode a stored form payload, bring it up to the current proto version,
//! and write the result as pretty JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mcr_proto::{MigrationReport, CURRENT_PROTO_VERSION};

/// Arguments for `mcr migrate`.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Payload file (JSON).
    pub file: PathBuf,

    /// Write the upgraded payload here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Read and upgrade the payload at `path`.
pub fn migrate_file(path: &Path) -> Result<MigrationReport> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    mcr_proto::decode_to_latest(&bytes).with_context(|| format!("cannot decode {}", path.display()))
}

pub fn run_migrate(args: &MigrateArgs) -> Result<u8> {
    let report = migrate_file(&args.file)?;
    let encoded = mcr_proto::encode(&report.payload)?;

    if report.upgraded() {
        tracing::info!(
            file = %args.file.display(),
            from = report.from_version,
            to = CURRENT_PROTO_VERSION,
            "payload upgraded"
        );
    } else {
        tracing::info!(file = %args.file.display(), "payload already current");
    }

    match &args.output {
        Some(out) => {
            std::fs::write(out, &encoded)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} -> {}", args.file.display(), out.display());
        }
        None => println!("{}", String::from_utf8_lossy(&encoded)),
    }
    Ok(0)
}

//! Content fingerprint calculator.
//!
//! Prints one `property|digestType|digestValue` line per file and digest, the
//! same form nodes store under `hack:fingerprints`.
//!
//! # Usage
//!
//! ```bash
//! # Digests from FINGERPRINT_DIGEST_TYPES (default SHA-256)
//! fingerprint-digest ./report.pdf
//!
//! # Explicit digests and property
//! fingerprint-digest --digest-types SHA-256,SHA-512 --property hack:rendition ./a.bin ./b.bin
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fingerprint_core::{PROP_CONTENT, compute_fingerprints, parse_digest_types};
use fingerprint_serve::Config;
use tracing_subscriber::EnvFilter;

/// Compute content fingerprints for files.
#[derive(Parser, Debug)]
#[command(name = "fingerprint-digest")]
#[command(about = "Compute content fingerprints for files")]
#[command(version)]
struct Args {
    /// Files to fingerprint
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Comma-separated digests (overrides FINGERPRINT_DIGEST_TYPES)
    #[arg(long, short)]
    digest_types: Option<String>,

    /// Content property the fingerprints are recorded for
    #[arg(long, short, default_value = PROP_CONTENT)]
    property: String,

    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let digest_types = match &args.digest_types {
        Some(list) => parse_digest_types(list)?,
        None => Config::from_env()?.digest_types,
    };
    if digest_types.is_empty() {
        anyhow::bail!("no digest types given");
    }

    for path in &args.files {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let prints = compute_fingerprints(BufReader::new(file), &args.property, &digest_types)
            .with_context(|| format!("failed to digest {}", path.display()))?;

        for print in prints {
            println!("{}  {print}", path.display());
        }
    }

    Ok(())
}

//! fakegen: generate recorder fakes
//!
//! ## Example Usage
//!
//! ```bash
//! # Fake the Fetcher interface of the module described in ./store
//! fakegen ./store Fetcher
//!
//! # Fully qualified, written to an explicit file
//! fakegen -o fakes/fetcher.go example.com/store.Fetcher
//!
//! # Interface + shim + fake for the exported functions of a module
//! fakegen -p os
//!
//! # Print to stdout
//! fakegen example.com/store.Fetcher -
//! ```
//!
//! Set `FAKEGEN_DEBUG` to log to stderr (filter with `RUST_LOG`).

use anyhow::{Context, Result};
use clap::Parser;
use fakegen::args::Args;
use fakegen::DEBUG_ENV;

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    if std::env::var_os(DEBUG_ENV).is_none() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    let cwd = std::env::current_dir().context("couldn't determine current working directory")?;
    fakegen::run(&args, &cwd)
}

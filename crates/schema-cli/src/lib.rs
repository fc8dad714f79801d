use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::Args;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_SCHEMA_PATH: &str = "config/schema.json";

#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Path to the provider schema JSON document
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH, env = "ELESTIO_SCHEMA_PATH")]
    pub schema_path: PathBuf,
}

/// Installs the fmt subscriber on stderr, so diagnostics never mix with
/// anything a tool prints on stdout. `RUST_LOG` overrides the `info` default.
/// Colours are only used when stderr is a terminal.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

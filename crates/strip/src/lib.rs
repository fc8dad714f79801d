pub mod document;
pub mod strip;

use std::path::PathBuf;

use elestio_schema_cli::DEFAULT_SCHEMA_PATH;
use tracing::info;

use crate::{
    document::SchemaError,
    strip::{DYNAMIC_FIELDS, StripReport},
};

#[derive(Debug, Clone)]
pub struct StripOptions {
    pub schema_path: PathBuf,
    /// Attribute names to remove, in removal order.
    pub fields: Vec<String>,
    /// Report removals but leave the file on disk untouched.
    pub dry_run: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            fields: DYNAMIC_FIELDS.iter().map(|field| field.to_string()).collect(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// None of the fields were present; the file was not touched.
    Unchanged,
    /// Fields were found but `dry_run` kept the file as it was.
    WouldRewrite(StripReport),
    Rewritten(StripReport),
}

impl StripOutcome {
    pub fn report(&self) -> Option<&StripReport> {
        match self {
            StripOutcome::Unchanged => None,
            StripOutcome::WouldRewrite(report) | StripOutcome::Rewritten(report) => Some(report),
        }
    }
}

/// Loads the schema, strips the configured fields and writes it back compactly
/// when anything was removed.
pub fn run(options: &StripOptions) -> Result<StripOutcome, SchemaError> {
    let path = options.schema_path.as_path();
    let mut schema = document::load(path)?;

    let report = strip::strip_fields(&mut schema, &options.fields);
    if !report.modified() {
        info!("No dynamic fields found to remove");
        return Ok(StripOutcome::Unchanged);
    }

    if options.dry_run {
        info!(
            "Dry run: would remove {} field(s) from {} resource(s) in {}",
            report.removed_count(),
            report.removals.len(),
            path.display()
        );
        return Ok(StripOutcome::WouldRewrite(report));
    }

    document::store(path, &schema)?;
    info!("Successfully removed dynamic type fields from {}", path.display());

    Ok(StripOutcome::Rewritten(report))
}

use std::process;

use clap::{Parser, builder::FalseyValueParser};
use elestio_schema_cli::{SchemaArgs, init_logging};
use elestio_schema_strip::{StripOptions, run, strip::DYNAMIC_FIELDS};
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Strip dynamic-typed attributes from the Elestio provider schema"
)]
struct Args {
    /// Attribute to remove from every resource block (repeatable)
    #[arg(
        long = "field",
        value_name = "NAME",
        value_delimiter = ',',
        default_values = DYNAMIC_FIELDS,
        env = "ELESTIO_SCHEMA_STRIP_FIELDS"
    )]
    fields: Vec<String>,

    /// Report what would be removed without rewriting the schema
    #[arg(long, env = "ELESTIO_SCHEMA_DRY_RUN", value_parser = FalseyValueParser::new())]
    dry_run: bool,

    #[command(flatten)]
    schema: SchemaArgs,
}

impl From<Args> for StripOptions {
    fn from(args: Args) -> Self {
        StripOptions {
            schema_path: args.schema.schema_path,
            fields: args.fields,
            dry_run: args.dry_run,
        }
    }
}

fn main() {
    init_logging();

    let options = StripOptions::from(Args::parse());
    debug!("Stripping {} from {}", options.fields.join(", "), options.schema_path.display());

    if let Err(e) = run(&options) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}

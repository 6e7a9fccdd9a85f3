//! Field Coverage CLI
//!
//! Extracts field trees from schema descriptions and reports which fields of a
//! reference tree a candidate tree supports.
//!
//! Usage:
//!   field-coverage extract --schema linux_spec.json
//!   field-coverage compare --reference spec.json --candidate runtime.json
//!   field-coverage demo

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use field_coverage::field::count_nodes;
use field_coverage::{
    compare, demo, load_fields, CoverageConfig, CoverageReport, ExtractStats, FieldListing,
    OutputFormat, RecordType,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "field-coverage")]
#[command(about = "Extract schema field trees and report support coverage")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the extracted field list of a schema description
    Extract {
        /// Schema description (JSON); defaults to the built-in Linux runtime spec
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Qualify every name with this prefix
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a reference field tree against a candidate field tree
    Compare {
        /// Reference tree (JSON)
        #[arg(short, long)]
        reference: PathBuf,

        /// Candidate tree (JSON)
        #[arg(long)]
        candidate: PathBuf,

        /// Output format (text, pretty, compact); overrides the config
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Exit with status 1 when anything is unsupported
        #[arg(long)]
        strict: bool,
    },

    /// Extract the built-in schema, then compare the built-in demonstration trees
    Demo,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CoverageConfig::load_validated(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract { schema, prefix, json } => {
            let record = match schema {
                Some(path) => {
                    info!(path = %path.display(), "loading schema description");
                    RecordType::from_path(&path)?
                }
                None => demo::linux_spec()?,
            };
            let fields = config.extractor().extract_record(&prefix, &record);

            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                let stats = ExtractStats::collect(&record, &config.extract.skip_marker);
                println!("Number of fields:{}", record.fields.len());
                print!("{}", FieldListing(&fields));
                info!(
                    emitted = stats.emitted,
                    omitted = stats.omitted,
                    optional = stats.optional,
                    max_depth = stats.max_depth,
                    "extraction complete"
                );
            }
            Ok(())
        }

        Commands::Compare {
            reference,
            candidate,
            format,
            strict,
        } => {
            let reference = load_fields(&reference)?;
            let candidate = load_fields(&candidate)?;
            info!(
                reference_nodes = count_nodes(&reference),
                candidate_nodes = count_nodes(&candidate),
                "loaded field trees"
            );

            let report =
                CoverageReport::build(&reference, &candidate, config.suggestion_threshold());
            let format = format.unwrap_or(config.report.output_format);
            println!("{}", report.render(format)?);

            if strict && !report.comparison.is_fully_supported() {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Demo => {
            let record = demo::linux_spec()?;
            println!("Number of fields:{}", record.fields.len());
            let fields = config.extractor().extract_record("", &record);
            print!("{}", FieldListing(&fields));

            let reference = demo::reference_tree()?;
            let candidate = demo::candidate_tree()?;
            println!("=======================================");
            println!("{}", compare(&reference, &candidate));
            Ok(())
        }
    }
}

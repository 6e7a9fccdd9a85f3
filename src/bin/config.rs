//! Coverage Config CLI
//!
//! View and manage field coverage configuration.

use clap::{Parser, Subcommand};
use field_coverage::CoverageConfig;

#[derive(Parser)]
#[command(name = "coverage-config")]
#[command(about = "View and manage field coverage configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path (default: coverage.toml)
        #[arg(short, long, default_value = "coverage.toml")]
        output: String,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = CoverageConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 Field Coverage Configuration\n");
                println!("Extract:");
                println!("  Skip marker: {:?}", cfg.extract.skip_marker);

                println!("\nReport:");
                println!("  Format: {:?}", cfg.report.output_format);
                println!("  Suggestions: {}", cfg.report.show_suggestions);
                println!("  Min suggestion score: {}", cfg.report.min_suggestion_score);
            }
        }

        Commands::Init { output } => {
            if std::path::Path::new(&output).exists() {
                return Err(format!("{} already exists", output).into());
            }
            CoverageConfig::default().save(&output)?;
            println!("✅ Created {}", output);
        }

        Commands::Validate { config } => {
            CoverageConfig::load_validated(config.as_deref())?;
            println!("✅ Configuration is valid");
        }
    }

    Ok(())
}

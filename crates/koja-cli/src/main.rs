//! koja CLI - JSON Schema generator for Rust data models
//!
//! Commands:
//! - `koja generate` - Write the JSON Schema of types deriving `JsonSchema`
//! - `koja check` - Validate types and doc comments, reporting every error

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod logging;
mod manifest;
mod source;

#[derive(Parser)]
#[command(name = "koja")]
#[command(author, version, about = "JSON Schema generator for Rust data models", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate JSON Schema from Rust source files
    Generate {
        /// Rust source files to read
        #[arg(short, long = "input", num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output path for the schema document (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only generate these types (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Write compact instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,

        /// Path to koja.toml (default: ./koja.toml when present)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Validate every JsonSchema type and its doc comments
    Check {
        /// Rust source files to read
        #[arg(short, long = "input", num_args = 1..)]
        input: Vec<PathBuf>,

        /// Path to koja.toml (default: ./koja.toml when present)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            types,
            compact,
            manifest,
        } => {
            generate::run(generate::GenerateOptions {
                inputs: input,
                output,
                types,
                compact,
                manifest,
            })?;
        }
        Commands::Check { input, manifest } => {
            check::run(input, manifest)?;
        }
    }

    Ok(())
}

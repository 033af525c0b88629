//! folio CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod inputs;

use commands::DiagnosticsFormat;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Document tree transforms for MDX sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize `export const metadata` from YAML front matter
    MergeFrontmatter {
        /// JSON document tree, directory of trees, or '-' for stdin
        input: String,

        /// Write output to FILE, or to DIR when the input is a directory
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Configuration file (default: nearest _folio.yml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// How to print diagnostics on stderr
        #[arg(long, value_enum, default_value_t = DiagnosticsFormat::Text)]
        diagnostics: DiagnosticsFormat,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Run the transforms without writing and report problems
    Check {
        /// JSON document tree, directory of trees, or '-' for stdin
        input: String,

        /// Configuration file (default: nearest _folio.yml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// How to print diagnostics on stderr
        #[arg(long, value_enum, default_value_t = DiagnosticsFormat::Text)]
        diagnostics: DiagnosticsFormat,
    },
}

fn main() -> Result<()> {
    // Initialize logging. Trees are written to stdout, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::MergeFrontmatter {
            input,
            output,
            config,
            diagnostics,
            pretty,
        } => commands::merge::execute(commands::merge::MergeArgs {
            input,
            output,
            config,
            diagnostics,
            pretty,
        }),
        Commands::Check {
            input,
            config,
            diagnostics,
        } => commands::check::execute(commands::check::CheckArgs {
            input,
            config,
            diagnostics,
        }),
    }
}

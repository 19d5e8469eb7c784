//! labwire Command-Line Interface
//!
//! Checks and inspects platform descriptor files.
//!
//! ```text
//! labwire check platforms/tii1q_b1.yml
//! labwire show platforms/tii_zcu216_qw5q.yml --format yaml
//! labwire models
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, models, show, version};

/// labwire - assemble quantum lab platforms from descriptor files
#[derive(Parser)]
#[command(name = "labwire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a descriptor file and report problems
    Check {
        /// Descriptor file (YAML or JSON)
        file: String,

        /// Skip completing instruments from the model registry
        #[arg(long)]
        no_models: bool,
    },

    /// Print the wiring of an assembled platform
    Show {
        /// Descriptor file (YAML or JSON)
        file: String,

        /// Output format (table, json, yaml)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Skip completing instruments from the model registry
        #[arg(long)]
        no_models: bool,
    },

    /// List known instrument models
    Models,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check { file, no_models } => check::execute(&file, !no_models),

        Commands::Show {
            file,
            format,
            no_models,
        } => show::execute(&file, &format, !no_models),

        Commands::Models => {
            models::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

//! Drift CLI - API changelogs from git history
//!
//! Compares the data model and endpoints of an API between two revisions and
//! writes the differences as a Markdown changelog, inferring renamed types
//! and fields along the way.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod constants;
mod git;
mod output;
mod report;

use commands::changelog::ChangelogOptions;
use commands::*;
use config::DriftConfig;
use output::OutputFormat;

/// API changelogs from git history.
#[derive(Parser)]
#[command(name = "drift")]
#[command(author, version)]
#[command(about = "API changelogs from git history")]
#[command(
    long_about = "Drift compares the OpenAPI document and model classes of a service\nbetween two git revisions and reports added, removed, modified and\nrenamed types, fields and endpoints."
)]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  drift components main                Schema changes since main
  drift endpoints v1.2 v1.3            Endpoint changes between tags
  drift changelog main release/2.0     Write changelog/changelog-release-2.0.md
  drift compare old.json new.json      Diff two catalog files")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Show detailed version information
    #[arg(long = "version-verbose")]
    version_verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Java model class changes between git refs
    Models {
        /// Base git ref (branch, commit, tag)
        base_ref: String,

        /// Head git ref (branch, commit, tag) - defaults to HEAD
        #[arg(default_value = "HEAD")]
        head_ref: String,

        /// Folder holding the model classes
        #[arg(long)]
        folder: Option<String>,
    },

    /// OpenAPI component schema changes between git refs
    #[command(visible_alias = "schemas")]
    Components {
        /// Base git ref (branch, commit, tag)
        base_ref: String,

        /// Head git ref (branch, commit, tag) - defaults to HEAD
        #[arg(default_value = "HEAD")]
        head_ref: String,

        /// Path to the OpenAPI document
        #[arg(long)]
        file: Option<String>,
    },

    /// Added and removed API endpoints between git refs
    Endpoints {
        /// Base git ref (branch, commit, tag)
        base_ref: String,

        /// Head git ref (branch, commit, tag) - defaults to HEAD
        #[arg(default_value = "HEAD")]
        head_ref: String,

        /// Path to the OpenAPI document
        #[arg(long)]
        file: Option<String>,
    },

    /// Ticket keys referenced by commits between git refs
    Tickets {
        /// Base git ref (branch, commit, tag)
        base_ref: String,

        /// Head git ref (branch, commit, tag) - defaults to HEAD
        #[arg(default_value = "HEAD")]
        head_ref: String,

        /// Regex matching a ticket key
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Write the complete changelog for a release
    Changelog {
        /// Base git ref (branch, commit, tag)
        base_ref: String,

        /// Head git ref (branch, commit, tag) - defaults to HEAD
        #[arg(default_value = "HEAD")]
        head_ref: String,

        /// Path to the OpenAPI document
        #[arg(long)]
        file: Option<String>,

        /// Folder holding the model classes (adds the model class section)
        #[arg(long)]
        folder: Option<String>,

        /// Add the referenced tickets section
        #[arg(long)]
        tickets: bool,

        /// Directory to write the changelog to
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Print the changelog instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Diff two catalog JSON files
    Compare {
        /// Catalog before the change
        old: String,

        /// Catalog after the change
        new: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print verbose version information
fn print_verbose_version() {
    use colored::Colorize;

    let cli_version = env!("CARGO_PKG_VERSION");
    let platform = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    println!("drift {}", cli_version);
    println!("  {:<12} {}", "drift-cli:".cyan(), cli_version);
    println!("  {:<12} {}", "drift-core:".cyan(), drift_core::version());
    println!("  {:<12} {}", "Platform:".cyan(), platform);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version_verbose {
        print_verbose_version();
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet);

    let config = DriftConfig::load(std::path::Path::new("."));

    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Models {
            base_ref,
            head_ref,
            folder,
        } => models::run(&base_ref, &head_ref, folder.as_deref(), &config, format).await,
        Commands::Components {
            base_ref,
            head_ref,
            file,
        } => components::run(&base_ref, &head_ref, file.as_deref(), &config, format).await,
        Commands::Endpoints {
            base_ref,
            head_ref,
            file,
        } => endpoints::run(&base_ref, &head_ref, file.as_deref(), &config, format).await,
        Commands::Tickets {
            base_ref,
            head_ref,
            pattern,
        } => tickets::run(&base_ref, &head_ref, pattern.as_deref(), &config, format).await,
        Commands::Changelog {
            base_ref,
            head_ref,
            file,
            folder,
            tickets,
            output_dir,
            stdout,
        } => {
            let options = ChangelogOptions {
                base_ref: &base_ref,
                head_ref: &head_ref,
                file: file.as_deref(),
                folder: folder.as_deref(),
                tickets,
                output_dir: output_dir.as_deref(),
                stdout,
            };
            changelog::run(options, &config, format).await
        }
        Commands::Compare { old, new } => compare::run(&old, &new, &config, format).await,
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::run_instructions(shell, format)
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions(shell, &mut cmd);
                Ok(())
            }
        }
    }
}

//! `folio`: command-line front end for the portfolio contact inbox.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio contact form, message inbox and profile viewer")]
struct Args {
    /// Data directory holding the message database, exports and config
    #[arg(long, global = true, default_value = "folio-data")]
    data_dir: PathBuf,

    /// Config file (defaults to <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a message through the contact form
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
    /// Download every stored message as one JSON file
    DownloadAll,
    /// Review stored messages (asks for the admin password each time)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Load and print the profile document
    Profile {
        /// File path or http(s) URL; overrides the configured source
        #[arg(long)]
        source: Option<String>,
    },
    /// Manage config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    /// List messages, newest first
    List,
    /// Print the number of stored messages
    Count,
    /// Export all messages to a JSON file
    Export,
    /// Delete all messages
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the config file
    Check,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

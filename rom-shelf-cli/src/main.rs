//! rom-shelf CLI
//!
//! Command-line interface for cataloging, browsing, and launching
//! emulated game collections.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

mod commands;
mod error;
mod settings;

#[derive(Parser)]
#[command(name = "rom-shelf")]
#[command(about = "Catalog, browse, and launch emulated game collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common arguments for commands that operate on one platform tree.
#[derive(Args, Clone)]
struct PlatformArgs {
    /// Platform short name (used for config lookup and display)
    #[arg(short, long, default_value = "games")]
    platform: String,

    /// ROM directory containing the platform's files
    dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a ROM directory into a platform tree
    Scan {
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Print the projected tree for a ROM directory
    List {
        #[command(flatten)]
        platform: PlatformArgs,

        /// Display mode: all, registered, or auto
        #[arg(short, long, default_value = "all")]
        mode: String,

        /// Only show favorites
        #[arg(long)]
        favorites: bool,

        /// Sort order label (see `rom-shelf sorts`)
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Launch a ROM with the configured command template
    Launch {
        #[command(flatten)]
        platform: PlatformArgs,

        /// ROM file to launch (relative to the ROM directory or absolute)
        rom: PathBuf,
    },

    /// List the available sort orders
    Sorts,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { platform } => commands::run_scan(&platform.platform, &platform.dir),
        Commands::List {
            platform,
            mode,
            favorites,
            sort,
        } => commands::run_list(&platform.platform, &platform.dir, &mode, favorites, sort),
        Commands::Launch { platform, rom } => {
            commands::run_launch(&platform.platform, &platform.dir, &rom)
        }
        Commands::Sorts => {
            commands::run_sorts();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

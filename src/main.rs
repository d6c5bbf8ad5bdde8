//! Bayline - Terminal-based warehouse bay designer
//!
//! Opens an interactive editor for bay configuration files, or runs one of
//! the headless subcommands for scripting and CI.

use anyhow::Result;
use bayline::cli::{ExportArgs, NewArgs, PickArgs, ValidateArgs};
use bayline::config::Config;
use bayline::constants::{APP_BINARY_NAME, APP_NAME};
use bayline::models::BayConfig;
use bayline::services::BayFileService;
use bayline::tui;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bayline - Terminal-based warehouse bay designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a bay configuration file to edit
    #[arg(value_name = "FILE")]
    bay_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Headless subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new bay configuration file
    New(NewArgs),
    /// Validate a bay configuration file
    Validate(ValidateArgs),
    /// Export a bay diagram (svg, png, pptx)
    Export(ExportArgs),
    /// Plan a serpentine pick path from bin locations
    Pick(PickArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        let result = match command {
            Commands::New(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Export(args) => args.execute(),
            Commands::Pick(args) => args.execute(),
        };
        if let Err(error) = result {
            eprintln!("✗ {error}");
            std::process::exit(error.exit_code());
        }
        return Ok(());
    }

    // No subcommand: run the interactive editor.
    let config = Config::load().unwrap_or_default();
    if !Config::exists() {
        // Seed the config file so users have something to edit
        if let Err(error) = config.save() {
            eprintln!("Warning: could not write default config: {error}");
        }
    }

    let (bay, path) = if let Some(path) = cli.bay_path {
        if !path.exists() {
            eprintln!("Error: Bay file not found: {}", path.display());
            eprintln!();
            eprintln!("Please provide a valid path to a bay configuration file.");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} group_a.toml", APP_BINARY_NAME);
            eprintln!("  {} new --name \"Group A\"", APP_BINARY_NAME);
            eprintln!();
            eprintln!("For more options, run:");
            eprintln!("  {} --help", APP_BINARY_NAME);
            std::process::exit(2);
        }

        // The editor owns the file, so the derived total height wins over
        // whatever a hand edit left behind.
        let bay = BayFileService::load_reconciled(&path)?;
        (bay, Some(path))
    } else {
        println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
        println!("No bay file specified - starting with a new unsaved configuration.");
        (BayConfig::new("New Bay Group")?, None)
    };

    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(bay, path, config);

    let result = tui::run_tui(&mut app_state, &mut terminal);

    tui::restore_terminal(terminal)?;
    result?;

    Ok(())
}

//! treebuild - compile a source tree into a mirrored tree of object files.

mod build;
mod cli;
mod compiler;
mod config;
mod error;
mod logger;
mod pipeline;
mod utils;
mod walker;

use anyhow::Result;
use build::{build_project, clean_output, list_sources};
use clap::Parser;
use cli::{Cli, Commands};
use config::ProjectConfig;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{:#}", err);
        std::process::exit(error::exit_code_of(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => {
            for artifact in &build_project(&config)? {
                println!("{artifact}");
            }
        }
        Commands::List => {
            for (source, object) in list_sources(&config)? {
                println!("{} -> {}", source.display(), object);
            }
        }
        Commands::Clean => clean_output(&config)?,
    }

    Ok(())
}

/// Load configuration, apply CLI overrides, and validate unless cleaning.
///
/// A missing config file falls back to defaults.
fn load_config(cli: &Cli) -> Result<ProjectConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        ProjectConfig::from_path(&config_path)?
    } else {
        log!("config"; "`{}` not found, using defaults", config_path.display());
        ProjectConfig::default()
    };
    config.update_with_cli(cli);

    if !cli.is_clean() {
        config.validate()?;
    }

    Ok(config)
}

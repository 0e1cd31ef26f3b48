//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compile a source tree into a mirrored tree of object files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Source directory path (relative to project root)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Build output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: treebuild.toml)
    #[arg(short = 'C', long, default_value = "treebuild.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile every source file and print the produced objects
    Build {
        /// Remove the build directory before building
        #[arg(long)]
        clean: bool,

        /// Link the objects into the configured target
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        link: Option<bool>,
    },

    /// Print each source file and the object it would produce
    List,

    /// Remove the build directory
    Clean,
}

impl Cli {
    pub const fn is_clean(&self) -> bool {
        matches!(self.command, Commands::Clean)
    }
}

//! Project configuration management for `treebuild.toml`.
//!
//! A missing file is not an error; every field has a default.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "src"
//! output = "build"
//! target = "app"
//!
//! [build.compiler]
//! command = ["cc"]
//! flags = ["-Wall"]
//!
//! [build.linker]
//! enable = true
//! ```

mod build;
pub mod defaults;
mod error;

pub use error::ConfigError;

use build::BuildConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing treebuild.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl ProjectConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ProjectConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Final link output path.
    pub fn target_path(&self) -> PathBuf {
        self.build.output.join(&self.build.target)
    }

    /// Whether the link step runs after compiling.
    pub const fn link_enabled(&self) -> bool {
        self.build.linker.enable
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Commands::Build { clean, link } = &cli.command {
            self.build.clean |= *clean;
            Self::update_option(&mut self.build.linker.enable, link.as_ref());
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against `root` and make it absolute
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(&expand_tilde(root));
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config));
        self.build.source = Self::normalize_path(&root.join(expand_tilde(&self.build.source)));
        self.build.output = Self::normalize_path(&root.join(expand_tilde(&self.build.output)));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        let source = &self.build.source;
        if !source.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.source] `{}` not found",
                source.display()
            )));
        }
        if !source.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.source] `{}` is not a directory",
                source.display()
            )));
        }

        if self.build.output.starts_with(source) {
            bail!(ConfigError::Validation(
                "[build.output] must not be inside [build.source]".into()
            ));
        }
        if source.starts_with(&self.build.output) {
            bail!(ConfigError::Validation(format!(
                "[build.output] `{}` must not contain [build.source]",
                self.build.output.display()
            )));
        }

        Self::check_command_installed("[build.compiler.command]", &self.build.compiler.command)?;

        if self.link_enabled() {
            Self::check_command_installed("[build.linker.command]", &self.build.linker.command)?;

            if self.build.target.as_os_str().is_empty() {
                bail!(ConfigError::Validation(
                    "[build.target] must not be empty when linking".into()
                ));
            }
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        let Some(cmd) = command.first() else {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        };

        which::which(cmd)
            .with_context(|| format!("`{cmd}` not found. Please install it first."))?;

        Ok(())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Tests
// ============================================================================

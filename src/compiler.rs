//! Compiler and linker collaborators.
//!
//! The build pipeline only knows the contract: one input path and one output
//! path in, success or failure out. The command-backed implementations here
//! spawn the configured tools; tests substitute their own.

use crate::config::ProjectConfig;
use crate::utils::exec::{COMPILER_FILTER, exec};
use anyhow::Result;
use std::{ffi::OsString, path::Path};

/// Object file suffix appended to each source stem.
pub const OBJECT_SUFFIX: &str = ".o";

/// Turns one source file into one object file.
pub trait Compiler {
    /// Compile `input` into `output`. The output directory already exists.
    fn compile(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Combines object files into a final output.
pub trait Linker {
    fn link(&self, objects: &[String], output: &Path) -> Result<()>;
}

// ============================================================================
// Command-backed implementations
// ============================================================================

/// Runs `<command...> <flags...> -c -o <output> <input>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    command: Vec<String>,
    flags: Vec<String>,
}

impl CommandCompiler {
    pub fn new(command: Vec<String>, flags: Vec<String>) -> Self {
        Self { command, flags }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        let compiler = &config.build.compiler;
        Self::new(compiler.command.clone(), compiler.flags.clone())
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.flags.iter().map(OsString::from).collect();
        args.extend([
            OsString::from("-c"),
            OsString::from("-o"),
            output.as_os_str().to_owned(),
            input.as_os_str().to_owned(),
        ]);
        args
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, input: &Path, output: &Path) -> Result<()> {
        exec(None, &self.command, &self.args(input, output), &COMPILER_FILTER)?;
        Ok(())
    }
}

/// Runs `<command...> -o <output> <objects...> <flags...>`.
///
/// Flags go last so libraries (`-lm`) follow the objects that need them.
#[derive(Debug, Clone)]
pub struct CommandLinker {
    command: Vec<String>,
    flags: Vec<String>,
}

impl CommandLinker {
    pub fn new(command: Vec<String>, flags: Vec<String>) -> Self {
        Self { command, flags }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        let linker = &config.build.linker;
        Self::new(linker.command.clone(), linker.flags.clone())
    }

    fn args(&self, objects: &[String], output: &Path) -> Vec<OsString> {
        let mut args = vec![OsString::from("-o"), output.as_os_str().to_owned()];
        args.extend(objects.iter().map(OsString::from));
        args.extend(self.flags.iter().map(OsString::from));
        args
    }
}

impl Linker for CommandLinker {
    fn link(&self, objects: &[String], output: &Path) -> Result<()> {
        exec(None, &self.command, &self.args(objects, output), &COMPILER_FILTER)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

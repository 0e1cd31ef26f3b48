//! Build orchestration.
//!
//! Ties configuration, the compile pipeline and the external tools together.
//!
//! # Architecture
//!
//! ```text
//! build_project()
//!     │
//!     ├── clean_output()          (when `build.clean` is set)
//!     │
//!     ├── compile_files_in_dir() ──► one object per source file
//!     │
//!     └── link()                  (when `build.linker.enable` is set)
//! ```

use crate::{
    compiler::{CommandCompiler, CommandLinker},
    config::ProjectConfig,
    error::BuildError,
    log,
    logger::ProgressBar,
    pipeline::{ArtifactList, compile_files_in_dir, link, plan_artifact},
    walker::source_files,
};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Compile the whole source tree and optionally link the result.
///
/// Returns the produced object files in walk order.
pub fn build_project(config: &ProjectConfig) -> Result<ArtifactList> {
    let source = path_str(&config.build.source)?;
    let output = path_str(&config.build.output)?;

    if config.build.clean {
        clean_output(config)?;
    }

    let total = source_files(&config.build.source).count();
    if total == 0 {
        log!("warn"; "no source files in `{}`", source);
    }

    let compiler = CommandCompiler::from_config(config);
    let progress = ProgressBar::new("compile", total);
    let result = compile_files_in_dir(source, output, &compiler, &mut |_| progress.inc());
    progress.finish();
    let artifacts = result?;

    log!("build"; "compiled {} files into `{}`", artifacts.len(), output);

    if config.link_enabled() {
        let target = config.target_path();
        link(&artifacts, &target, &CommandLinker::from_config(config))?;
        log!("link"; "{}", target.display());
    }

    Ok(artifacts)
}

/// Pair every source file with the object it would produce, without compiling.
pub fn list_sources(config: &ProjectConfig) -> Result<Vec<(PathBuf, String)>> {
    let source = &config.build.source;
    let output = path_str(&config.build.output)?;

    let mut plans = Vec::new();
    for path in source_files(source) {
        let relative = path
            .strip_prefix(source)
            .with_context(|| format!("`{}` is outside the source tree", path.display()))?;
        let plan = plan_artifact(output, path_str(relative)?)?;
        plans.push((path, plan.output));
    }
    plans.sort();

    Ok(plans)
}

/// Remove the build root. A missing build root is not an error.
///
/// Refuses to remove a build root that contains the source tree.
pub fn clean_output(config: &ProjectConfig) -> Result<()> {
    let output = &config.build.output;
    if !output.exists() {
        return Ok(());
    }
    if config.build.source.starts_with(output) {
        bail!(
            "Refusing to remove build directory `{}`: it contains the source tree `{}`",
            output.display(),
            config.build.source.display()
        );
    }

    fs::remove_dir_all(output)
        .with_context(|| format!("Failed to remove build directory `{}`", output.display()))?;
    log!("clean"; "removed `{}`", output.display());

    Ok(())
}

fn path_str(path: &Path) -> Result<&str, BuildError> {
    path.to_str()
        .ok_or_else(|| BuildError::InvalidPath(path.display().to_string()))
}

// ============================================================================
// Tests
// ============================================================================

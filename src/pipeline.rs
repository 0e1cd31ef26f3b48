//! Recursive compilation of a source tree into a mirrored object tree.
//!
//! # Layout
//!
//! ```text
//! src/a.c          ──►  build/a.o
//! src/sub/b.c      ──►  build/sub/b.o
//! src/.git/x.c          (hidden, skipped)
//! ```
//!
//! # Flow
//!
//! ```text
//! compile_files_in_dir(src)
//!     │
//!     ├── read_entries(dir)
//!     │
//!     ├── directory ──► recurse, append child artifacts
//!     │
//!     └── file ──► plan_artifact() ──► create_dir_all() ──► Compiler::compile()
//! ```
//!
//! The first failure aborts the whole walk.

use crate::{
    compiler::{Compiler, Linker, OBJECT_SUFFIX},
    error::BuildError,
    utils::{
        array::GrowArray,
        path::{MAX_PATH_LEN, PathInfo, join_paths, join_strs},
    },
    walker::{DirectoryEntry, read_entries},
};
use std::{fs, path::Path};

/// Every object file produced by one build, in walk order.
pub type ArtifactList = GrowArray<String>;

/// Output location for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    /// Directory that must exist before compiling
    pub out_dir: String,
    /// Object file path
    pub output: String,
}

/// Map a source path (relative to the source root) to its object file.
///
/// `sub/b.c` under build root `out` becomes `out/sub/b.o`.
pub fn plan_artifact(build_root: &str, relative: &str) -> Result<ArtifactPlan, BuildError> {
    let info = PathInfo::parse(relative)?;

    let out_dir = join_paths(&[build_root, info.dirname.as_str()]);
    let object = join_strs(&[info.filename.as_str(), OBJECT_SUFFIX], "");
    let output = join_paths(&[out_dir.as_str(), object.as_str()]);

    if output.len() > MAX_PATH_LEN {
        return Err(BuildError::OutputPathTooLong(output));
    }

    Ok(ArtifactPlan { out_dir, output })
}

/// Compile every non-hidden file below `source_dir` into `build_root`.
///
/// `on_compiled` is called with each object path right after it is produced.
pub fn compile_files_in_dir(
    source_dir: &str,
    build_root: &str,
    compiler: &dyn Compiler,
    on_compiled: &mut dyn FnMut(&str),
) -> Result<ArtifactList, BuildError> {
    compile_dir(source_dir, "", build_root, compiler, on_compiled)
}

fn compile_dir(
    dir: &str,
    relative_dir: &str,
    build_root: &str,
    compiler: &dyn Compiler,
    on_compiled: &mut dyn FnMut(&str),
) -> Result<ArtifactList, BuildError> {
    let mut artifacts = ArtifactList::new();

    for entry in read_entries(dir)? {
        let relative = join_paths(&[relative_dir, entry.name.as_str()]);

        if entry.is_directory {
            let child = compile_dir(&entry.full_path, &relative, build_root, compiler, on_compiled)?;
            artifacts.append(&child);
        } else {
            let output = compile_entry(&entry, &relative, build_root, compiler)?;
            on_compiled(&output);
            artifacts.push_back(output);
        }
    }

    Ok(artifacts)
}

fn compile_entry(
    entry: &DirectoryEntry,
    relative: &str,
    build_root: &str,
    compiler: &dyn Compiler,
) -> Result<String, BuildError> {
    let plan = plan_artifact(build_root, relative)?;

    fs::create_dir_all(&plan.out_dir).map_err(|source| BuildError::Io {
        path: plan.out_dir.clone(),
        source,
    })?;

    compiler
        .compile(Path::new(&entry.full_path), Path::new(&plan.output))
        .map_err(|err| BuildError::CompileFailed {
            input: entry.full_path.clone(),
            reason: format!("{err:#}"),
        })?;

    Ok(plan.output)
}

/// Combine all artifacts into `output` with the given linker.
///
/// The parent directory of `output` is created if missing.
pub fn link(artifacts: &ArtifactList, output: &Path, linker: &dyn Linker) -> Result<(), BuildError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    linker
        .link(artifacts.as_slice(), output)
        .map_err(|err| BuildError::LinkFailed {
            output: output.display().to_string(),
            reason: format!("{err:#}"),
        })
}

// ============================================================================
// Tests
// ============================================================================

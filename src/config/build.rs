//! `[build]` section configuration.
//!
//! Source and output locations plus the external tools the build drives.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in treebuild.toml.
///
/// # Example
/// ```toml
/// [build]
/// source = "src"       # Source tree
/// output = "build"     # Object tree mirrors the source tree here
///
/// [build.compiler]
/// command = ["cc"]
/// flags = ["-Wall", "-O2"]
///
/// [build.linker]
/// enable = true
/// flags = ["-lm"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Source tree to compile.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Build root; receives one object file per source file.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Link output, relative to `output`.
    #[serde(default = "defaults::build::target")]
    #[educe(Default = defaults::build::target())]
    pub target: PathBuf,

    /// Remove the build root before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub linker: LinkerConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.compiler]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Compiler command and leading arguments
    #[serde(default = "defaults::build::compiler::command")]
    #[educe(Default = defaults::build::compiler::command())]
    pub command: Vec<String>,

    /// Extra flags passed before `-c`
    #[serde(default)]
    pub flags: Vec<String>,
}

/// `[build.linker]` section
///
/// Linking is off unless enabled here or with `build --link`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LinkerConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    /// Linker command and leading arguments
    #[serde(default = "defaults::build::linker::command")]
    #[educe(Default = defaults::build::linker::command())]
    pub command: Vec<String>,

    /// Extra flags placed after the object files
    #[serde(default)]
    pub flags: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::ProjectConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: ProjectConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.source, PathBuf::from("src"));
        assert_eq!(config.build.output, PathBuf::from("build"));
        assert_eq!(config.build.target, PathBuf::from("a.out"));
        assert!(!config.build.clean);
        assert_eq!(config.build.compiler.command, vec!["cc"]);
        assert!(config.build.compiler.flags.is_empty());
        assert!(!config.build.linker.enable);
    }

    #[test]
    fn test_compiler_config() {
        let config = r#"
            [build.compiler]
            command = ["ccache", "clang"]
            flags = ["-Wall", "-O2"]
        "#;
        let config: ProjectConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.compiler.command, vec!["ccache", "clang"]);
        assert_eq!(config.build.compiler.flags, vec!["-Wall", "-O2"]);
    }

    #[test]
    fn test_linker_config_partial() {
        let config = r#"
            [build.linker]
            enable = true
            flags = ["-lm"]
        "#;
        let config: ProjectConfig = toml::from_str(config).unwrap();

        assert!(config.build.linker.enable);
        assert_eq!(config.build.linker.command, vec!["cc"]);
        assert_eq!(config.build.linker.flags, vec!["-lm"]);
    }

    #[test]
    fn test_unknown_build_field_rejected() {
        let config = r#"
            [build]
            sources = "src"
        "#;
        assert!(toml::from_str::<ProjectConfig>(config).is_err());

        let config = r#"
            [build.compiler]
            cflags = ["-O2"]
        "#;
        assert!(toml::from_str::<ProjectConfig>(config).is_err());
    }
}

//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "src".into()
    }

    pub fn output() -> PathBuf {
        "build".into()
    }

    pub fn target() -> PathBuf {
        "a.out".into()
    }

    pub mod compiler {
        pub fn command() -> Vec<String> {
            vec!["cc".into()]
        }
    }

    pub mod linker {
        pub fn command() -> Vec<String> {
            vec!["cc".into()]
        }
    }
}

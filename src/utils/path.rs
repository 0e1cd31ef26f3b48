//! String-level path manipulation.
//!
//! Paths are plain `/`-separated strings here. Nothing touches the file
//! system and nothing is bounded in length.
//!
//! # Decomposition
//!
//! ```text
//! /src/sub/file.old.c
//! └──┬───┘ └──┬───┘ └ extension  = "c"
//!    │        └───── filename   = "file.old"
//!    │      └──────┘ basename   = "file.old.c"
//!    └────────────── dirname    = "/src/sub"
//! ```

use super::buffer::StringBuilder;
use crate::error::BuildError;

pub const DIRECTORY_SEPARATOR: u8 = b'/';
pub const EXTENSION_SEPARATOR: u8 = b'.';

/// Longest path (in bytes) the walker and pipeline accept.
///
/// Matches `PATH_MAX` on Linux.
pub const MAX_PATH_LEN: usize = 4096;

const SEPARATOR_STR: &str = "/";

// ============================================================================
// Decomposition
// ============================================================================

/// The four components of a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    /// Everything before the last `/` (empty if there is none)
    pub dirname: String,
    /// Everything after the last `/`
    #[allow(unused)]
    pub basename: String,
    /// Basename without the extension
    pub filename: String,
    /// Text after the last `.` of the basename, without the dot
    #[allow(unused)]
    pub extension: String,
}

impl PathInfo {
    /// Split `path` into dirname, basename, filename and extension.
    ///
    /// Scans once from the end. A `.` only counts as the extension separator
    /// while the scan is still inside the basename.
    ///
    /// # Errors
    /// [`BuildError::InvalidPath`] for an empty string.
    pub fn parse(path: &str) -> Result<Self, BuildError> {
        if path.is_empty() {
            return Err(BuildError::InvalidPath(path.to_owned()));
        }

        let mut dirname = StringBuilder::new();
        let mut basename = StringBuilder::new();
        let mut filename = StringBuilder::new();
        let mut extension = StringBuilder::new();

        let mut found_extension = false;
        let mut found_directory = false;

        for &byte in path.as_bytes().iter().rev() {
            if found_directory {
                dirname.append_byte(byte);
                continue;
            }

            match byte {
                DIRECTORY_SEPARATOR => found_directory = true,
                EXTENSION_SEPARATOR if !found_extension => {
                    found_extension = true;
                    basename.append_byte(byte);
                }
                _ => {
                    basename.append_byte(byte);
                    if found_extension {
                        filename.append_byte(byte);
                    } else {
                        extension.append_byte(byte);
                    }
                }
            }
        }

        let basename = basename.build_reversed();
        let (filename, extension) = if found_extension {
            (filename.build_reversed(), extension.build_reversed())
        } else {
            (basename.clone(), String::new())
        };

        Ok(Self {
            dirname: dirname.build_reversed(),
            basename,
            filename,
            extension,
        })
    }
}

// ============================================================================
// Joining
// ============================================================================

/// Join path segments into one normalized path.
///
/// - one trailing `/` per segment is dropped
/// - a `/` is inserted only before a non-empty segment that does not
///   already start with one, and only after some earlier non-empty segment
/// - empty segments contribute nothing
///
/// When every non-empty segment is exactly `/` the result is `/`.
pub fn join_paths<S: AsRef<str>>(segments: &[S]) -> String {
    let mut builder = StringBuilder::new();
    let mut seen_segment = false;
    let mut only_separators = true;

    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if segment != SEPARATOR_STR {
            only_separators = false;
        }

        if seen_segment && !segment.starts_with(SEPARATOR_STR) {
            builder.append_byte(DIRECTORY_SEPARATOR);
        }

        let trimmed = segment.strip_suffix(SEPARATOR_STR).unwrap_or(segment);
        builder.append(trimmed);
        seen_segment = true;
    }

    if seen_segment && only_separators {
        builder.clear();
        builder.append_byte(DIRECTORY_SEPARATOR);
    }

    builder.build()
}

/// Concatenate strings, placing `sep` only between successive non-empty ones.
pub fn join_strs<S: AsRef<str>>(strs: &[S], sep: &str) -> String {
    let mut builder = StringBuilder::new();
    let mut first = true;

    for s in strs {
        let s = s.as_ref();
        if s.is_empty() {
            continue;
        }
        if !first {
            builder.append(sep);
        }
        builder.append(s);
        first = false;
    }

    builder.build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> PathInfo {
        PathInfo::parse(path).unwrap()
    }

    // ------------------------------------------------------------------------
    // PathInfo::parse tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_full_path() {
        let info = parse("/saske/narutos/sakuras/file.old.zip");
        assert_eq!(info.extension, "zip");
        assert_eq!(info.basename, "file.old.zip");
        assert_eq!(info.filename, "file.old");
        assert_eq!(info.dirname, "/saske/narutos/sakuras");
    }

    #[test]
    fn test_parse_no_directory() {
        let info = parse("file.old.zip");
        assert_eq!(info.extension, "zip");
        assert_eq!(info.basename, "file.old.zip");
        assert_eq!(info.filename, "file.old");
        assert_eq!(info.dirname, "");
    }

    #[test]
    fn test_parse_no_extension() {
        let info = parse("file");
        assert_eq!(info.extension, "");
        assert_eq!(info.basename, "file");
        assert_eq!(info.filename, "file");
        assert_eq!(info.dirname, "");
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        let err = PathInfo::parse("").unwrap_err();
        assert!(matches!(err, BuildError::InvalidPath(_)));
    }

    #[test]
    fn test_parse_dot_in_directory_only() {
        // The dot belongs to a directory, not to the file
        let info = parse("src/v1.2/Makefile");
        assert_eq!(info.dirname, "src/v1.2");
        assert_eq!(info.basename, "Makefile");
        assert_eq!(info.filename, "Makefile");
        assert_eq!(info.extension, "");
    }

    #[test]
    fn test_parse_root_file() {
        let info = parse("/main.c");
        assert_eq!(info.dirname, "");
        assert_eq!(info.basename, "main.c");
        assert_eq!(info.filename, "main");
        assert_eq!(info.extension, "c");
    }

    #[test]
    fn test_parse_leading_dot() {
        let info = parse("home/.bashrc");
        assert_eq!(info.dirname, "home");
        assert_eq!(info.basename, ".bashrc");
        assert_eq!(info.filename, "");
        assert_eq!(info.extension, "bashrc");
    }

    #[test]
    fn test_parse_trailing_separator() {
        let info = parse("build/");
        assert_eq!(info.dirname, "build");
        assert_eq!(info.basename, "");
        assert_eq!(info.filename, "");
        assert_eq!(info.extension, "");
    }

    #[test]
    fn test_parse_unicode() {
        let info = parse("código/ação.c");
        assert_eq!(info.dirname, "código");
        assert_eq!(info.basename, "ação.c");
        assert_eq!(info.filename, "ação");
        assert_eq!(info.extension, "c");
    }

    #[test]
    fn test_parse_recomposes() {
        let paths = [
            "/a/b.c",
            "src/sub/deeper/file.old.zip",
            "./x.y",
            "../lib/util.h",
            "a/b/c/d/e/f.o",
        ];

        for path in paths {
            let info = parse(path);
            assert_eq!(format!("{}/{}", info.dirname, info.basename), path);
            assert_eq!(format!("{}.{}", info.filename, info.extension), info.basename);
        }
    }

    // ------------------------------------------------------------------------
    // join_paths tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_join_paths_mixed_separators() {
        let joined = join_paths(&["/saske/", "naruto/", "", "/fernando", "maria/"]);
        assert_eq!(joined, "/saske/naruto/fernando/maria");

        let joined = join_paths(&["/a/", "b/", "", "/c", "d/"]);
        assert_eq!(joined, "/a/b/c/d");
    }

    #[test]
    fn test_join_paths_only_separators() {
        assert_eq!(join_paths(&["/"]), "/");
        assert_eq!(join_paths(&["/", "/"]), "/");
        assert_eq!(join_paths(&["/", "", "/"]), "/");
    }

    #[test]
    fn test_join_paths_empty() {
        assert_eq!(join_paths(&[""]), "");
        assert_eq!(join_paths(&["", ""]), "");
        assert_eq!(join_paths::<&str>(&[]), "");
    }

    #[test]
    fn test_join_paths_root() {
        assert_eq!(join_paths(&["/", "dir"]), "/dir");
        assert_eq!(join_paths(&["/", "dir", "/", "dasl"]), "/dir/dasl");
    }

    #[test]
    fn test_join_paths_relative() {
        assert_eq!(join_paths(&["../", "file"]), "../file");
        assert_eq!(join_paths(&["../", "/file/somemore/"]), "../file/somemore");
    }

    #[test]
    fn test_join_paths_single_trailing() {
        assert_eq!(join_paths(&["/file/"]), "/file");
        assert_eq!(join_paths(&["file/"]), "file");
    }

    #[test]
    fn test_join_paths_leading_empty_stays_relative() {
        assert_eq!(join_paths(&["", "sub", "b.o"]), "sub/b.o");
        assert_eq!(join_paths(&["out", ""]), "out");
    }

    #[test]
    fn test_join_paths_owned_segments() {
        let segments = vec![String::from("out"), String::from("sub")];
        assert_eq!(join_paths(&segments), "out/sub");
    }

    // ------------------------------------------------------------------------
    // join_strs tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_join_strs_no_separator() {
        assert_eq!(join_strs(&["abc", "def", "ghi"], ""), "abcdefghi");
        assert_eq!(
            join_strs(&["abc", "def", "ghi\n", "what\tever"], ""),
            "abcdefghi\nwhat\tever"
        );
        assert_eq!(
            join_strs(&["", "def", "ghi\n", "what\tever"], ""),
            "defghi\nwhat\tever"
        );
    }

    #[test]
    fn test_join_strs_all_empty() {
        assert_eq!(join_strs(&["", "", ""], ""), "");
        assert_eq!(join_strs(&[""], ", "), "");
    }

    #[test]
    fn test_join_strs_separator_between_non_empty() {
        assert_eq!(join_strs(&["a", "b", "c"], ", "), "a, b, c");
        assert_eq!(join_strs(&["", "a", "", "b", ""], "-"), "a-b");
    }
}

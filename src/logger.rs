//! Terminal logging with colored prefixes and a build progress bar.
//!
//! Everything here writes to stderr. Stdout carries only command output
//! (the artifact list, the `list` table) so it can be redirected.
//!
//! ```ignore
//! log!("build"; "compiling {} files", count);
//!
//! let progress = ProgressBar::new("compile", total);
//! progress.inc();
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    cell::Cell,
    io::{IsTerminal, Write, stderr},
    sync::OnceLock,
};

static COLUMNS: OnceLock<usize> = OnceLock::new();

/// `[` + `]` + the space after a module prefix.
const PREFIX_DECORATION: usize = 3;
/// ` [` + `] ` around the bar, before the `done/total` counter.
const BAR_DECORATION: usize = 4;
const BAR_MIN: usize = 10;
const BAR_MAX: usize = 40;

/// Screen columns taken by `[module] `.
#[inline]
const fn prefix_width(module_len: usize) -> usize {
    module_len + PREFIX_DECORATION
}

/// Terminal width, queried once. 120 when it cannot be determined.
fn terminal_columns() -> usize {
    *COLUMNS.get_or_init(|| size().map_or(120, |(cols, _)| cols as usize))
}

/// `log!("compile"; "{} files", n)` prints `[compile] 3 files`.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print `message` under a colored `[module]` prefix.
///
/// Continuation lines are printed without the prefix. Every line is cut at
/// the terminal width.
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    if stderr.is_terminal() {
        execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    }
    write_log(&mut stderr, module, message, terminal_columns());
    stderr.flush().ok();
}

fn write_log(out: &mut impl Write, module: &str, message: &str, width: usize) {
    let prefix = colorize_prefix(module);
    let max_msg_len = width.saturating_sub(prefix_width(module.len()));

    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();
    writeln!(out, "{prefix} {}", truncate_str(first, max_msg_len)).ok();
    for line in lines {
        writeln!(out, "{}", truncate_str(line, width)).ok();
    }
}

#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "link" => prefix.bright_blue().bold(),
        "clean" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate to at most `max_len` bytes on a UTF-8 boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    let end = (0..=max_len.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Single-line progress bar, redrawn in place.
///
/// Builds are single-threaded, so the counter is a plain `Cell`. When stderr
/// is not a terminal nothing is drawn.
pub struct ProgressBar {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: Cell<usize>,
    enabled: bool,
}

impl ProgressBar {
    pub fn new(module: &str, total: usize) -> Self {
        Self {
            prefix: colorize_prefix(module),
            prefix_len: prefix_width(module.len()),
            total,
            current: Cell::new(0),
            enabled: stderr().is_terminal(),
        }
    }

    pub fn inc(&self) {
        let current = self.current.get() + 1;
        self.current.set(current);
        if self.enabled {
            self.display(current);
        }
    }

    fn display(&self, current: usize) {
        let width = terminal_columns();
        let (bar, count) = render_bar(current, self.total, width, self.prefix_len);

        let mut stderr = stderr().lock();
        execute!(stderr, Clear(ClearType::CurrentLine)).ok();
        write!(stderr, "\r{} [{}] {}", self.prefix, bar, count).ok();
        stderr.flush().ok();
    }

    /// Clear the bar so the next log line starts on a clean row.
    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let mut stderr = stderr().lock();
        execute!(stderr, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
        stderr.flush().ok();
    }
}

/// Render the bar body and the `current/total` counter for a given width.
fn render_bar(current: usize, total: usize, width: usize, prefix_len: usize) -> (String, String) {
    let count = format!("{current}/{total}");
    let overhead = prefix_len + BAR_DECORATION + count.len();
    let bar_width = width.saturating_sub(overhead).clamp(BAR_MIN, BAR_MAX);

    let filled = if total > 0 {
        (current.min(total) * bar_width) / total
    } else {
        0
    };
    let empty = bar_width - filled;

    ("█".repeat(filled) + &"░".repeat(empty), count)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_width() {
        // "compile" -> "[compile] " = 7 + 2 + 1 = 10
        assert_eq!(prefix_width(7), 10);
        assert_eq!(prefix_width(0), 3);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "你好" is 6 bytes; byte 4 is mid-character
        assert_eq!(truncate_str("你好", 4), "你");
        assert_eq!(truncate_str("a你b", 3), "a");
    }

    #[test]
    fn test_render_bar_half() {
        let (bar, count) = render_bar(5, 10, 200, prefix_width(7));
        assert_eq!(count, "5/10");
        assert_eq!(bar.chars().count(), BAR_MAX);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), BAR_MAX / 2);
    }

    #[test]
    fn test_render_bar_narrow_terminal() {
        let (bar, _) = render_bar(1, 1, 5, prefix_width(7));
        assert_eq!(bar.chars().count(), BAR_MIN);
        assert!(bar.chars().all(|c| c == '█'));
    }

    #[test]
    fn test_render_bar_empty_total() {
        let (bar, count) = render_bar(0, 0, 80, 3);
        assert_eq!(count, "0/0");
        assert!(bar.chars().all(|c| c == '░'));
    }

    #[test]
    fn test_progress_bar_counts() {
        let progress = ProgressBar::new("compile", 3);
        progress.inc();
        progress.inc();
        assert_eq!(progress.current.get(), 2);
        progress.finish();
    }

    #[test]
    fn test_write_log_prefixes_first_line_only() {
        let mut out = Vec::new();
        write_log(&mut out, "error", "could not compile `a.c`\nexpected ';'", 120);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[error]"));
        assert!(lines[0].ends_with("could not compile `a.c`"));
        assert_eq!(lines[1], "expected ';'");
    }

    #[test]
    fn test_write_log_truncates_to_width() {
        let mut out = Vec::new();
        write_log(&mut out, "build", "0123456789abcdef", 13);

        // "[build] " takes 8 of the 13 columns
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_end().ends_with(" 01234"));
    }
}

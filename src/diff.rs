//! Diff rendering for previewing a dry run.

use similar::{ChangeTag, TextDiff};
use std::fmt::{self, Write};
use std::path::Path;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Generates a unified diff between two strings.
pub fn unified_diff(original: &str, modified: &str, path: &Path) -> String {
    render(original, modified, path, false)
}

/// Generates a diff with ANSI colors for terminal display.
pub fn colorized_diff(original: &str, modified: &str, path: &Path) -> String {
    render(original, modified, path, true)
}

fn render(original: &str, modified: &str, path: &Path, color: bool) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = write_diff(&mut output, original, modified, path, color);
    output
}

fn write_diff(
    out: &mut String,
    original: &str,
    modified: &str,
    path: &Path,
    color: bool,
) -> fmt::Result {
    let diff = TextDiff::from_lines(original, modified);
    let (header, reset) = if color { (CYAN, RESET) } else { ("", "") };

    writeln!(out, "{header}--- a/{}{reset}", path.display())?;
    writeln!(out, "{header}+++ b/{}{reset}", path.display())?;

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, paint) = match change.tag() {
                    ChangeTag::Delete => ("-", RED),
                    ChangeTag::Insert => ("+", GREEN),
                    ChangeTag::Equal => (" ", ""),
                };
                if color && !paint.is_empty() {
                    write!(out, "{paint}{sign}{}{RESET}", change.value())?;
                } else {
                    write!(out, "{sign}{}", change.value())?;
                }
                if change.missing_newline() {
                    writeln!(out)?;
                }
            }
        }
    }
    Ok(())
}

/// Line counts across changed files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    /// Creates a summary from original and modified content.
    pub fn from_diff(original: &str, modified: &str) -> Self {
        let diff = TextDiff::from_lines(original, modified);
        let mut summary = Self::default();

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.insertions += 1,
                ChangeTag::Delete => summary.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
        if summary.insertions > 0 || summary.deletions > 0 {
            summary.files_changed = 1;
        }
        summary
    }

    pub fn merge(&mut self, other: &DiffSummary) {
        self.files_changed += other.files_changed;
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} insertions(+), {} deletions(-)",
            self.files_changed, self.insertions, self.deletions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_diff_marks_changed_line() {
        let diff = unified_diff(
            "<div>\n  text-yellow-400\n</div>\n",
            "<div>\n  text-cyan-400\n</div>\n",
            Path::new("app/page.tsx"),
        );
        assert!(diff.starts_with("--- a/app/page.tsx\n+++ b/app/page.tsx\n"));
        assert!(diff.contains("-  text-yellow-400\n"));
        assert!(diff.contains("+  text-cyan-400\n"));
        assert!(diff.contains(" <div>\n"));
    }

    #[test]
    fn test_missing_trailing_newline_is_terminated() {
        let diff = unified_diff("yellow", "cyan", Path::new("a.css"));
        assert!(diff.ends_with("-yellow\n+cyan\n"));
    }

    #[test]
    fn test_colorized_diff_uses_ansi() {
        let diff = colorized_diff("yellow\n", "cyan\n", Path::new("a.css"));
        assert!(diff.contains(&format!("{RED}-yellow\n{RESET}")));
        assert!(diff.contains(&format!("{GREEN}+cyan\n{RESET}")));
    }

    #[test]
    fn test_summary_counts_lines() {
        let mut total = DiffSummary::from_diff("a\nb\n", "a\nc\n");
        assert_eq!(total.insertions, 1);
        assert_eq!(total.deletions, 1);

        total.merge(&DiffSummary::from_diff("x\n", "x\n"));
        assert_eq!(total.files_changed, 1);
        assert_eq!(
            total.to_string(),
            "1 file(s) changed, 1 insertions(+), 1 deletions(-)"
        );
    }
}

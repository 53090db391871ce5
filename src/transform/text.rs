//! Regex substitution with literal replacement text.

use super::Transform;
use crate::error::Result;
use regex::{NoExpand, Regex};
use std::path::Path;

/// A (pattern, replacement) pair.
///
/// Matching is case-sensitive and global: every non-overlapping match is
/// replaced. The replacement is inserted verbatim, so `$1` in it is not
/// treated as a capture reference.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    /// Compiles `pattern` eagerly; an invalid pattern is an error here,
    /// never during a run.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Creates a rule from a pre-compiled regex.
    pub fn from_regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    /// Creates a rule matching `needle` literally.
    pub fn literal(needle: &str, replacement: impl Into<String>) -> Self {
        let pattern =
            Regex::new(&regex::escape(needle)).expect("escaped literal is a valid regex");
        Self::from_regex(pattern, replacement)
    }

    /// Replaces every match in `text`.
    pub fn replace_all(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

impl Transform for SubstitutionRule {
    fn apply(&self, source: &str, _path: &Path) -> Result<String> {
        Ok(self.replace_all(source))
    }

    fn describe(&self) -> String {
        format!(
            "Replace pattern '{}' with '{}'",
            self.pattern.as_str(),
            self.replacement
        )
    }
}

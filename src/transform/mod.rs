//! Substitution rules and the ordered rule set applied to each file.

pub mod text;

pub use text::SubstitutionRule;

use crate::error::{Result, RewriteError};
use std::path::{Path, PathBuf};

/// A text transformation that can be applied to file contents.
pub trait Transform: Send + Sync {
    /// Applies the transformation to the given source text.
    fn apply(&self, source: &str, path: &Path) -> Result<String>;

    /// Returns a description of the transformation.
    fn describe(&self) -> String;
}

/// An ordered sequence of transforms threaded through one text buffer.
///
/// Rule `i + 1` sees the output of rule `i`; nothing is applied
/// simultaneously.
#[derive(Default)]
pub struct RuleSet {
    transforms: Vec<Box<dyn Transform>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a regex pattern replaced by literal text.
    pub fn replace_pattern(mut self, pattern: &str, replacement: &str) -> Result<Self> {
        self.transforms
            .push(Box::new(SubstitutionRule::new(pattern, replacement)?));
        Ok(self)
    }

    /// Adds a literal string replacement.
    pub fn replace_literal(mut self, needle: &str, replacement: &str) -> Self {
        self.transforms
            .push(Box::new(SubstitutionRule::literal(needle, replacement)));
        self
    }

    /// Adds an already-built rule.
    pub fn rule(mut self, rule: SubstitutionRule) -> Self {
        self.transforms.push(Box::new(rule));
        self
    }

    /// Applies all transformations to the source text in order.
    pub fn apply(&self, source: &str, path: &Path) -> Result<String> {
        let mut result = source.to_string();
        for transform in &self.transforms {
            result = transform.apply(&result, path)?;
        }
        Ok(result)
    }

    /// Returns descriptions of all transformations.
    pub fn describe(&self) -> Vec<String> {
        self.transforms.iter().map(|t| t.describe()).collect()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// The before/after text of one eligible file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
}

impl FileChange {
    /// Returns true if the content differs byte-for-byte.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Overwrites the file with the transformed text if it was modified.
    ///
    /// Returns whether a write happened.
    pub fn apply(&self) -> Result<bool> {
        if !self.is_modified() {
            return Ok(false);
        }
        std::fs::write(&self.path, &self.transformed)
            .map_err(|e| RewriteError::io(&self.path, e))?;
        Ok(true)
    }
}

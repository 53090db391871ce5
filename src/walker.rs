//! Depth-first traversal of a root directory, filtered by extension.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The set of file extensions eligible for rewriting.
///
/// Entries are kept with their leading dot (`.tsx`). Matching is exact and
/// case-sensitive against the last extension of the file name, so
/// `page.test.tsx` matches `.tsx` and `Page.TSX` does not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtensionAllowList {
    extensions: BTreeSet<String>,
}

impl ExtensionAllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension. A missing leading dot is added.
    pub fn extension(mut self, ext: impl AsRef<str>) -> Self {
        self.insert(ext);
        self
    }

    /// Adds several extensions.
    pub fn extensions(mut self, exts: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        for ext in exts {
            self.insert(ext);
        }
        self
    }

    fn insert(&mut self, ext: impl AsRef<str>) {
        let ext = ext.as_ref();
        if ext.starts_with('.') {
            self.extensions.insert(ext.to_string());
        } else {
            self.extensions.insert(format!(".{ext}"));
        }
    }

    /// Returns true if `path` has an extension in this list.
    pub fn allows(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(&format!(".{ext}")),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Walks a directory tree and yields eligible files.
///
/// The walk is pre-order depth-first: a directory's descendants are all
/// yielded before its next sibling. Siblings are visited in file-name
/// order.
#[derive(Debug, Default, Clone)]
pub struct TreeWalker {
    extensions: ExtensionAllowList,
    exclude_globs: Vec<String>,
    follow_symlinks: bool,
}

impl TreeWalker {
    pub fn new(extensions: ExtensionAllowList) -> Self {
        Self {
            extensions,
            ..Self::default()
        }
    }

    /// Skips files and whole directories whose root-relative path matches
    /// the glob.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Follows symbolic links. Walking into a directory that is its own
    /// ancestor is reported as an error.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn extensions(&self) -> &ExtensionAllowList {
        &self.extensions
    }

    /// Lazily walks `root`, yielding eligible files in traversal order.
    ///
    /// Traversal errors are yielded in place so callers can stop at the
    /// first one after handling everything before it.
    pub fn walk<'a>(
        &'a self,
        root: &'a Path,
    ) -> Result<impl Iterator<Item = Result<PathBuf>> + 'a> {
        let exclude_set = build_glob_set(&self.exclude_globs)?;
        let has_excludes = !self.exclude_globs.is_empty();

        let entries = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                !(has_excludes && entry.depth() > 0 && is_excluded(entry, root, &exclude_set))
            });

        Ok(entries.filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && self.extensions.allows(entry.path()) {
                    Some(Ok(entry.into_path()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        }))
    }

    /// Collects every eligible file under `root`.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        self.walk(root)?.collect()
    }
}

fn is_excluded(entry: &DirEntry, root: &Path, exclude_set: &GlobSet) -> bool {
    let rel_path = entry.path().strip_prefix(root).unwrap_or(entry.path());
    exclude_set.is_match(rel_path)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

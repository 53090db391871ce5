//! The tree rewriter: one linear sweep over every root.

use crate::config::{CompiledConfig, RewriteConfig};
use crate::diff::{DiffSummary, colorized_diff, unified_diff};
use crate::error::{Result, RewriteError};
use crate::transform::{FileChange, RuleSet};
use crate::walker::TreeWalker;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// A status line emitted while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A root did not exist and was skipped.
    DirectoryNotFound(PathBuf),
    /// A file was rewritten.
    Updated(PathBuf),
    /// A file would be rewritten (dry run).
    WouldUpdate(PathBuf),
    /// The run finished.
    Complete,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DirectoryNotFound(path) => {
                write!(f, "Directory not found: {}", path.display())
            }
            Diagnostic::Updated(path) => write!(f, "Updated: {}", path.display()),
            Diagnostic::WouldUpdate(path) => write!(f, "Would update: {}", path.display()),
            Diagnostic::Complete => write!(f, "Replacement complete."),
        }
    }
}

/// Receives diagnostics as soon as they happen.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Prints each diagnostic as a line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        println!("{diagnostic}");
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// What a completed run did.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Roots that did not exist.
    pub skipped_roots: Vec<PathBuf>,
    /// Eligible files read.
    pub files_visited: usize,
    /// Files whose content changed, in traversal order.
    pub updated: Vec<PathBuf>,
    /// Before/after text of changed files. Only kept in dry-run mode.
    pub changes: Vec<FileChange>,
    pub summary: DiffSummary,
}

impl RunReport {
    pub fn files_modified(&self) -> usize {
        self.updated.len()
    }

    /// Unified diff of every retained change.
    pub fn diff(&self) -> String {
        self.changes
            .iter()
            .map(|c| unified_diff(&c.original, &c.transformed, &c.path))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Colorized diff for terminal display.
    pub fn colorized_diff(&self) -> String {
        self.changes
            .iter()
            .map(|c| colorized_diff(&c.original, &c.transformed, &c.path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Applies a rule set to every eligible file under a set of roots.
pub struct TreeRewriter {
    roots: Vec<PathBuf>,
    walker: TreeWalker,
    rules: RuleSet,
    dry_run: bool,
}

impl TreeRewriter {
    pub fn new(roots: Vec<PathBuf>, walker: TreeWalker, rules: RuleSet) -> Self {
        Self {
            roots,
            walker,
            rules,
            dry_run: false,
        }
    }

    /// Builds a rewriter from a config, compiling every pattern up front.
    pub fn from_config(config: &RewriteConfig) -> Result<Self> {
        Ok(config.compile()?.into())
    }

    /// Computes changes without writing any file.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs the sweep.
    ///
    /// Roots are processed in order. A missing root is reported and
    /// skipped. Any other I/O failure stops the run immediately; files
    /// already rewritten stay rewritten and diagnostics already emitted
    /// stay emitted. `Replacement complete.` is only emitted on success.
    ///
    /// A file reachable from more than one root, or through a symlink, is
    /// visited once: paths are deduplicated by their canonical form.
    pub fn run(&self, sink: &mut dyn DiagnosticSink) -> Result<RunReport> {
        let extensions: Vec<&str> = self.walker.extensions().iter().collect();
        let _span = info_span!("rewrite", dry_run = self.dry_run, ?extensions).entered();
        if extensions.is_empty() {
            warn!("no extensions configured, nothing is eligible");
        }
        if self.rules.is_empty() {
            warn!("no substitution rules configured");
        }
        for rule in self.rules.describe() {
            debug!(%rule, "rule");
        }

        let mut report = RunReport::default();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for root in &self.roots {
            if !root.exists() {
                info!(root = %root.display(), "skipping missing root");
                sink.emit(Diagnostic::DirectoryNotFound(root.clone()));
                report.skipped_roots.push(root.clone());
                continue;
            }
            if !root.is_dir() {
                return Err(RewriteError::io(
                    root,
                    io::Error::new(io::ErrorKind::NotADirectory, "root is not a directory"),
                ));
            }

            info!(root = %root.display(), "sweeping root");
            for path in self.walker.walk(root)? {
                let path = path?;
                let canonical =
                    fs::canonicalize(&path).map_err(|e| RewriteError::io(&path, e))?;
                if !seen.insert(canonical) {
                    debug!(file = %path.display(), "already visited");
                    continue;
                }
                self.rewrite_file(&path, sink, &mut report)?;
            }
        }

        info!(
            visited = report.files_visited,
            updated = report.updated.len(),
            "sweep finished"
        );
        sink.emit(Diagnostic::Complete);
        Ok(report)
    }

    fn rewrite_file(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
        report: &mut RunReport,
    ) -> Result<()> {
        debug!(file = %path.display(), "visiting");
        report.files_visited += 1;

        let bytes = fs::read(path).map_err(|e| RewriteError::io(path, e))?;
        let original = String::from_utf8(bytes).map_err(|e| {
            RewriteError::io(
                path,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file is not valid UTF-8: {}", e.utf8_error()),
                ),
            )
        })?;
        let transformed = self.rules.apply(&original, path)?;
        let change = FileChange {
            path: path.to_path_buf(),
            original,
            transformed,
        };

        if !change.is_modified() {
            return Ok(());
        }

        report
            .summary
            .merge(&DiffSummary::from_diff(&change.original, &change.transformed));
        report.updated.push(change.path.clone());

        if self.dry_run {
            sink.emit(Diagnostic::WouldUpdate(change.path.clone()));
            report.changes.push(change);
        } else {
            change.apply()?;
            sink.emit(Diagnostic::Updated(change.path));
        }
        Ok(())
    }
}

impl From<CompiledConfig> for TreeRewriter {
    fn from(compiled: CompiledConfig) -> Self {
        Self::new(compiled.roots, compiled.walker, compiled.rules)
    }
}

/// Runs `config` once, writing diagnostics to `sink`.
pub fn run(config: &RewriteConfig, sink: &mut dyn DiagnosticSink) -> Result<RunReport> {
    TreeRewriter::from_config(config)?.run(sink)
}

//! # Tree Rewriter
//!
//! Sweeps directory trees and rewrites text files in place with an ordered
//! list of regex substitutions.
//!
//! A run:
//! - visits each root in order, skipping roots that do not exist
//! - walks every root depth-first and picks files by extension
//! - threads each file's text through every rule in order
//! - writes a file back only when its text changed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tree_rewriter::prelude::*;
//!
//! let config = RewriteConfig {
//!     roots: vec!["./app".into()],
//!     extensions: vec![".tsx".into()],
//!     exclude: vec![],
//!     rules: vec![
//!         RuleSpec::literal("yellow-400", "cyan-400"),
//!         RuleSpec::pattern(r"yellow-5\d\d", "cyan-500"),
//!     ],
//!     follow_symlinks: false,
//! };
//!
//! let report = tree_rewriter::run(&config, &mut StdoutSink)?;
//! println!("{}", report.summary);
//! # Ok::<(), tree_rewriter::error::RewriteError>(())
//! ```
//!
//! ## Dry Run
//!
//! ```rust,no_run
//! use tree_rewriter::prelude::*;
//!
//! let report = TreeRewriter::from_config(&RewriteConfig::yellow_to_cyan())?
//!     .dry_run(true)
//!     .run(&mut StdoutSink)?;
//!
//! println!("{}", report.diff());
//! # Ok::<(), tree_rewriter::error::RewriteError>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod rewriter;
pub mod transform;
pub mod walker;

pub use rewriter::run;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CompiledConfig, RewriteConfig, RuleSpec};
    pub use crate::diff::DiffSummary;
    pub use crate::error::{Result, RewriteError};
    pub use crate::rewriter::{Diagnostic, DiagnosticSink, RunReport, StdoutSink, TreeRewriter};
    pub use crate::transform::{FileChange, RuleSet, SubstitutionRule, Transform};
    pub use crate::walker::{ExtensionAllowList, TreeWalker};
}

pub use prelude::*;

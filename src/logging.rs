//! Developer tracing.
//!
//! The `Updated:` style lines are the tool's output and always go to
//! stdout. Tracing is separate: it goes to stderr, is filtered by
//! `RUST_LOG`, and defaults to `warn`.
//!
//! ```bash
//! RUST_LOG=tree_rewriter=debug rewrite-tree --dry-run
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `verbose` raises the default level to
/// `debug` when `RUST_LOG` is unset.
pub fn init(verbose: bool) {
    let default = if verbose { "tree_rewriter=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

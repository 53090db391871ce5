//! CLI for the tree rewriter.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tree_rewriter::prelude::*;

#[derive(Parser)]
#[command(name = "rewrite-tree")]
#[command(author, version, about = "Rewrite class names across source trees", long_about = None)]
struct Cli {
    /// YAML or JSON config file; defaults to the built-in yellow-to-cyan preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory to sweep (repeatable, replaces configured roots)
    #[arg(short, long = "root")]
    roots: Vec<PathBuf>,

    /// Eligible extension such as ".tsx" (repeatable, replaces configured extensions)
    #[arg(short, long = "ext")]
    extensions: Vec<String>,

    /// Substitution as PATTERN=REPLACEMENT (repeatable, replaces configured rules)
    #[arg(short = 'R', long = "rule", value_parser = parse_rule)]
    rules: Vec<RuleSpec>,

    /// Root-relative glob to skip (repeatable, added to configured excludes)
    #[arg(long)]
    exclude: Vec<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Report changes without writing files
    #[arg(long)]
    dry_run: bool,

    /// Print a colorized diff of the changes (implies --dry-run)
    #[arg(long)]
    diff: bool,

    /// Enable debug tracing on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_rule(s: &str) -> std::result::Result<RuleSpec, String> {
    RuleSpec::parse_assignment(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tree_rewriter::logging::init(cli.verbose);

    let config = build_config(&cli)?;
    let dry_run = cli.dry_run || cli.diff;

    let rewriter = TreeRewriter::from_config(&config)
        .context("Invalid rewrite configuration")?
        .dry_run(dry_run);
    let report = rewriter.run(&mut StdoutSink).context("Rewrite failed")?;

    if cli.diff && !report.changes.is_empty() {
        println!("{}", report.colorized_diff());
        println!("\n{}", report.summary);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<RewriteConfig> {
    let mut config = match &cli.config {
        Some(path) => RewriteConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RewriteConfig::yellow_to_cyan(),
    };

    if !cli.roots.is_empty() {
        config.roots = cli.roots.clone();
    }
    if !cli.extensions.is_empty() {
        config.extensions = cli.extensions.clone();
    }
    if !cli.rules.is_empty() {
        config.rules = cli.rules.clone();
    }
    config.exclude.extend(cli.exclude.iter().cloned());
    config.follow_symlinks |= cli.follow_symlinks;

    // Roots from a config file are relative to that file; roots from the
    // command line or the preset are relative to the working directory.
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let base = match &cli.config {
        Some(path) if cli.roots.is_empty() => path
            .parent()
            .map(|dir| cwd.join(dir))
            .unwrap_or_else(|| cwd.clone()),
        _ => cwd,
    };
    Ok(config.resolve_roots(&base))
}

//! CLI tests for the `rewrite-tree` binary.
//!
//! Spawns the binary inside a temporary working directory and checks its
//! stdout lines and exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn rewrite_tree(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rewrite-tree"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn rewrite-tree")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_no_arguments_reports_missing_roots_and_succeeds() {
    let temp = TempDir::new().unwrap();
    let cwd = fs::canonicalize(temp.path()).unwrap();

    let output = rewrite_tree(&cwd, &[]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            format!("Directory not found: {}", cwd.join("app").display()),
            format!("Directory not found: {}", cwd.join("components").display()),
            "Replacement complete.".to_string(),
        ]
    );
}

#[test]
fn test_no_arguments_rewrites_default_roots() {
    let temp = TempDir::new().unwrap();
    let cwd = fs::canonicalize(temp.path()).unwrap();
    fs::create_dir_all(cwd.join("app")).unwrap();
    fs::create_dir_all(cwd.join("components")).unwrap();
    fs::write(
        cwd.join("app/page.tsx"),
        "<p class=\"text-yellow-400 border-yellow-500\" />",
    )
    .unwrap();
    fs::write(cwd.join("components/input.tsx"), "<input />").unwrap();

    let output = rewrite_tree(&cwd, &[]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            format!("Updated: {}", cwd.join("app/page.tsx").display()),
            "Replacement complete.".to_string(),
        ]
    );
    assert_eq!(
        fs::read_to_string(cwd.join("app/page.tsx")).unwrap(),
        "<p class=\"text-cyan-400 border-cyan-500\" />"
    );
}

#[test]
fn test_io_failure_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let cwd = fs::canonicalize(temp.path()).unwrap();
    fs::write(cwd.join("page.tsx"), "text-yellow-400").unwrap();

    let output = rewrite_tree(&cwd, &["--root", "page.tsx"]);

    assert!(!output.status.success());
    assert!(
        !stdout_lines(&output)
            .iter()
            .any(|line| line == "Replacement complete.")
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Rewrite failed"));
    assert_eq!(
        fs::read_to_string(cwd.join("page.tsx")).unwrap(),
        "text-yellow-400"
    );
}

#[test]
fn test_config_roots_resolve_against_config_directory() {
    let temp = TempDir::new().unwrap();
    let cwd = fs::canonicalize(temp.path()).unwrap();
    fs::create_dir_all(cwd.join("sub/app")).unwrap();
    fs::write(cwd.join("sub/app/page.tsx"), "bg-yellow-400").unwrap();
    fs::write(
        cwd.join("sub/rewrite.yml"),
        "roots: [app]\nextensions: [\".tsx\"]\nrules:\n  - literal: yellow\n    replacement: cyan\n",
    )
    .unwrap();

    let output = rewrite_tree(&cwd, &["--config", "sub/rewrite.yml", "--dry-run"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            format!("Would update: {}", cwd.join("sub/app/page.tsx").display()),
            "Replacement complete.".to_string(),
        ]
    );
    assert_eq!(
        fs::read_to_string(cwd.join("sub/app/page.tsx")).unwrap(),
        "bg-yellow-400"
    );
}

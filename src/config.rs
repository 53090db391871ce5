//! Serializable run configuration.
//!
//! A run is fully described by a [`RewriteConfig`]: the roots to sweep, the
//! extension allow-list and the ordered substitution rules. Configs can be
//! loaded from YAML or JSON, or taken from the built-in
//! [`RewriteConfig::yellow_to_cyan`] preset.
//!
//! # Example YAML
//!
//! ```yaml
//! roots:
//!   - app
//!   - components
//! extensions: [".tsx", ".css"]
//! exclude:
//!   - "**/node_modules/**"
//! rules:
//!   - pattern: "yellow-(400|500)"
//!     replacement: "cyan-400"
//!   - literal: "text-amber"
//!     replacement: "text-cyan"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RewriteError};
use crate::transform::{RuleSet, SubstitutionRule};
use crate::walker::{ExtensionAllowList, TreeWalker};

/// Tailwind shades covered by the built-in preset.
pub const TAILWIND_SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Roots swept by the built-in preset, relative to the working directory.
pub const DEFAULT_ROOTS: [&str; 2] = ["app", "components"];

/// Extensions rewritten by the built-in preset.
pub const DEFAULT_EXTENSIONS: [&str; 5] = [".tsx", ".ts", ".jsx", ".js", ".css"];

/// A serializable substitution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// Replace matches of a regular expression.
    Pattern { pattern: String, replacement: String },

    /// Replace a literal string.
    Literal { literal: String, replacement: String },
}

impl RuleSpec {
    pub fn pattern(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        RuleSpec::Pattern {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    pub fn literal(literal: impl Into<String>, replacement: impl Into<String>) -> Self {
        RuleSpec::Literal {
            literal: literal.into(),
            replacement: replacement.into(),
        }
    }

    /// Parses `PATTERN=REPLACEMENT`, splitting on the last `=`.
    pub fn parse_assignment(s: &str) -> Result<Self> {
        match s.rsplit_once('=') {
            Some((pattern, replacement)) if !pattern.is_empty() => {
                Ok(Self::pattern(pattern, replacement))
            }
            _ => Err(RewriteError::InvalidConfig(format!(
                "rule '{s}' is not of the form PATTERN=REPLACEMENT"
            ))),
        }
    }

    /// Compiles this spec into a rule.
    pub fn compile(&self) -> Result<SubstitutionRule> {
        match self {
            RuleSpec::Pattern {
                pattern,
                replacement,
            } => SubstitutionRule::new(pattern, replacement.as_str()),
            RuleSpec::Literal {
                literal,
                replacement,
            } => Ok(SubstitutionRule::literal(literal, replacement.as_str())),
        }
    }
}

/// Everything a rewrite run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Directories to sweep, in order.
    pub roots: Vec<PathBuf>,

    /// Eligible file extensions, e.g. `[".tsx", ".css"]`.
    pub extensions: Vec<String>,

    /// Root-relative globs to skip.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Substitutions applied to each file, in order.
    pub rules: Vec<RuleSpec>,

    #[serde(default)]
    pub follow_symlinks: bool,
}

impl RewriteConfig {
    /// The rule set the tool ships with: every Tailwind `yellow-<shade>`
    /// token becomes `cyan-<shade>`.
    pub fn yellow_to_cyan() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
            rules: TAILWIND_SHADES
                .iter()
                .map(|shade| RuleSpec::literal(format!("yellow-{shade}"), format!("cyan-{shade}")))
                .collect(),
            follow_symlinks: false,
        }
    }

    /// Loads a config from a YAML or JSON file, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Err(RewriteError::InvalidConfig(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolves relative roots against `base`.
    pub fn resolve_roots(mut self, base: &Path) -> Self {
        self.roots = self
            .roots
            .into_iter()
            .map(|root| if root.is_absolute() { root } else { base.join(root) })
            .collect();
        self
    }

    /// Compiles every pattern and glob. Any invalid pattern fails here,
    /// before a single file is touched.
    pub fn compile(&self) -> Result<CompiledConfig> {
        let mut rules = RuleSet::new();
        for spec in &self.rules {
            rules = rules.rule(spec.compile()?);
        }

        let mut walker = TreeWalker::new(ExtensionAllowList::new().extensions(&self.extensions))
            .follow_symlinks(self.follow_symlinks);
        for pattern in &self.exclude {
            globset::Glob::new(pattern)?;
            walker = walker.exclude(pattern.as_str());
        }

        Ok(CompiledConfig {
            roots: self.roots.clone(),
            walker,
            rules,
        })
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::yellow_to_cyan()
    }
}

/// A validated config, ready to run.
pub struct CompiledConfig {
    pub roots: Vec<PathBuf>,
    pub walker: TreeWalker,
    pub rules: RuleSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_covers_all_shades() {
        let config = RewriteConfig::yellow_to_cyan();
        assert_eq!(config.rules.len(), TAILWIND_SHADES.len());
        assert_eq!(config.rules[4], RuleSpec::literal("yellow-400", "cyan-400"));
        assert_eq!(
            config.roots,
            vec![PathBuf::from("app"), PathBuf::from("components")]
        );
    }

    #[test]
    fn test_preset_rewrites_class_names() {
        let compiled = RewriteConfig::yellow_to_cyan().compile().unwrap();
        let out = compiled
            .rules
            .apply(
                r#"class="text-yellow-400 border-yellow-500 bg-yellow-950""#,
                Path::new("page.tsx"),
            )
            .unwrap();
        assert_eq!(out, r#"class="text-cyan-400 border-cyan-500 bg-cyan-950""#);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
roots:
  - /srv/site/app
extensions: [".tsx", "css"]
exclude:
  - "**/node_modules/**"
rules:
  - pattern: "yellow-(\\d+)"
    replacement: "cyan"
  - literal: "a.b"
    replacement: "c"
"#;
        let config = RewriteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("/srv/site/app")]);
        assert_eq!(config.exclude.len(), 1);
        assert!(!config.follow_symlinks);
        assert_eq!(config.rules[0], RuleSpec::pattern(r"yellow-(\d+)", "cyan"));
        assert_eq!(config.rules[1], RuleSpec::literal("a.b", "c"));

        let compiled = config.compile().unwrap();
        assert_eq!(compiled.rules.len(), 2);
        assert!(compiled.walker.extensions().allows(Path::new("x.css")));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "roots": ["app"],
            "extensions": [".tsx"],
            "rules": [{"pattern": "yellow", "replacement": "cyan"}],
            "follow_symlinks": true
        }"#;
        let config = RewriteConfig::from_json(json).unwrap();
        assert!(config.follow_symlinks);
        assert_eq!(config.rules, vec![RuleSpec::pattern("yellow", "cyan")]);
    }

    #[test]
    fn test_yaml_roundtrip_of_preset() {
        let config = RewriteConfig::yellow_to_cyan();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(RewriteConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_pattern_fails_at_compile() {
        let mut config = RewriteConfig::yellow_to_cyan();
        config.rules.push(RuleSpec::pattern("(yellow", "cyan"));
        assert!(matches!(config.compile(), Err(RewriteError::Regex(_))));
    }

    #[test]
    fn test_invalid_exclude_fails_at_compile() {
        let mut config = RewriteConfig::yellow_to_cyan();
        config.exclude.push("a[".into());
        assert!(matches!(config.compile(), Err(RewriteError::Glob(_))));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            RuleSpec::parse_assignment("yellow-400=cyan-400").unwrap(),
            RuleSpec::pattern("yellow-400", "cyan-400")
        );
        assert_eq!(
            RuleSpec::parse_assignment("a=b=c").unwrap(),
            RuleSpec::pattern("a=b", "c")
        );
        assert_eq!(
            RuleSpec::parse_assignment("yellow=").unwrap(),
            RuleSpec::pattern("yellow", "")
        );
        assert!(RuleSpec::parse_assignment("no-separator").is_err());
        assert!(RuleSpec::parse_assignment("=cyan").is_err());
    }

    #[test]
    fn test_resolve_roots() {
        let config = RewriteConfig::yellow_to_cyan().resolve_roots(Path::new("/site"));
        assert_eq!(
            config.roots,
            vec![PathBuf::from("/site/app"), PathBuf::from("/site/components")]
        );
    }

    #[test]
    fn test_unsupported_config_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            RewriteConfig::from_file(&path),
            Err(RewriteError::InvalidConfig(_))
        ));
    }
}

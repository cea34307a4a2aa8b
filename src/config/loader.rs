use crate::config::parser::parse_rule_file;
use crate::error::{ConfigError, Result};
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load every `*.toml` rule file in a directory into a rule set.
///
/// Files are loaded in sorted filename order, which is also the evaluation
/// order of the resulting rule set. Any malformed file fails the whole load;
/// a silently dropped rule would make its scheme look unrecognized.
pub fn load_rules_dir(dir: &Path) -> Result<RuleSet> {
	let entries = std::fs::read_dir(dir).map_err(|source| ConfigError::RulesDirError {
		path: dir.to_path_buf(),
		source,
	})?;

	let mut paths = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|source| ConfigError::RulesDirError {
			path: dir.to_path_buf(),
			source,
		})?;
		let path = entry.path();
		if path.extension().is_some_and(|ext| ext == "toml") {
			paths.push(path);
		}
	}
	paths.sort();

	let mut rules = Vec::with_capacity(paths.len());
	for path in &paths {
		let rule = parse_rule_file(path)?;
		debug!(rule = %rule.name(), path = %path.display(), "loaded rule");
		rules.push(rule);
	}

	RuleSet::new(rules)
}

/// Per-user rules directory under the platform config dir, if resolvable.
///
/// The CLI consults this directory when no explicit one is given.
pub fn user_rules_dir() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("linkpeel").join("rules"))
}

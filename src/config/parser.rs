use crate::config::types::{RuleDef, RuleSetDef};
use crate::error::{ConfigError, Result};
use crate::rules::{Rule, RuleSet};
use std::path::Path;

/// Parse a single rule file from the given path.
pub fn parse_rule_file(path: &Path) -> Result<Rule> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::RuleReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rule_str(&content, path)
}

/// Parse a single rule from a TOML document (useful for testing).
pub fn parse_rule_str(content: &str, path: &Path) -> Result<Rule> {
	let def: RuleDef = toml::from_str(content).map_err(|source| ConfigError::RuleParseError {
		path: path.to_path_buf(),
		source,
	})?;

	Rule::from_def(&def)
}

/// Parse a whole rule set from a TOML document with a `rules` list.
pub fn parse_rule_set_str(content: &str, path: &Path) -> Result<RuleSet> {
	let def: RuleSetDef = toml::from_str(content).map_err(|source| ConfigError::RuleParseError {
		path: path.to_path_buf(),
		source,
	})?;

	RuleSet::from_defs(&def)
}

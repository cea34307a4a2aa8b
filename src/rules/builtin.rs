use crate::config::types::RuleDef;
use crate::error::{ConfigError, Result};
use crate::rules::{Rule, RuleSet};
use std::path::PathBuf;
use std::sync::OnceLock;

/// The built-in rule catalog, embedded at compile time.
///
/// One entry per wrapping scheme, kept in sorted filename order to mirror
/// loading the `rules/` directory from disk.
const BUILTIN_RULES: &[(&str, &str)] = &[
	("azure_email.toml", include_str!("../../rules/azure_email.toml")),
	("barracuda.toml", include_str!("../../rules/barracuda.toml")),
	("esvalabs.toml", include_str!("../../rules/esvalabs.toml")),
	("fireeye.toml", include_str!("../../rules/fireeye.toml")),
	(
		"o365_safelinks.toml",
		include_str!("../../rules/o365_safelinks.toml"),
	),
	(
		"proofpoint_v1.toml",
		include_str!("../../rules/proofpoint_v1.toml"),
	),
	(
		"proofpoint_v2.toml",
		include_str!("../../rules/proofpoint_v2.toml"),
	),
	(
		"ses_awstrack.toml",
		include_str!("../../rules/ses_awstrack.toml"),
	),
	("sophos.toml", include_str!("../../rules/sophos.toml")),
	("trendmicro.toml", include_str!("../../rules/trendmicro.toml")),
	(
		"urldefense_v3.toml",
		include_str!("../../rules/urldefense_v3.toml"),
	),
	("whatsapp.toml", include_str!("../../rules/whatsapp.toml")),
];

/// The rule set built from the embedded catalog, constructed once.
pub fn builtin_rule_set() -> &'static RuleSet {
	static BUILTIN: OnceLock<RuleSet> = OnceLock::new();
	BUILTIN.get_or_init(|| build_builtin().expect("embedded rule files are valid"))
}

fn build_builtin() -> Result<RuleSet> {
	let mut rules = Vec::with_capacity(BUILTIN_RULES.len());
	for (file_name, content) in BUILTIN_RULES {
		let def: RuleDef =
			toml::from_str(content).map_err(|source| ConfigError::RuleParseError {
				path: PathBuf::from(*file_name),
				source,
			})?;
		rules.push(Rule::from_def(&def)?);
	}

	RuleSet::new(rules)
}

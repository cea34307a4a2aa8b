use crate::config::types::{FilterDef, OneOrMany, RuleDef, RuleSetDef};
use crate::error::{ConfigError, Result};
use crate::rules::extract::Extract;
use crate::rules::matcher::{Filter, Matcher};
use crate::rules::transform::Transform;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// One wrapping scheme end to end: recognize a URL, optionally rewrite it,
/// extract the wrapped destination, and decode it.
#[derive(Debug)]
pub struct Rule {
	name: String,
	filter: Filter,
	pre_extract: Vec<Transform>,
	extract: Extract,
	post_extract: Vec<Transform>,
}

impl Rule {
	/// Assemble a rule. The name must not be empty.
	pub fn new(
		name: String,
		filter: Filter,
		pre_extract: Vec<Transform>,
		extract: Extract,
		post_extract: Vec<Transform>,
	) -> Result<Self> {
		if name.is_empty() {
			return Err(ConfigError::EmptyRuleName);
		}

		Ok(Rule {
			name,
			filter,
			pre_extract,
			extract,
			post_extract,
		})
	}

	/// Build a rule from its definition data.
	pub fn from_def(def: &RuleDef) -> Result<Self> {
		let filter = filter_from_def(&def.filter)?;
		let extract = Extract::from_def(&def.extract)?;
		let pre_extract = def
			.pre_extract
			.iter()
			.map(Transform::from_def)
			.collect::<Result<Vec<_>>>()?;
		let post_extract = def
			.post_extract
			.iter()
			.map(Transform::from_def)
			.collect::<Result<Vec<_>>>()?;

		Rule::new(def.name.clone(), filter, pre_extract, extract, post_extract)
	}

	/// The rule's unique name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The rule's recognizer.
	pub fn filter(&self) -> &Filter {
		&self.filter
	}

	/// Recover the wrapped destination from a URL, or None if this rule
	/// does not apply.
	pub fn evaluate(&self, url: &str) -> Option<String> {
		let parsed = Url::parse(url).ok()?;
		self.evaluate_parsed(url, &parsed)
	}

	/// Fast path for callers that already parsed the URL.
	///
	/// Decode failures in a transform make this rule yield None so that
	/// evaluation can fall through to the next candidate.
	pub fn evaluate_parsed(&self, url: &str, parsed: &Url) -> Option<String> {
		if !self.filter.matches_parsed(parsed) {
			return None;
		}

		let extracted = if self.pre_extract.is_empty() {
			self.extract.extract_parsed(url, parsed)
		} else {
			// Pre-extract transforms rewrite the whole URL, so the parsed
			// structure is stale and must be re-derived.
			let mut rewritten = url.to_string();
			for transform in &self.pre_extract {
				rewritten = match transform.apply(&rewritten) {
					Ok(rewritten) => rewritten,
					Err(error) => {
						debug!(rule = %self.name, %error, "pre-extract transform failed");
						return None;
					}
				};
			}
			self.extract.extract(&rewritten)
		}?;

		let mut result = extracted;
		for transform in &self.post_extract {
			result = match transform.apply(&result) {
				Ok(result) => result,
				Err(error) => {
					debug!(rule = %self.name, %error, "post-extract transform failed");
					return None;
				}
			};
		}

		Some(result)
	}
}

fn filter_from_def(def: &FilterDef) -> Result<Filter> {
	let hostname = matchers_from_def(&def.hostname)?;
	let path = match def.path {
		Some(ref path) => matchers_from_def(path)?,
		None => Vec::new(),
	};

	Filter::new(hostname, path)
}

fn matchers_from_def(def: &OneOrMany) -> Result<Vec<Matcher>> {
	match def {
		OneOrMany::One(raw) => Ok(vec![Matcher::new(raw)?]),
		OneOrMany::Many(raws) => raws.iter().map(|raw| Matcher::new(raw)).collect(),
	}
}

/// The complete, ordered policy of known wrapping schemes.
///
/// Rules are evaluated in list order; the first rule that produces a result
/// wins. Order is caller-controlled, with no scoring or ambiguity
/// resolution.
#[derive(Debug)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	/// Assemble a rule set. Requires at least one rule and unique names.
	pub fn new(rules: Vec<Rule>) -> Result<Self> {
		if rules.is_empty() {
			return Err(ConfigError::EmptyRuleSet);
		}

		let mut seen = HashSet::new();
		for rule in &rules {
			if !seen.insert(rule.name()) {
				return Err(ConfigError::DuplicateRuleName {
					name: rule.name().to_string(),
				});
			}
		}

		Ok(RuleSet { rules })
	}

	/// Build a rule set from its definition data.
	pub fn from_defs(def: &RuleSetDef) -> Result<Self> {
		let rules = def
			.rules
			.iter()
			.map(Rule::from_def)
			.collect::<Result<Vec<_>>>()?;

		RuleSet::new(rules)
	}

	/// The rules in evaluation order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Recover the wrapped destination from a URL.
	///
	/// The URL is parsed once and shared across rules. Returns None when no
	/// rule applies; never an error.
	pub fn evaluate(&self, url: &str) -> Option<String> {
		let parsed = Url::parse(url).ok()?;
		self.rules
			.iter()
			.find_map(|rule| rule.evaluate_parsed(url, &parsed))
	}

	/// Check whether any rule's filter alone recognizes the URL.
	///
	/// Cheaper than full evaluation: no transform or extraction logic runs,
	/// so this can report true for a URL that `evaluate` would fail to
	/// unwrap.
	pub fn contains_match(&self, url: &str) -> bool {
		let Ok(parsed) = Url::parse(url) else {
			return false;
		};

		self.rules
			.iter()
			.any(|rule| rule.filter().matches_parsed(&parsed))
	}
}

use serde::Deserialize;
use std::collections::BTreeMap;

/// A value that may be written as a single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
	One(String),
	Many(Vec<String>),
}

/// Top-level definition of a single rule, one per rule file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuleDef {
	/// Unique name identifying the wrapping scheme.
	pub name: String,

	/// How to recognize a URL produced by this scheme.
	pub filter: FilterDef,

	/// How to pull the wrapped destination out of the URL.
	pub extract: ExtractDef,

	/// Transforms applied to the whole URL before extraction.
	#[serde(default)]
	pub pre_extract: Vec<TransformDef>,

	/// Transforms applied to the extracted value.
	#[serde(default)]
	pub post_extract: Vec<TransformDef>,
}

/// Definition of a rule set as a single document with a `rules` list.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetDef {
	pub rules: Vec<RuleDef>,
}

/// Filter section of a rule definition.
///
/// Matcher strings delimited by `/` are regexes; anything else is an exact
/// comparison.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterDef {
	/// Hostname matchers (required).
	pub hostname: OneOrMany,

	/// Path matchers (optional).
	#[serde(default)]
	pub path: Option<OneOrMany>,
}

/// Extract section of a rule definition.
///
/// `keys`/`select` apply to `query_param`; `pattern` applies to the regex
/// sources. Field mismatches are rejected when the extractor is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractDef {
	pub from: ExtractSourceDef,

	#[serde(default)]
	pub keys: Vec<String>,

	#[serde(default)]
	pub select: Option<SelectDef>,

	#[serde(default)]
	pub pattern: Option<String>,
}

/// Where the extractor reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractSourceDef {
	QueryParam,
	PathRegex,
	UrlRegex,
}

impl ExtractSourceDef {
	pub fn as_str(&self) -> &'static str {
		match self {
			ExtractSourceDef::QueryParam => "query_param",
			ExtractSourceDef::PathRegex => "path_regex",
			ExtractSourceDef::UrlRegex => "url_regex",
		}
	}
}

/// Which occurrence to take when a query parameter repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectDef {
	First,
	Last,
}

/// One entry of a transform list: a bare name (`"url_decode"`) or a
/// single-key table carrying the parameter (`{ prepend = "https://" }`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransformDef {
	Name(String),
	WithValue(BTreeMap<String, String>),
}

use crate::config::types::{ExtractDef, ExtractSourceDef, SelectDef};
use crate::error::{ConfigError, Result};
use regex::Regex;
use url::Url;

/// Which occurrence of a query parameter to take when it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Select {
	#[default]
	First,
	Last,
}

impl From<SelectDef> for Select {
	fn from(def: SelectDef) -> Self {
		match def {
			SelectDef::First => Select::First,
			SelectDef::Last => Select::Last,
		}
	}
}

/// Pulls the wrapped destination (or a still-encoded fragment of it) out of
/// a URL.
///
/// Each variant carries exactly the fields its strategy needs; patterns are
/// compiled once at construction.
#[derive(Debug)]
pub enum Extract {
	/// Take the value of the first configured query parameter that is
	/// present. Values are returned raw (no percent-decoding); decoding is
	/// the job of post-extraction transforms.
	QueryParam { keys: Vec<String>, select: Select },

	/// Search the URL's path, return capture group 1.
	PathRegex(Regex),

	/// Search the entire URL string, return capture group 1.
	UrlRegex(Regex),
}

impl Extract {
	/// Build an extractor from its definition, validating that the
	/// definition carries exactly the fields its source kind needs.
	pub fn from_def(def: &ExtractDef) -> Result<Self> {
		match def.from {
			ExtractSourceDef::QueryParam => {
				if def.keys.is_empty() {
					return Err(ConfigError::MissingExtractKeys);
				}
				if def.pattern.is_some() {
					return Err(ConfigError::UnexpectedExtractPattern);
				}

				Ok(Extract::QueryParam {
					keys: def.keys.clone(),
					select: def.select.map(Select::from).unwrap_or_default(),
				})
			}
			ExtractSourceDef::PathRegex | ExtractSourceDef::UrlRegex => {
				let kind = def.from.as_str();

				if !def.keys.is_empty() {
					return Err(ConfigError::UnexpectedExtractKeys { kind });
				}
				let Some(ref pattern) = def.pattern else {
					return Err(ConfigError::MissingExtractPattern { kind });
				};

				let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
					pattern: pattern.clone(),
					source,
				})?;

				// captures_len counts the implicit group 0
				if regex.captures_len() < 2 {
					return Err(ConfigError::MissingCaptureGroup {
						pattern: pattern.clone(),
					});
				}

				Ok(match def.from {
					ExtractSourceDef::PathRegex => Extract::PathRegex(regex),
					_ => Extract::UrlRegex(regex),
				})
			}
		}
	}

	/// Extract the candidate value from the given URL string.
	pub fn extract(&self, url: &str) -> Option<String> {
		// url_regex never needs the parsed structure
		if let Extract::UrlRegex(regex) = self {
			return capture_first(regex, url);
		}

		let parsed = Url::parse(url).ok()?;
		self.extract_parsed(url, &parsed)
	}

	/// Fast path for callers that already parsed the URL.
	pub fn extract_parsed(&self, url: &str, parsed: &Url) -> Option<String> {
		match self {
			Extract::QueryParam { keys, select } => {
				let query = parsed.query()?;
				for key in keys {
					let values = query_values(query, key);
					let value = match select {
						Select::First => values.first(),
						Select::Last => values.last(),
					};
					if let Some(value) = value {
						return Some((*value).to_string());
					}
				}
				None
			}
			Extract::PathRegex(regex) => capture_first(regex, parsed.path()),
			Extract::UrlRegex(regex) => capture_first(regex, url),
		}
	}
}

/// Search the haystack and return the text of the first capture group.
fn capture_first(regex: &Regex, haystack: &str) -> Option<String> {
	regex
		.captures(haystack)
		.and_then(|caps| caps.get(1))
		.map(|group| group.as_str().to_string())
}

/// Collect every raw occurrence of a query parameter, in order.
///
/// Pairs are split on `&` and on the first `=`; pairs without `=` and
/// blank values are skipped, so `?u=` counts as absent and selection can
/// fall through to the next key. Neither keys nor values are
/// percent-decoded.
fn query_values<'a>(query: &'a str, key: &str) -> Vec<&'a str> {
	query
		.split('&')
		.filter_map(|pair| {
			let (name, value) = pair.split_once('=')?;
			(name == key && !value.is_empty()).then_some(value)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn query_param(keys: &[&str], select: Select) -> Extract {
		Extract::QueryParam {
			keys: keys.iter().map(|k| k.to_string()).collect(),
			select,
		}
	}

	fn def(
		from: ExtractSourceDef,
		keys: &[&str],
		pattern: Option<&str>,
	) -> ExtractDef {
		ExtractDef {
			from,
			keys: keys.iter().map(|k| k.to_string()).collect(),
			select: None,
			pattern: pattern.map(|p| p.to_string()),
		}
	}

	#[test]
	fn test_query_param_returns_raw_value() {
		let extract = query_param(&["u"], Select::First);
		let result = extract.extract("https://wrap.example/?u=http%3A%2F%2Fexample.com");
		assert_eq!(result.as_deref(), Some("http%3A%2F%2Fexample.com"));
	}

	#[test]
	fn test_query_param_select_first() {
		let extract = query_param(&["u"], Select::First);
		let url = "https://wrap.example/?u=http%3A%2F%2Fexample.com&u=http%3A%2F%2Fother.com";
		assert_eq!(extract.extract(url).as_deref(), Some("http%3A%2F%2Fexample.com"));
	}

	#[test]
	fn test_query_param_select_last() {
		let extract = query_param(&["u"], Select::Last);
		let url = "https://wrap.example/?u=http%3A%2F%2Fexample.com&u=http%3A%2F%2Fother.com";
		assert_eq!(extract.extract(url).as_deref(), Some("http%3A%2F%2Fother.com"));
	}

	#[test]
	fn test_query_param_key_order_wins() {
		let extract = query_param(&["url", "u"], Select::First);
		let result = extract.extract("https://wrap.example/?u=second&url=first");
		assert_eq!(result.as_deref(), Some("first"));
	}

	#[test]
	fn test_query_param_falls_through_to_next_key() {
		let extract = query_param(&["url", "u"], Select::First);
		let result = extract.extract("https://wrap.example/?u=target");
		assert_eq!(result.as_deref(), Some("target"));
	}

	#[test]
	fn test_query_param_blank_value_counts_as_absent() {
		let extract = query_param(&["u"], Select::First);
		assert_eq!(extract.extract("https://wrap.example/?u="), None);
		assert_eq!(extract.extract("https://wrap.example/?u=&x=1"), None);
	}

	#[test]
	fn test_query_param_blank_occurrence_skipped_in_selection() {
		let extract = query_param(&["u"], Select::First);
		let result = extract.extract("https://wrap.example/?u=&u=target");
		assert_eq!(result.as_deref(), Some("target"));
	}

	#[test]
	fn test_query_param_blank_value_falls_through_to_next_key() {
		let extract = query_param(&["url", "u"], Select::First);
		let result = extract.extract("https://wrap.example/?url=&u=target");
		assert_eq!(result.as_deref(), Some("target"));
	}

	#[test]
	fn test_query_param_missing_key() {
		let extract = query_param(&["u"], Select::First);
		assert_eq!(extract.extract("https://wrap.example/?other=x"), None);
		assert_eq!(extract.extract("https://wrap.example/"), None);
	}

	#[test]
	fn test_query_param_value_containing_equals() {
		// base64 padding survives the split on the first '='
		let extract = query_param(&["u"], Select::First);
		let result = extract.extract("https://wrap.example/?u=aGk=&x=1");
		assert_eq!(result.as_deref(), Some("aGk="));
	}

	#[test]
	fn test_path_regex() {
		let def = def(ExtractSourceDef::PathRegex, &[], Some(r"^/L0/(.+)/$"));
		let extract = Extract::from_def(&def).unwrap();
		let result = extract.extract("https://a.r.awstrack.me/L0/http%3A%2F%2Fexample.com/");
		assert_eq!(result.as_deref(), Some("http%3A%2F%2Fexample.com"));
	}

	#[test]
	fn test_path_regex_no_match() {
		let def = def(ExtractSourceDef::PathRegex, &[], Some(r"^/L0/(.+)/$"));
		let extract = Extract::from_def(&def).unwrap();
		assert_eq!(extract.extract("https://a.r.awstrack.me/other"), None);
	}

	#[test]
	fn test_url_regex() {
		let def = def(ExtractSourceDef::UrlRegex, &[], Some(r"/v3/__(.+?)__;"));
		let extract = Extract::from_def(&def).unwrap();
		let result = extract.extract("https://urldefense.us/v3/__http://example.com__;!abc$");
		assert_eq!(result.as_deref(), Some("http://example.com"));
	}

	#[test]
	fn test_query_param_requires_keys() {
		let result = Extract::from_def(&def(ExtractSourceDef::QueryParam, &[], None));
		assert!(matches!(result, Err(ConfigError::MissingExtractKeys)));
	}

	#[test]
	fn test_query_param_forbids_pattern() {
		let result = Extract::from_def(&def(ExtractSourceDef::QueryParam, &["u"], Some("(x)")));
		assert!(matches!(result, Err(ConfigError::UnexpectedExtractPattern)));
	}

	#[test]
	fn test_regex_source_requires_pattern() {
		match Extract::from_def(&def(ExtractSourceDef::PathRegex, &[], None)) {
			Err(ConfigError::MissingExtractPattern { kind }) => {
				assert_eq!(kind, "path_regex");
			}
			other => panic!("Expected MissingExtractPattern, got {other:?}"),
		}
	}

	#[test]
	fn test_regex_source_forbids_keys() {
		match Extract::from_def(&def(ExtractSourceDef::UrlRegex, &["u"], Some("(x)"))) {
			Err(ConfigError::UnexpectedExtractKeys { kind }) => {
				assert_eq!(kind, "url_regex");
			}
			other => panic!("Expected UnexpectedExtractKeys, got {other:?}"),
		}
	}

	#[test]
	fn test_regex_source_requires_capture_group() {
		let result = Extract::from_def(&def(ExtractSourceDef::PathRegex, &[], Some("no-groups")));
		assert!(matches!(result, Err(ConfigError::MissingCaptureGroup { .. })));
	}

	#[test]
	fn test_regex_source_rejects_invalid_pattern() {
		let result = Extract::from_def(&def(ExtractSourceDef::UrlRegex, &[], Some("([invalid")));
		assert!(matches!(result, Err(ConfigError::InvalidRegex { .. })));
	}
}

use crate::error::{ConfigError, Result};
use regex::Regex;
use url::Url;

/// A single test against one string value.
///
/// The raw pattern chooses the variant at construction time: `/pattern/`
/// compiles the inner text as a regex, anything else compares for equality.
/// Regex matching is an unanchored search, so partial containment is enough
/// (hostnames and paths often carry extra segments around the match).
#[derive(Debug)]
pub enum Matcher {
	/// Byte-for-byte string equality.
	Exact(String),

	/// Compiled regex, searched anywhere within the value.
	Pattern(Regex),
}

impl Matcher {
	/// Build a matcher from its raw pattern string.
	pub fn new(raw: &str) -> Result<Self> {
		if raw.is_empty() {
			return Err(ConfigError::EmptyMatcherPattern);
		}

		if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
			let inner = &raw[1..raw.len() - 1];
			let regex = Regex::new(inner).map_err(|source| ConfigError::InvalidRegex {
				pattern: inner.to_string(),
				source,
			})?;
			Ok(Matcher::Pattern(regex))
		} else {
			Ok(Matcher::Exact(raw.to_string()))
		}
	}

	/// Check if this matcher accepts the given value.
	pub fn matches(&self, value: &str) -> bool {
		match self {
			Matcher::Exact(pattern) => value == pattern,
			Matcher::Pattern(regex) => regex.is_match(value),
		}
	}
}

/// Decides whether a URL belongs to a wrapping scheme.
///
/// A URL matches iff its hostname matches any hostname matcher AND (there
/// are no path matchers OR its path matches any path matcher). Query and
/// fragment are never inspected.
#[derive(Debug)]
pub struct Filter {
	hostname: Vec<Matcher>,
	path: Vec<Matcher>,
}

impl Filter {
	/// Build a filter. At least one hostname matcher is required.
	pub fn new(hostname: Vec<Matcher>, path: Vec<Matcher>) -> Result<Self> {
		if hostname.is_empty() {
			return Err(ConfigError::MissingHostnameMatcher);
		}

		Ok(Filter { hostname, path })
	}

	/// Check if this filter matches the given URL string.
	///
	/// A string that does not parse as a URL matches nothing.
	pub fn matches(&self, url: &str) -> bool {
		Url::parse(url).is_ok_and(|parsed| self.matches_parsed(&parsed))
	}

	/// Fast path for callers that already parsed the URL.
	pub fn matches_parsed(&self, parsed: &Url) -> bool {
		// The url crate lower-cases registered hostnames during parsing.
		let hostname = parsed.host_str().unwrap_or("");
		if !self.hostname.iter().any(|m| m.matches(hostname)) {
			return false;
		}

		self.path.is_empty() || self.path.iter().any(|m| m.matches(parsed.path()))
	}
}

//! Linkpeel - recover the original destination URL from link-protection
//! redirects.
//!
//! Email security gateways, messaging apps, and tracking services rewrite
//! outgoing links into redirects through their own service. This library
//! recognizes which wrapping scheme produced a URL and reverses it, including:
//! - Exact/regex filters over hostname and path
//! - Decoding transforms (percent, base64, HTML entities, Proofpoint v2)
//! - Query-parameter and regex extraction strategies
//! - An embedded catalog of real-world schemes, extensible via TOML files
//!
//! # Example
//!
//! ```
//! use linkpeel::{is_protected_link, unwrap_link};
//!
//! let url = "https://urldefense.proofpoint.com/v2/url?u=http-3A__example.com&d=foo";
//! assert!(is_protected_link(url));
//! assert_eq!(unwrap_link(url).as_deref(), Some("http://example.com"));
//!
//! assert_eq!(unwrap_link("http://example.com"), None);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod rules;

pub use error::{ConfigError, DecodeError, Result};

/// Recover the wrapped destination from a URL using the built-in rules.
///
/// Returns None when no known wrapping scheme applies.
pub fn unwrap_link(url: &str) -> Option<String> {
	rules::builtin_rule_set().evaluate(url)
}

/// Check whether a URL is recognized as a protected link by the built-in
/// rules, without attempting to unwrap it.
pub fn is_protected_link(url: &str) -> bool {
	rules::builtin_rule_set().contains_match(url)
}

use crate::config::types::TransformDef;
use crate::error::{ConfigError, DecodeError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Proofpoint v2 escapes characters as a hyphen followed by two hex digits.
static PROOFPOINT_HEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"-([0-9A-Fa-f]{2})").expect("literal pattern compiles"));

/// A named text rewrite applied before extraction (to undo whole-URL
/// obfuscation) or after it (to decode the extracted value).
#[derive(Debug, Clone)]
pub enum Transform {
	/// Decode HTML/XML character entities.
	HtmlUnescape,

	/// Percent-decode (RFC 3986 unreserve).
	UrlDecode,

	/// Standard base64 decode to text.
	Base64Decode,

	/// Concatenate the given prefix before the input.
	Prepend(String),

	/// Reverse Proofpoint's v2 character-escaping scheme.
	ProofpointV2Decode,
}

impl Transform {
	/// Build a transform from its name and optional value.
	///
	/// Unknown names and parameter presence mismatches are rejected here,
	/// never at apply time.
	pub fn new(name: &str, value: Option<&str>) -> Result<Self> {
		match (name, value) {
			("html_unescape", None) => Ok(Transform::HtmlUnescape),
			("url_decode", None) => Ok(Transform::UrlDecode),
			("base64_decode", None) => Ok(Transform::Base64Decode),
			("proofpoint_v2_decode", None) => Ok(Transform::ProofpointV2Decode),
			("prepend", Some(value)) => Ok(Transform::Prepend(value.to_string())),
			("prepend", None) => Err(ConfigError::MissingTransformValue {
				name: name.to_string(),
			}),
			("html_unescape" | "url_decode" | "base64_decode" | "proofpoint_v2_decode", Some(_)) => {
				Err(ConfigError::UnexpectedTransformValue {
					name: name.to_string(),
				})
			}
			_ => Err(ConfigError::UnknownTransform {
				name: name.to_string(),
			}),
		}
	}

	/// Build a transform from its definition (bare name or single-key table).
	pub fn from_def(def: &TransformDef) -> Result<Self> {
		match def {
			TransformDef::Name(name) => Transform::new(name, None),
			TransformDef::WithValue(entries) => match entries.iter().next() {
				Some((name, value)) if entries.len() == 1 => {
					Transform::new(name, Some(value.as_str()))
				}
				_ => Err(ConfigError::MalformedTransformEntry {
					keys: entries.len(),
				}),
			},
		}
	}

	/// Apply this transform to a string.
	///
	/// Pure; the only fallible variant is `Base64Decode`, which fails on
	/// input that is not valid base64 or does not decode to UTF-8 text.
	pub fn apply(&self, value: &str) -> std::result::Result<String, DecodeError> {
		match self {
			Transform::HtmlUnescape => Ok(html_escape::decode_html_entities(value).into_owned()),
			Transform::UrlDecode => Ok(percent_decode_str(value).decode_utf8_lossy().into_owned()),
			Transform::Base64Decode => {
				let bytes = STANDARD.decode(value)?;
				Ok(String::from_utf8(bytes)?)
			}
			Transform::Prepend(prefix) => Ok(format!("{prefix}{value}")),
			Transform::ProofpointV2Decode => Ok(proofpoint_v2_decode(value)),
		}
	}
}

/// Replace every `-XX` (two hex digits) with the character at code point
/// `XX`, then every literal underscore with `/`.
fn proofpoint_v2_decode(value: &str) -> String {
	let decoded = PROOFPOINT_HEX.replace_all(value, |caps: &Captures| {
		match u8::from_str_radix(&caps[1], 16) {
			Ok(byte) => (byte as char).to_string(),
			Err(_) => caps[0].to_string(),
		}
	});

	decoded.replace('_', "/")
}

use std::path::PathBuf;

/// Construction-time errors for rule definitions.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Every variant is fatal at load time: a malformed rule is refused outright
/// rather than silently skipped, since a dropped rule would make a protected
/// link look unrecognized.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to read rule file: {path}")]
	RuleReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse rule file: {path}")]
	RuleParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read rules directory: {path}")]
	RulesDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Matcher pattern must not be empty")]
	EmptyMatcherPattern,

	#[error("Invalid regex pattern: /{pattern}/")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Filter requires at least one hostname matcher")]
	MissingHostnameMatcher,

	#[error("Unknown transform: {name}")]
	UnknownTransform { name: String },

	#[error("Transform {name} requires a value")]
	MissingTransformValue { name: String },

	#[error("Transform {name} does not accept a value")]
	UnexpectedTransformValue { name: String },

	#[error("Transform entry must be a bare name or a single-key table, got {keys} keys")]
	MalformedTransformEntry { keys: usize },

	#[error("'keys' is required when extracting from query_param")]
	MissingExtractKeys,

	#[error("'pattern' is not allowed when extracting from query_param")]
	UnexpectedExtractPattern,

	#[error("'pattern' is required when extracting from {kind}")]
	MissingExtractPattern { kind: &'static str },

	#[error("'keys' is not allowed when extracting from {kind}")]
	UnexpectedExtractKeys { kind: &'static str },

	#[error("Extract pattern must contain at least one capture group: {pattern}")]
	MissingCaptureGroup { pattern: String },

	#[error("Rule name must not be empty")]
	EmptyRuleName,

	#[error("Duplicate rule name: {name}")]
	DuplicateRuleName { name: String },

	#[error("Rule set requires at least one rule")]
	EmptyRuleSet,
}

/// Evaluation-time errors from transforms that decode untrusted input.
///
/// Never fatal: `Rule::evaluate` converts these into "no result" so that
/// evaluation can fall through to the next candidate rule.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("Invalid base64 input")]
	Base64(#[from] base64::DecodeError),

	#[error("Decoded bytes are not valid UTF-8")]
	Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Rule definition loading and parsing for linkpeel.
//!
//! This module handles:
//! - TOML rule file parsing
//! - Directory loading in sorted filename order
//! - The serde definition types the engine is built from

pub mod loader;
pub mod parser;
pub mod types;

pub use loader::{load_rules_dir, user_rules_dir};
pub use parser::{parse_rule_file, parse_rule_set_str, parse_rule_str};
pub use types::{
	ExtractDef, ExtractSourceDef, FilterDef, OneOrMany, RuleDef, RuleSetDef, SelectDef,
	TransformDef,
};

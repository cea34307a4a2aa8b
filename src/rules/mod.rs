//! The unwrapping engine for linkpeel.
//!
//! This module handles:
//! - Exact/regex matching for hostnames and paths
//! - Text transforms that undo vendor-specific encodings
//! - Extraction of the wrapped destination from a URL
//! - Ordered, first-match-wins rule evaluation

pub mod builtin;
pub mod extract;
pub mod matcher;
pub mod rule;
pub mod transform;

pub use builtin::builtin_rule_set;
pub use extract::{Extract, Select};
pub use matcher::{Filter, Matcher};
pub use rule::{Rule, RuleSet};
pub use transform::Transform;

use crate::config::load_rules_dir;
use crate::error::Result;
use crate::rules::RuleSet;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Caller-owned cache of rule sets keyed by source directory.
///
/// The lock is held across construction, so concurrent callers asking for
/// the same directory get the same `Arc` and the directory is read at most
/// once. A failed load is not cached; the next call retries.
#[derive(Debug, Default)]
pub struct RuleSetCache {
	inner: Mutex<HashMap<PathBuf, Arc<RuleSet>>>,
}

impl RuleSetCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the cached rule set for a directory, loading it on first use.
	pub fn get_or_load(&self, dir: &Path) -> Result<Arc<RuleSet>> {
		let mut cached = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

		if let Some(rule_set) = cached.get(dir) {
			return Ok(rule_set.clone());
		}

		let rule_set = Arc::new(load_rules_dir(dir)?);
		cached.insert(dir.to_path_buf(), rule_set.clone());
		Ok(rule_set)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ConfigError;
	use std::fs;

	const RULE: &str = r#"
name = "wrap"

[filter]
hostname = "wrap.example"

[extract]
from = "query_param"
keys = ["u"]
"#;

	#[test]
	fn test_cache_returns_same_instance() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join("wrap.toml"), RULE).unwrap();

		let cache = RuleSetCache::new();
		let first = cache.get_or_load(temp_dir.path()).unwrap();
		let second = cache.get_or_load(temp_dir.path()).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn test_cache_failed_load_retries() {
		let temp_dir = tempfile::tempdir().unwrap();

		let cache = RuleSetCache::new();
		let result = cache.get_or_load(temp_dir.path());
		assert!(matches!(result, Err(ConfigError::EmptyRuleSet)));

		// A rule appearing later is picked up because failures are not cached
		fs::write(temp_dir.path().join("wrap.toml"), RULE).unwrap();
		assert!(cache.get_or_load(temp_dir.path()).is_ok());
	}
}

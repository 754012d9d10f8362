//! Wildcard value matching and the compiled-pattern cache
//!
//! A pattern such as `text`, `*`, or `application/vnd.*+json` is matched
//! case-insensitively against a concrete value. Patterns with embedded `*`
//! are translated into anchored regular expressions where each `*` stands
//! for one or more characters. Compiled expressions are kept in a bounded
//! cache shared by every negotiation that uses it.

use crate::config::PatternCacheConfig;
use crate::error::NegotiationResult;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL_CACHE: Lazy<Arc<PatternCache>> = Lazy::new(|| Arc::new(PatternCache::default()));

/// Bounded cache of compiled wildcard patterns.
///
/// Lookup, compilation, eviction and insertion all happen under one lock.
/// When the cache is full, one arbitrary entry is evicted before a new one
/// is inserted.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{PatternCache, PatternCacheConfig};
///
/// let cache = PatternCache::new(PatternCacheConfig::new().with_max_entries(2)).unwrap();
/// assert!(cache.matches("vnd.api+json", "vnd.*+json"));
/// assert!(!cache.matches("json", "vnd.*+json"));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct PatternCache {
	config: PatternCacheConfig,
	entries: Mutex<HashMap<String, Regex>>,
}

impl Default for PatternCache {
	fn default() -> Self {
		Self::with_valid_config(PatternCacheConfig::default())
	}
}

impl PatternCache {
	/// Creates an empty cache.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidConfig`](crate::NegotiationError::InvalidConfig)
	/// if the configuration does not validate.
	pub fn new(config: PatternCacheConfig) -> NegotiationResult<Self> {
		config.validate()?;
		Ok(Self::with_valid_config(config))
	}

	fn with_valid_config(config: PatternCacheConfig) -> Self {
		Self {
			config,
			entries: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the process-wide cache used by [`Negotiator::new`](crate::Negotiator::new).
	pub fn global() -> Arc<PatternCache> {
		Arc::clone(&GLOBAL_CACHE)
	}

	pub fn config(&self) -> &PatternCacheConfig {
		&self.config
	}

	/// Number of compiled patterns currently cached.
	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}

	pub fn contains(&self, pattern: &str) -> bool {
		self.entries.lock().contains_key(pattern)
	}

	pub fn clear(&self) {
		self.entries.lock().clear();
	}

	/// Returns the compiled matcher for `pattern`, compiling and caching it
	/// on a miss.
	pub fn compile(&self, pattern: &str) -> Regex {
		let mut entries = self.entries.lock();
		if let Some(regex) = entries.get(pattern) {
			tracing::trace!(pattern, "pattern cache hit");
			return regex.clone();
		}

		let regex = Regex::new(&pattern_to_regex(pattern))
			.expect("escaped wildcard pattern always forms a valid regex");
		tracing::trace!(pattern, "compiled wildcard pattern");

		if entries.capacity() == 0 {
			entries.reserve(self.config.initial_capacity());
		}
		while entries.len() >= self.config.max_entries() {
			let Some(victim) = entries.keys().next().cloned() else {
				break;
			};
			tracing::debug!(victim = %victim, "evicting compiled pattern");
			entries.remove(&victim);
		}
		entries.insert(pattern.to_string(), regex.clone());
		regex
	}

	/// Matches a concrete value against a pattern.
	///
	/// - an empty pattern only matches an empty value;
	/// - `*` matches any non-empty value;
	/// - otherwise values match case-insensitively, with each embedded `*`
	///   standing for one or more characters.
	pub fn matches(&self, actual: &str, pattern: &str) -> bool {
		match pattern {
			"" => actual.is_empty(),
			"*" => !actual.is_empty(),
			_ if pattern.eq_ignore_ascii_case(actual) => true,
			_ if !pattern.contains('*') => false,
			_ => self.compile(pattern).is_match(actual),
		}
	}
}

/// Translates a wildcard pattern into an anchored, case-insensitive regex.
fn pattern_to_regex(pattern: &str) -> String {
	let mut out = String::with_capacity(pattern.len() + 8);
	out.push_str("(?i)^");
	for (i, literal) in pattern.split('*').enumerate() {
		if i > 0 {
			out.push_str(".+");
		}
		out.push_str(&regex::escape(literal));
	}
	out.push('$');
	out
}

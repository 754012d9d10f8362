//! Pattern cache configuration

use crate::error::{NegotiationError, NegotiationResult};

const DEFAULT_INITIAL_CAPACITY: usize = 16;
const DEFAULT_MAX_ENTRIES: usize = 32;

/// Sizing of a [`PatternCache`](crate::PatternCache).
///
/// # Examples
///
/// ```
/// use conneg_negotiation::PatternCacheConfig;
///
/// let config = PatternCacheConfig::new()
///     .with_initial_capacity(4)
///     .with_max_entries(8);
///
/// assert_eq!(config.max_entries(), 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternCacheConfig {
	initial_capacity: usize,
	max_entries: usize,
}

impl Default for PatternCacheConfig {
	fn default() -> Self {
		Self {
			initial_capacity: DEFAULT_INITIAL_CAPACITY,
			max_entries: DEFAULT_MAX_ENTRIES,
		}
	}
}

impl PatternCacheConfig {
	/// Creates the default configuration (16 preallocated, 32 maximum).
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the number of slots preallocated on first use
	pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
		self.initial_capacity = initial_capacity;
		self
	}

	/// Set the maximum number of compiled patterns kept
	pub fn with_max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = max_entries;
		self
	}

	/// Slots preallocated on first use, never more than `max_entries`.
	pub fn initial_capacity(&self) -> usize {
		self.initial_capacity.min(self.max_entries)
	}

	pub fn max_entries(&self) -> usize {
		self.max_entries
	}

	/// Checks the configuration.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidConfig`] if `max_entries` is zero.
	pub fn validate(&self) -> NegotiationResult<()> {
		if self.max_entries == 0 {
			return Err(NegotiationError::InvalidConfig(
				"max_entries must be non-zero".to_string(),
			));
		}
		Ok(())
	}
}

//! Content negotiation
//!
//! Given the representations a server can produce and the weighted
//! preferences sent by a client, [`Negotiator`] picks the single best
//! representation.
//!
//! For every available item, the first preference (in specificity order)
//! whose value, sub-value and parameters match it contributes a combined
//! score of `available.q * preference.q`. The highest score wins; ties go
//! to the most specific available item.
//!
//! # Examples
//!
//! ```
//! use conneg_negotiation::{List, Negotiator, SubValueMode};
//!
//! let available = List::parse("text/html, application/json", SubValueMode::Required).unwrap();
//! let accept = List::parse("application/*, text/html;q=0.5", SubValueMode::Required).unwrap();
//!
//! let best = Negotiator::new().negotiate(&available, &accept).unwrap();
//! assert_eq!(best.to_string(), "application/json");
//! ```

use crate::acceptable::Acceptable;
use crate::list::List;
use crate::pattern::PatternCache;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of a negotiation, with the evidence behind the choice.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiated {
	/// The chosen available item.
	pub item: Acceptable,
	/// The preference that matched `item`, if any.
	pub preference: Option<Acceptable>,
	/// Combined score in `0.0..=1.0`.
	pub score: f64,
}

impl Negotiated {
	/// Returns `true` when some preference actually accepted the item.
	///
	/// Negotiation still returns the best available item when nothing
	/// matched; callers that need strict rejection check this.
	pub fn is_acceptable(&self) -> bool {
		self.score > 0.0
	}
}

/// Selects the best available representation for a preference list.
#[derive(Debug, Clone)]
pub struct Negotiator {
	cache: Arc<PatternCache>,
}

impl Default for Negotiator {
	fn default() -> Self {
		Self::new()
	}
}

impl Negotiator {
	/// Creates a negotiator backed by the process-wide pattern cache.
	pub fn new() -> Self {
		Self::with_cache(PatternCache::global())
	}

	/// Creates a negotiator backed by the given pattern cache.
	pub fn with_cache(cache: Arc<PatternCache>) -> Self {
		Self { cache }
	}

	pub fn cache(&self) -> &Arc<PatternCache> {
		&self.cache
	}

	/// Returns the best available item, or `None` when nothing is available.
	///
	/// An empty `preferences` list means the client expressed no
	/// preference: the highest-quality available item with non-zero quality
	/// is returned.
	pub fn negotiate(&self, available: &List, preferences: &List) -> Option<Acceptable> {
		self.negotiate_detailed(available, preferences)
			.map(|outcome| outcome.item)
	}

	/// Like [`negotiate`](Self::negotiate), but also reports the matching
	/// preference and the combined score.
	pub fn negotiate_detailed(&self, available: &List, preferences: &List) -> Option<Negotiated> {
		let available = available.sorted();
		let preferences = preferences.sorted();

		if available.is_empty() {
			tracing::trace!("no available items to negotiate");
			return None;
		}

		if preferences.is_empty() {
			return best_by_quality(&available);
		}

		let outcome = available
			.iter()
			.map(|item| self.score(item, &preferences))
			.min_by(rank)?;

		if outcome.is_acceptable() {
			tracing::trace!(item = %outcome.item, score = outcome.score, "negotiated");
		} else {
			tracing::debug!(item = %outcome.item, "no preference matched, falling back");
		}
		Some(outcome)
	}

	/// Scores one available item against the first matching preference.
	fn score(&self, item: &Acceptable, preferences: &List) -> Negotiated {
		let preference = preferences.iter().find(|p| self.is_match(item, p));
		let score = preference.map_or(0.0, |p| item.quality.as_f64() * p.quality.as_f64());

		Negotiated {
			item: item.clone(),
			preference: preference.cloned(),
			score,
		}
	}

	fn is_match(&self, item: &Acceptable, preference: &Acceptable) -> bool {
		self.cache.matches(&item.value, &preference.value)
			&& self.cache.matches(
				item.sub_value.as_deref().unwrap_or(""),
				preference.sub_value.as_deref().unwrap_or(""),
			) && params_match(&item.params, &preference.params)
			&& !item.quality.is_zero()
			&& !preference.quality.is_zero()
	}
}

/// Every parameter named by the preference must be present with an equal
/// value; extra parameters on the item are ignored.
fn params_match(actual: &BTreeMap<String, String>, pattern: &BTreeMap<String, String>) -> bool {
	pattern
		.iter()
		.all(|(key, value)| actual.get(key) == Some(value))
}

/// Higher score first, then the more specific item.
fn rank(a: &Negotiated, b: &Negotiated) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| a.item.compare(&b.item))
}

/// First item (in specificity order) with the highest non-zero quality.
fn best_by_quality(available: &List) -> Option<Negotiated> {
	let mut best: Option<&Acceptable> = None;
	for item in available.iter().filter(|item| !item.quality.is_zero()) {
		if best.is_none_or(|b| item.quality > b.quality) {
			best = Some(item);
		}
	}

	best.map(|item| Negotiated {
		item: item.clone(),
		preference: None,
		score: item.quality.as_f64(),
	})
}

/// Negotiates with the process-wide pattern cache.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{List, negotiate};
///
/// let available: List = "gzip, identity".parse().unwrap();
/// let accept: List = "gzip;q=0.5, identity".parse().unwrap();
/// assert_eq!(negotiate(&available, &accept).unwrap().value, "identity");
/// ```
pub fn negotiate(available: &List, preferences: &List) -> Option<Acceptable> {
	Negotiator::new().negotiate(available, preferences)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::acceptable::SubValueMode;
	use crate::config::PatternCacheConfig;
	use crate::quality::Quality;
	use rstest::{fixture, rstest};

	#[fixture]
	fn negotiator() -> Negotiator {
		let cache = PatternCache::new(PatternCacheConfig::new().with_max_entries(4)).unwrap();
		Negotiator::with_cache(Arc::new(cache))
	}

	fn list(input: &str) -> List {
		List::parse(input, SubValueMode::Optional).unwrap()
	}

	#[rstest]
	fn test_nothing_available(negotiator: Negotiator) {
		assert_eq!(negotiator.negotiate(&List::new(), &List::new()), None);
		assert_eq!(
			negotiator.negotiate(&List::new(), &list("text/html, text/*;q=0.9, */*;q=0.1")),
			None
		);
	}

	#[rstest]
	fn test_no_preferences_picks_highest_quality(negotiator: Negotiator) {
		let available = list("text/html, application/json;q=0.999");
		let best = negotiator.negotiate(&available, &List::new()).unwrap();
		assert_eq!(best.to_string(), "text/html");
	}

	#[rstest]
	fn test_no_preferences_breaks_quality_ties_by_specificity(negotiator: Negotiator) {
		let available = list("text/plain;q=0.5, text/html;q=0.5, */*;q=0.5");
		let best = negotiator.negotiate(&available, &List::new()).unwrap();
		assert_eq!(best.to_string(), "text/html;q=0.5");
	}

	#[rstest]
	fn test_no_preferences_all_zero_quality(negotiator: Negotiator) {
		let available = list("text/html;q=0, application/json;q=0");
		assert_eq!(negotiator.negotiate(&available, &List::new()), None);
	}

	#[rstest]
	fn test_parameter_match_beats_generic_match(negotiator: Negotiator) {
		let available = list("text/html, text/plain;charset=utf-8");
		let preferences = list("text/*;charset=utf-8, text/html;q=0.999");
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert_eq!(outcome.item.to_string(), "text/plain;charset=utf-8");
		assert_eq!(
			outcome.preference.unwrap().to_string(),
			"text/*;charset=utf-8"
		);
		assert_eq!(outcome.score, 1.0);
	}

	#[rstest]
	fn test_scores_multiply(negotiator: Negotiator) {
		let available = list("text/html;q=0.5, application/json;q=0.9");
		let preferences = list("text/html, application/json;q=0.5");
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert_eq!(outcome.item.value, "text");
		assert_eq!(outcome.score, 0.5);
	}

	#[rstest]
	fn test_zero_quality_preference_never_matches(negotiator: Negotiator) {
		let available = list("text/html, application/json");
		let preferences = list("text/html;q=0, */*;q=0.1");
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert_eq!(outcome.item.to_string(), "application/json");
		assert!(outcome.is_acceptable());
	}

	#[rstest]
	fn test_unmatched_still_found_with_zero_score(negotiator: Negotiator) {
		let available = list("text/html, application/json");
		let preferences = list("image/png");
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert!(!outcome.is_acceptable());
		assert_eq!(outcome.preference, None);
		assert_eq!(outcome.item.to_string(), "application/json");
	}

	#[rstest]
	fn test_does_not_mutate_inputs(negotiator: Negotiator) {
		let available = list("*/*, text/html");
		let preferences = list("*/*;q=0.1, text/html");
		let before = (available.clone(), preferences.clone());
		negotiator.negotiate(&available, &preferences);
		assert_eq!((available, preferences), before);
	}

	#[rstest]
	fn test_wildcard_preferences_use_cache(negotiator: Negotiator) {
		let available = list("application/vnd.api+json, application/xml");
		let preferences = list("application/vnd.*+json");
		let best = negotiator.negotiate(&available, &preferences).unwrap();
		assert_eq!(best.sub_value.as_deref(), Some("vnd.api+json"));
		assert!(negotiator.cache().contains("vnd.*+json"));
	}

	#[rstest]
	fn test_sub_value_absent_on_both_sides(negotiator: Negotiator) {
		let available = List::parse("gzip, br;q=0.9", SubValueMode::Absent).unwrap();
		let preferences = List::parse("br, *;q=0.5", SubValueMode::Absent).unwrap();
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert_eq!(outcome.item.value, "br");
		assert!((outcome.score - 0.9).abs() < f64::EPSILON);
	}

	#[rstest]
	fn test_preference_with_sub_value_rejects_item_without(negotiator: Negotiator) {
		let available = list("text");
		let preferences = list("text/html");
		let outcome = negotiator
			.negotiate_detailed(&available, &preferences)
			.unwrap();
		assert!(!outcome.is_acceptable());
	}

	#[rstest]
	#[case("text/html", false)]
	#[case("text/html;charset=utf-8", true)]
	#[case("text/html;charset=utf-8;level=1", true)]
	#[case("text/html;charset=latin1", false)]
	#[case("text/html;level=1", false)]
	fn test_params_subset_match(#[case] item: &str, #[case] expected: bool) {
		let item = Acceptable::parse(item, SubValueMode::Required).unwrap();
		let bare = Acceptable::new("text").with_sub_value("html");
		let with_charset = bare.clone().with_param("charset", "utf-8");
		assert!(params_match(&item.params, &bare.params));
		assert_eq!(params_match(&item.params, &with_charset.params), expected);
	}

	#[rstest]
	fn test_free_function_uses_global_cache() {
		let available = list("en-US, fr");
		let preferences = List::parse("en-*", SubValueMode::Absent).unwrap();
		let best = negotiate(&available, &preferences).unwrap();
		assert_eq!(best.value, "en-US");
		assert_eq!(best.quality, Quality::MAX);
	}
}

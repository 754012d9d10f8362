//! Negotiation integration tests
//!
//! End-to-end scenarios for each header family: parse the server's
//! available list and the client's header, negotiate, check the winner.

use conneg_negotiation::{
	Acceptable, List, Negotiator, PatternCache, PatternCacheConfig, Quality, SubValueMode,
	negotiate,
};
use rstest::*;
use std::sync::Arc;

#[fixture]
fn negotiator() -> Negotiator {
	let cache = PatternCache::new(PatternCacheConfig::default()).unwrap();
	Negotiator::with_cache(Arc::new(cache))
}

fn media(input: &str) -> List {
	List::parse(input, SubValueMode::Required).unwrap()
}

fn flat(input: &str) -> List {
	List::parse(input, SubValueMode::Absent).unwrap()
}

// =============================================================================
// Accept
// =============================================================================

#[rstest]
#[case("text/html, application/json", "application/json", "application/json")]
#[case("text/html, application/json", "text/*, */*;q=0.1", "text/html")]
#[case("text/html, application/json", "*/*", "application/json")]
#[case("text/html;q=0.8, application/json", "text/html, application/json;q=0.5", "text/html;q=0.8")]
#[case(
	"text/html, text/plain;charset=utf-8",
	"text/*;charset=utf-8, text/html;q=0.999",
	"text/plain;charset=utf-8"
)]
#[case("image/png, image/webp", "image/webp;q=0, image/*", "image/png")]
fn test_accept(
	negotiator: Negotiator,
	#[case] available: &str,
	#[case] accept: &str,
	#[case] expected: &str,
) {
	let best = negotiator.negotiate(&media(available), &media(accept)).unwrap();
	assert_eq!(best.to_string(), expected);
}

#[rstest]
fn test_accept_without_header_uses_server_quality(negotiator: Negotiator) {
	let available = media("text/html, application/json;q=0.999");
	let best = negotiator.negotiate(&available, &List::new()).unwrap();
	assert_eq!(best, Acceptable::new("text").with_sub_value("html"));
}

#[rstest]
fn test_nothing_available_is_not_found(negotiator: Negotiator) {
	let accept = media("text/html, text/*;q=0.9, */*;q=0.1");
	assert!(negotiator.negotiate(&List::new(), &accept).is_none());
	assert!(negotiator.negotiate_detailed(&List::new(), &List::new()).is_none());
}

// =============================================================================
// Accept-Encoding / Accept-Charset / Accept-Language
// =============================================================================

#[rstest]
#[case("gzip, br, identity", "br;q=1.0, gzip;q=0.8, *;q=0.1", "br")]
#[case("gzip, identity", "deflate", "gzip")]
#[case("identity", "gzip, identity;q=0.5", "identity")]
fn test_accept_encoding(
	negotiator: Negotiator,
	#[case] available: &str,
	#[case] accept: &str,
	#[case] expected: &str,
) {
	let best = negotiator.negotiate(&flat(available), &flat(accept)).unwrap();
	assert_eq!(best.value, expected);
}

#[rstest]
fn test_accept_encoding_unmatched_reports_zero_score(negotiator: Negotiator) {
	let outcome = negotiator
		.negotiate_detailed(&flat("gzip, identity"), &flat("deflate"))
		.unwrap();
	assert!(!outcome.is_acceptable());
	assert_eq!(outcome.score, 0.0);
}

#[rstest]
fn test_accept_charset_case_insensitive(negotiator: Negotiator) {
	let best = negotiator
		.negotiate(&flat("utf-8, iso-8859-1"), &flat("UTF-8;q=0.7, ISO-8859-1;q=0.3"))
		.unwrap();
	assert_eq!(best.value, "utf-8");
}

#[rstest]
#[case("en-US, fr-FR, de", "fr-*, en-*;q=0.5", "fr-FR")]
#[case("en-US, en-GB", "en-GB, en-*;q=0.9", "en-GB")]
#[case("en-US, de", "de;q=0.4, *;q=0.5", "en-US")]
fn test_accept_language_wildcards(
	negotiator: Negotiator,
	#[case] available: &str,
	#[case] accept: &str,
	#[case] expected: &str,
) {
	let best = negotiator.negotiate(&flat(available), &flat(accept)).unwrap();
	assert_eq!(best.value, expected);
}

// =============================================================================
// Global cache and free function
// =============================================================================

#[rstest]
fn test_free_function_matches_negotiator() {
	let available = media("application/vnd.api+json, application/json");
	let accept = media("application/vnd.*+json, application/json;q=0.5");

	let from_fn = negotiate(&available, &accept).unwrap();
	let from_negotiator = Negotiator::new().negotiate(&available, &accept).unwrap();

	assert_eq!(from_fn, from_negotiator);
	assert_eq!(from_fn.sub_value.as_deref(), Some("vnd.api+json"));
	assert_eq!(from_fn.quality, Quality::MAX);
}

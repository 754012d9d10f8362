//! # Conneg Negotiation
//!
//! Content negotiation in the style of the HTTP `Accept`,
//! `Accept-Charset`, `Accept-Encoding` and `Accept-Language` headers.
//!
//! The crate provides:
//!
//! - **Grammar**: [`Acceptable`] items (value, optional sub-value,
//!   parameters, [`Quality`]) and comma-separated [`List`]s, parsed with a
//!   [`SubValueMode`] and formatted back to canonical text
//! - **Specificity**: [`Acceptable::compare`], the total order used to sort
//!   lists and to break negotiation ties
//! - **Negotiation**: [`Negotiator`] picks the best available item for a
//!   client's weighted, possibly wildcarded preferences, caching compiled
//!   wildcard patterns in a bounded [`PatternCache`]
//!
//! The crate performs no I/O. Callers hand it header values they already
//! hold and get back a value.
//!
//! ## Example
//!
//! ```
//! use conneg_negotiation::{List, Negotiator, SubValueMode};
//!
//! let available = List::parse(
//!     "text/html, text/plain;charset=utf-8",
//!     SubValueMode::Required,
//! ).unwrap();
//! let accept = List::parse(
//!     "text/*;charset=utf-8, text/html;q=0.999",
//!     SubValueMode::Required,
//! ).unwrap();
//!
//! let best = Negotiator::new().negotiate(&available, &accept).unwrap();
//! assert_eq!(best.to_string(), "text/plain;charset=utf-8");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): text-based `Serialize`/`Deserialize` for
//!   [`Quality`], [`Acceptable`] and [`List`], and derives for
//!   [`PatternCacheConfig`]

pub mod acceptable;
pub mod chars;
pub mod config;
pub mod error;
pub mod list;
pub mod negotiator;
pub mod pattern;
pub mod quality;

pub use acceptable::{Acceptable, SubValueMode};
pub use config::PatternCacheConfig;
pub use error::{NegotiationError, NegotiationResult};
pub use list::List;
pub use negotiator::{Negotiated, Negotiator, negotiate};
pub use pattern::PatternCache;
pub use quality::Quality;

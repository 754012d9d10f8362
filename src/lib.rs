//! # Conneg
//!
//! Content negotiation for `Accept`, `Accept-Charset`, `Accept-Encoding` and
//! `Accept-Language` style headers.
//!
//! Conneg parses weighted, possibly wildcarded preference lists, orders them
//! by specificity, and picks the best representation a server can offer. It
//! performs no I/O: the calling HTTP layer supplies header values and gets a
//! value back.
//!
//! ## Feature Flags
//!
//! - `negotiation` - Grammar, specificity ordering and the negotiator
//! - `serde` - Text-based `Serialize`/`Deserialize` for header types
//! - `full` (default) - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use conneg::prelude::*;
//!
//! let available = List::parse("text/html, application/json", SubValueMode::Required).unwrap();
//! let accept = List::parse("application/json;q=0.9, text/*;q=0.5", SubValueMode::Required).unwrap();
//!
//! let best = negotiate(&available, &accept).unwrap();
//! assert_eq!(best.to_string(), "application/json");
//! ```

#[cfg(feature = "negotiation")]
pub use conneg_negotiation as negotiation;

#[cfg(feature = "negotiation")]
pub use conneg_negotiation::{
	Acceptable, List, Negotiated, NegotiationError, NegotiationResult, Negotiator, PatternCache,
	PatternCacheConfig, Quality, SubValueMode, negotiate,
};

pub mod prelude {
	#[cfg(feature = "negotiation")]
	pub use crate::{
		Acceptable, List, Negotiated, NegotiationError, Negotiator, Quality, SubValueMode,
		negotiate,
	};
}

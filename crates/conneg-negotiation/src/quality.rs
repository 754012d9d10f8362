//! Quality weights (`q` parameter values)
//!
//! A quality is stored as an integer number of thousandths in `0..=1000`.
//! Parsing accepts the grammar
//!
//! ```text
//! quality = "0" | "1" | "1." 1*"0" | ["0"] "." 1*DIGIT
//! ```
//!
//! and rounds extra precision to the nearest thousandth, ties to even.

use crate::chars::is_digit;
use crate::error::{NegotiationError, NegotiationResult};
use std::fmt;
use std::str::FromStr;

/// Weight of an acceptable item, in thousandths.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::Quality;
///
/// let q = Quality::parse("0.25").unwrap();
/// assert_eq!(q.thousandths(), 250);
/// assert_eq!(q.to_string(), "0.25");
/// assert_eq!(Quality::parse("1.000").unwrap(), Quality::MAX);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
	/// Zero weight: "not acceptable".
	pub const MIN: Quality = Quality(0);
	/// Full weight, the default for items without a `q` parameter.
	pub const MAX: Quality = Quality(1000);

	/// Creates a quality from thousandths, clamping to `1000`.
	pub const fn new(thousandths: u16) -> Self {
		if thousandths > 1000 {
			Self::MAX
		} else {
			Self(thousandths)
		}
	}

	/// Creates a quality from thousandths, rejecting values above `1000`.
	pub fn from_thousandths(thousandths: u16) -> NegotiationResult<Self> {
		if thousandths > 1000 {
			return Err(NegotiationError::quality(&thousandths.to_string()));
		}
		Ok(Self(thousandths))
	}

	/// Returns the weight in thousandths.
	pub const fn thousandths(self) -> u16 {
		self.0
	}

	/// Returns the weight as a fraction in `0.0..=1.0`.
	pub fn as_f64(self) -> f64 {
		f64::from(self.0) / 1000.0
	}

	/// Returns `true` for a zero weight.
	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	/// Parses quality text.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidQuality`] when `input` does not
	/// match the quality grammar.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::Quality;
	///
	/// assert_eq!(Quality::parse(".5").unwrap().thousandths(), 500);
	/// assert_eq!(Quality::parse("0.0005").unwrap().thousandths(), 0);
	/// assert!(Quality::parse("1.1").is_err());
	/// ```
	pub fn parse(input: &str) -> NegotiationResult<Self> {
		let invalid = || NegotiationError::quality(input);
		let bytes = input.as_bytes();

		match bytes {
			b"0" => return Ok(Self::MIN),
			b"1" => return Ok(Self::MAX),
			[b'1', b'.', rest @ ..] => {
				if !rest.is_empty() && rest.iter().all(|&ch| ch == b'0') {
					return Ok(Self::MAX);
				}
				return Err(invalid());
			}
			_ => {}
		}

		let fraction = match bytes {
			[b'0', b'.', rest @ ..] | [b'.', rest @ ..] => rest,
			_ => return Err(invalid()),
		};
		if fraction.is_empty() || !fraction.iter().all(|&ch| is_digit(ch)) {
			return Err(invalid());
		}

		Ok(Self(round_fraction(fraction)))
	}
}

/// Converts the decimal digits after the point into thousandths, rounding
/// half to even on the first dropped digit group.
fn round_fraction(digits: &[u8]) -> u16 {
	let digit = |i: usize| digits.get(i).map_or(0, |&ch| u16::from(ch - b'0'));
	let base = digit(0) * 100 + digit(1) * 10 + digit(2);

	let Some((&first, rest)) = digits.get(3..).and_then(<[u8]>::split_first) else {
		return base;
	};
	let tail_is_zero = rest.iter().all(|&ch| ch == b'0');
	let round_up = match first {
		b'0'..=b'4' => false,
		b'5' if tail_is_zero => base % 2 == 1,
		_ => true,
	};

	if round_up { base + 1 } else { base }
}

impl Default for Quality {
	fn default() -> Self {
		Self::MAX
	}
}

impl fmt::Display for Quality {
	/// Writes the shortest exact decimal form: `0`, `1`, or `0.` followed
	/// by one to three digits.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let q = self.0;
		if q >= 1000 {
			return f.write_str("1");
		}
		if q == 0 {
			return f.write_str("0");
		}

		let (a, b, c) = (q / 100, (q / 10) % 10, q % 10);
		match (b, c) {
			(0, 0) => write!(f, "0.{a}"),
			(_, 0) => write!(f, "0.{a}{b}"),
			_ => write!(f, "0.{a}{b}{c}"),
		}
	}
}

impl fmt::Debug for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Quality {
	type Err = NegotiationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for Quality {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Quality {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
		Self::parse(&text).map_err(serde::de::Error::custom)
	}
}

//! A single acceptable item, such as `text/html;charset=utf-8;q=0.9`
//!
//! Items carry a value, an optional sub-value, a parameter map and a
//! [`Quality`]. They parse from and format to the grammar
//!
//! ```text
//! acceptable = token [ "/" token ] *( ";" token "=" ( token | quoted-string ) )
//! ```
//!
//! with linear whitespace allowed around every delimiter. A parameter named
//! `q` is consumed as the quality.

use crate::chars::{consume_quoted, consume_space, consume_token, write_token};
use crate::error::{NegotiationError, NegotiationResult};
use crate::quality::Quality;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Controls whether a `/sub-value` segment is allowed when parsing.
///
/// `Accept` uses [`SubValueMode::Required`] (`type/subtype`), while
/// `Accept-Charset`, `Accept-Encoding` and `Accept-Language` use
/// [`SubValueMode::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubValueMode {
	/// A sub-value may follow the value.
	#[default]
	Optional,
	/// A sub-value must follow the value.
	Required,
	/// No sub-value is permitted.
	Absent,
}

/// One negotiable entry.
///
/// Parameter keys are stored lowercased in a [`BTreeMap`], so formatting and
/// comparison always visit them in ascending key order.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{Acceptable, SubValueMode};
///
/// let item = Acceptable::parse("text/html; Charset=utf-8; q=0.5", SubValueMode::Required).unwrap();
/// assert_eq!(item.value, "text");
/// assert_eq!(item.sub_value.as_deref(), Some("html"));
/// assert_eq!(item.param("charset"), Some("utf-8"));
/// assert_eq!(item.quality.thousandths(), 500);
/// assert_eq!(item.to_string(), "text/html;charset=utf-8;q=0.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Acceptable {
	/// Primary value (`text`, `gzip`, `en`) or `*`. Empty only for the
	/// empty item.
	pub value: String,
	/// Sub-value (`html`) or `*`; `None` when absent.
	pub sub_value: Option<String>,
	/// Parameters other than `q`, keyed by lowercase name.
	pub params: BTreeMap<String, String>,
	/// Weight of this item.
	pub quality: Quality,
}

impl Default for Acceptable {
	fn default() -> Self {
		Self {
			value: String::new(),
			sub_value: None,
			params: BTreeMap::new(),
			quality: Quality::MAX,
		}
	}
}

impl Acceptable {
	/// Creates an item with full quality and no sub-value or parameters.
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			..Self::default()
		}
	}

	/// Sets the sub-value.
	pub fn with_sub_value(mut self, sub_value: impl Into<String>) -> Self {
		self.sub_value = Some(sub_value.into());
		self
	}

	/// Adds a parameter. The key is lowercased.
	pub fn with_param(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.params
			.insert(key.as_ref().to_ascii_lowercase(), value.into());
		self
	}

	/// Sets the quality.
	pub fn with_quality(mut self, quality: Quality) -> Self {
		self.quality = quality;
		self
	}

	/// Returns `true` for the empty item, which formats to `""`.
	pub fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	/// Looks up a parameter by its (lowercase) name.
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}

	/// Parses a single item.
	///
	/// # Errors
	///
	/// Returns a [`NegotiationError`] describing the first grammar violation,
	/// including [`NegotiationError::InvalidQuality`] for a bad `q` value.
	pub fn parse(input: &str, mode: SubValueMode) -> NegotiationResult<Self> {
		let input = consume_space(input);
		let (value, rest) = consume_token(input).ok_or_else(|| NegotiationError::token(input))?;
		let mut input = consume_space(rest);

		let has_sub_value = match mode {
			SubValueMode::Optional => input.starts_with('/'),
			SubValueMode::Required => {
				if !input.starts_with('/') {
					return Err(NegotiationError::structure('/', input));
				}
				true
			}
			SubValueMode::Absent => false,
		};

		let mut sub_value = None;
		if has_sub_value {
			input = consume_space(&input[1..]);
			let (token, rest) =
				consume_token(input).ok_or_else(|| NegotiationError::token(input))?;
			sub_value = Some(token.to_string());
			input = consume_space(rest);
		}

		let mut params = BTreeMap::new();
		let mut quality = Quality::MAX;
		while let Some(rest) = input.strip_prefix(';') {
			input = consume_space(rest);
			let (name, rest) = consume_token(input).ok_or_else(|| NegotiationError::token(input))?;
			input = consume_space(rest);

			input = input
				.strip_prefix('=')
				.ok_or_else(|| NegotiationError::structure('=', input))?;
			input = consume_space(input);

			let (param_value, rest) =
				consume_quoted(input).ok_or_else(|| quoted_error(input))?;
			input = consume_space(rest);

			let name = name.to_ascii_lowercase();
			if name == "q" {
				quality = Quality::parse(&param_value)?;
			} else {
				params.insert(name, param_value.into_owned());
			}
		}

		if !input.is_empty() {
			return Err(NegotiationError::structure(';', input));
		}

		Ok(Self {
			value: value.to_string(),
			sub_value,
			params,
			quality,
		})
	}

	/// Orders items by specificity: more parameters first, then concrete
	/// values before `*`, then concrete sub-values before `*`, then higher
	/// quality first.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::Acceptable;
	/// use std::cmp::Ordering;
	///
	/// let html = Acceptable::new("text").with_sub_value("html");
	/// let any = Acceptable::new("text").with_sub_value("*");
	/// assert_eq!(html.compare(&any), Ordering::Less);
	/// ```
	pub fn compare(&self, other: &Self) -> Ordering {
		compare_params(&self.params, &other.params)
			.then_with(|| compare_values(&self.value, &other.value))
			.then_with(|| {
				compare_values(
					self.sub_value.as_deref().unwrap_or(""),
					other.sub_value.as_deref().unwrap_or(""),
				)
			})
			.then_with(|| other.quality.cmp(&self.quality))
	}
}

fn quoted_error(input: &str) -> NegotiationError {
	if input.starts_with('"') {
		NegotiationError::quoted(input)
	} else {
		NegotiationError::token(input)
	}
}

/// Plain string order, except `*` sorts after every other value.
fn compare_values(a: &str, b: &str) -> Ordering {
	match (a, b) {
		_ if a == b => Ordering::Equal,
		("*", _) => Ordering::Greater,
		(_, "*") => Ordering::Less,
		_ => a.cmp(b),
	}
}

/// More parameters sort first; equal counts compare pairwise by key order.
fn compare_params(a: &BTreeMap<String, String>, b: &BTreeMap<String, String>) -> Ordering {
	b.len().cmp(&a.len()).then_with(|| a.iter().cmp(b.iter()))
}

impl fmt::Display for Acceptable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.value.is_empty() {
			return Ok(());
		}

		let mut out = String::with_capacity(32);
		write_token(&mut out, &self.value);
		if let Some(sub_value) = self.sub_value.as_deref().filter(|s| !s.is_empty()) {
			out.push('/');
			write_token(&mut out, sub_value);
		}
		for (key, value) in &self.params {
			out.push(';');
			write_token(&mut out, key);
			out.push('=');
			write_token(&mut out, value);
		}
		f.write_str(&out)?;

		if self.quality < Quality::MAX {
			write!(f, ";q={}", self.quality)?;
		}
		Ok(())
	}
}

impl FromStr for Acceptable {
	type Err = NegotiationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s, SubValueMode::Optional)
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for Acceptable {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Acceptable {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		Self::parse(&text, SubValueMode::Optional).map_err(serde::de::Error::custom)
	}
}

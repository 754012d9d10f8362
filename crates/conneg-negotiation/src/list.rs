//! Comma-separated lists of acceptable items

use crate::acceptable::{Acceptable, SubValueMode};
use crate::chars::trim_space;
use crate::error::{NegotiationError, NegotiationResult};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordered sequence of [`Acceptable`] items, as found in one header value.
///
/// A list is not sorted on construction; call [`List::sort`] to put it in
/// specificity order.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{List, SubValueMode};
///
/// let mut list = List::parse("*/*;q=0.1, text/html, text/*;q=0.9", SubValueMode::Required).unwrap();
/// list.sort();
/// assert_eq!(list.to_string(), "text/html, text/*;q=0.9, */*;q=0.1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct List(Vec<Acceptable>);

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
	Unquoted,
	Quoted,
	Escaped,
}

impl List {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Acceptable> {
		self.0.iter()
	}

	pub fn push(&mut self, item: Acceptable) {
		self.0.push(item);
	}

	pub fn as_slice(&self) -> &[Acceptable] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<Acceptable> {
		self.0
	}

	/// Parses a header value into a list.
	///
	/// Items are split on commas outside quoted strings. Empty and
	/// whitespace-only segments are skipped, so `""` yields an empty list.
	///
	/// # Errors
	///
	/// Returns the error of the first item that fails to parse; no partial
	/// list is produced.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{List, SubValueMode};
	///
	/// let list = List::parse(r#"foo;weird="a,b", , bar"#, SubValueMode::Optional).unwrap();
	/// assert_eq!(list.len(), 2);
	/// assert_eq!(list.as_slice()[0].param("weird"), Some("a,b"));
	/// ```
	pub fn parse(input: &str, mode: SubValueMode) -> NegotiationResult<Self> {
		let mut items = Vec::new();
		let mut push_segment = |segment: &str| -> NegotiationResult<()> {
			let segment = trim_space(segment);
			if !segment.is_empty() {
				items.push(Acceptable::parse(segment, mode)?);
			}
			Ok(())
		};

		let mut state = ScanState::Unquoted;
		let mut start = 0;
		for (i, ch) in input.bytes().enumerate() {
			state = match (state, ch) {
				(ScanState::Escaped, _) => ScanState::Quoted,
				(ScanState::Quoted, b'\\') => ScanState::Escaped,
				(ScanState::Quoted, b'"') => ScanState::Unquoted,
				(ScanState::Unquoted, b'"') => ScanState::Quoted,
				(ScanState::Unquoted, b',') => {
					push_segment(&input[start..i])?;
					start = i + 1;
					ScanState::Unquoted
				}
				(state, _) => state,
			};
		}
		push_segment(&input[start..])?;

		Ok(Self(items))
	}

	/// Sorts the list by [`Acceptable::compare`].
	pub fn sort(&mut self) {
		self.0.sort_by(Acceptable::compare);
	}

	/// Returns `true` if the list is in specificity order.
	pub fn is_sorted(&self) -> bool {
		self.0
			.is_sorted_by(|a, b| a.compare(b) != Ordering::Greater)
	}

	/// Returns the list in specificity order, cloning only when it is not
	/// already sorted.
	pub fn sorted(&self) -> Cow<'_, List> {
		if self.is_sorted() {
			return Cow::Borrowed(self);
		}
		let mut copy = self.clone();
		copy.sort();
		Cow::Owned(copy)
	}
}

impl fmt::Display for List {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, item) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{item}")?;
		}
		Ok(())
	}
}

impl FromStr for List {
	type Err = NegotiationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s, SubValueMode::Optional)
	}
}

impl From<Vec<Acceptable>> for List {
	fn from(items: Vec<Acceptable>) -> Self {
		Self(items)
	}
}

impl FromIterator<Acceptable> for List {
	fn from_iter<I: IntoIterator<Item = Acceptable>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for List {
	type Item = Acceptable;
	type IntoIter = std::vec::IntoIter<Acceptable>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a List {
	type Item = &'a Acceptable;
	type IntoIter = std::slice::Iter<'a, Acceptable>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for List {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for List {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		Self::parse(&text, SubValueMode::Optional).map_err(serde::de::Error::custom)
	}
}

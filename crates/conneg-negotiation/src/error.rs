//! Error types for header parsing and negotiation configuration.

use thiserror::Error;

/// Errors produced while parsing acceptable items, lists and qualities.
///
/// Every parse variant carries the unconsumed remainder of the input at the
/// point where the grammar was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
	/// A token was expected but none was found.
	#[error("expect token, got {input:?}")]
	MalformedToken {
		/// Remaining input.
		input: String,
	},

	/// A specific delimiter (`/`, `=` or `;`) was expected.
	#[error("expect '{expected}', got {input:?}")]
	MalformedStructure {
		/// The delimiter that was expected.
		expected: char,
		/// Remaining input.
		input: String,
	},

	/// A quoted string was unterminated or contained a control character.
	#[error("expect token or quoted string, got {input:?}")]
	MalformedQuotedString {
		/// Remaining input.
		input: String,
	},

	/// The text does not match the quality grammar.
	#[error("invalid quality {input:?}")]
	InvalidQuality {
		/// The rejected quality text.
		input: String,
	},

	/// Pattern cache configuration was rejected.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

impl NegotiationError {
	pub(crate) fn token(input: &str) -> Self {
		Self::MalformedToken {
			input: input.to_string(),
		}
	}

	pub(crate) fn structure(expected: char, input: &str) -> Self {
		Self::MalformedStructure {
			expected,
			input: input.to_string(),
		}
	}

	pub(crate) fn quoted(input: &str) -> Self {
		Self::MalformedQuotedString {
			input: input.to_string(),
		}
	}

	pub(crate) fn quality(input: &str) -> Self {
		Self::InvalidQuality {
			input: input.to_string(),
		}
	}
}

/// Result type alias for parsing and configuration operations.
pub type NegotiationResult<T> = Result<T, NegotiationError>;

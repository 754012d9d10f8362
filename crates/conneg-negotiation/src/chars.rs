//! Byte classes and primitive consumers shared by every parser.
//!
//! All consumers operate on `&str` but inspect single bytes. Token and
//! delimiter bytes are ASCII, so every split point lands on a UTF-8
//! character boundary.

use std::borrow::Cow;

const TOKEN_MISC: &[u8] = b"!#$%&'*+-.^_`|~";

/// Linear whitespace: space or horizontal tab.
#[inline]
pub fn is_lws(ch: u8) -> bool {
	ch == b' ' || ch == b'\t'
}

#[inline]
pub fn is_digit(ch: u8) -> bool {
	ch.is_ascii_digit()
}

/// Returns `true` for bytes allowed in an unquoted token.
#[inline]
pub fn is_token(ch: u8) -> bool {
	ch.is_ascii_alphanumeric() || TOKEN_MISC.contains(&ch)
}

/// Control characters other than linear whitespace.
#[inline]
pub fn is_control(ch: u8) -> bool {
	if is_lws(ch) {
		return false;
	}
	ch < 0x20 || ch == 0x7f
}

/// Returns `true` if `s` is non-empty and made only of token bytes.
pub fn is_token_str(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(is_token)
}

/// Skips leading linear whitespace.
pub fn consume_space(input: &str) -> &str {
	input.trim_start_matches([' ', '\t'])
}

/// Strips linear whitespace from both ends.
pub fn trim_space(input: &str) -> &str {
	input.trim_matches([' ', '\t'])
}

/// Consumes a token, returning it and the remaining input.
///
/// Returns `None` when the input does not start with a token byte.
pub fn consume_token(input: &str) -> Option<(&str, &str)> {
	let end = input
		.bytes()
		.position(|ch| !is_token(ch))
		.unwrap_or(input.len());
	if end == 0 {
		return None;
	}
	Some(input.split_at(end))
}

/// Consumes either a quoted string or a bare token.
///
/// Quoted strings honour `\` escapes; the unescaped content is returned.
/// An unterminated string or a raw control character inside the quotes
/// yields `None`.
pub fn consume_quoted(input: &str) -> Option<(Cow<'_, str>, &str)> {
	let bytes = input.as_bytes();
	if bytes.first() != Some(&b'"') {
		return consume_token(input).map(|(token, rest)| (Cow::Borrowed(token), rest));
	}

	let mut buf = Vec::with_capacity(bytes.len());
	let mut in_escape = false;
	for (i, &ch) in bytes.iter().enumerate().skip(1) {
		if is_control(ch) {
			return None;
		}
		if in_escape {
			buf.push(ch);
			in_escape = false;
		} else if ch == b'\\' {
			in_escape = true;
		} else if ch == b'"' {
			let quoted = String::from_utf8(buf).ok()?;
			return Some((Cow::Owned(quoted), &input[i + 1..]));
		} else {
			buf.push(ch);
		}
	}
	None
}

/// Appends `token` to `out`, quoting and escaping it unless it is `*` or a
/// valid bare token.
pub fn write_token(out: &mut String, token: &str) {
	if token == "*" || is_token_str(token) {
		out.push_str(token);
		return;
	}

	out.reserve(token.len() + 2);
	out.push('"');
	for ch in token.chars() {
		if ch == '"' || ch == '\\' {
			out.push('\\');
		}
		out.push(ch);
	}
	out.push('"');
}

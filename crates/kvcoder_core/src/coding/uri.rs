use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while validating a URI reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
	/// Input string was empty.
	#[error("empty uri")]
	Empty,
	/// A character outside the RFC 3986 reference grammar was found.
	#[error("invalid character {ch:?} at byte {at}")]
	InvalidChar {
		/// Offending character.
		ch: char,
		/// Byte offset of the character.
		at: usize,
	},
	/// A `%` was not followed by two hex digits.
	#[error("malformed percent-escape at byte {at}")]
	BadEscape {
		/// Byte offset of the `%`.
		at: usize,
	},
}

/// Validated URI reference (absolute or relative).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
	/// Validate `input` as a URI reference.
	pub fn parse(input: &str) -> Result<Self, UriError> {
		if input.is_empty() {
			return Err(UriError::Empty);
		}

		let bytes = input.as_bytes();
		let mut idx = 0;
		while idx < bytes.len() {
			let byte = bytes[idx];
			if byte == b'%' {
				let valid = bytes.get(idx + 1).is_some_and(u8::is_ascii_hexdigit) && bytes.get(idx + 2).is_some_and(u8::is_ascii_hexdigit);
				if !valid {
					return Err(UriError::BadEscape { at: idx });
				}
				idx += 3;
				continue;
			}
			if !is_uri_byte(byte) {
				let ch = input[idx..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
				return Err(UriError::InvalidChar { ch, at: idx });
			}
			idx += 1;
		}

		Ok(Self(input.to_owned()))
	}

	/// Reference text.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Scheme component when the reference is absolute.
	pub fn scheme(&self) -> Option<&str> {
		let (scheme, _) = self.0.split_once(':')?;
		let mut chars = scheme.chars();
		let first = chars.next()?;
		let valid = first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
		valid.then_some(scheme)
	}
}

fn is_uri_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric()
		|| matches!(
			byte,
			b'-' | b'.' | b'_' | b'~' | b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
		)
}

impl fmt::Display for Uri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for Uri {
	type Err = UriError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl AsRef<str> for Uri {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

use std::fmt;

use crate::coding::{Error, Result};

/// Root marker printed before every rendered path.
const ROOT: &str = "SELF";

/// One step from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
	/// Select a keyed-map entry by its declared key.
	Key(String),
	/// Select an ordered-list element by zero-based index.
	Index(usize),
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Key(key) => write!(f, ".{key}"),
			Self::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Ordered segments locating a node from the root of a value tree.
///
/// Paths are only ever extended: every descent produces a new owned copy with one
/// more segment, so a container never observes its children's locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath {
	segments: Vec<PathSegment>,
}

impl CodingPath {
	/// Empty path pointing at the root value.
	pub const fn root() -> Self {
		Self { segments: Vec::new() }
	}

	/// Ordered path segments.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	/// Number of segments below the root.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// True when the path points at the root value.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Last segment, if any.
	pub fn last(&self) -> Option<&PathSegment> {
		self.segments.last()
	}

	/// Copy of `self` extended with a key segment.
	pub fn appending_key(&self, key: impl Into<String>) -> Self {
		self.appending(PathSegment::Key(key.into()))
	}

	/// Copy of `self` extended with an index segment.
	pub fn appending_index(&self, index: usize) -> Self {
		self.appending(PathSegment::Index(index))
	}

	/// Copy of `self` extended with `segment`.
	pub fn appending(&self, segment: PathSegment) -> Self {
		let mut segments = Vec::with_capacity(self.segments.len() + 1);
		segments.extend_from_slice(&self.segments);
		segments.push(segment);
		Self { segments }
	}

	/// Parse dotted key syntax with `[index]` selectors, optionally rooted at `SELF`.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || Error::InvalidPath {
			path: Self::root(),
			description: format!("invalid coding path `{input}`"),
		};

		let rest = input.strip_prefix(ROOT).unwrap_or(input);
		let bytes = rest.as_bytes();
		let mut idx = 0_usize;
		let mut segments = Vec::new();
		let mut expect_key = !input.starts_with(ROOT) && !rest.is_empty();

		while idx < bytes.len() || expect_key {
			if expect_key {
				let start = idx;
				while idx < bytes.len() && bytes[idx] != b'.' && bytes[idx] != b'[' {
					idx += 1;
				}
				if idx == start {
					return Err(invalid());
				}
				segments.push(PathSegment::Key(rest[start..idx].to_owned()));
				expect_key = false;
				continue;
			}

			match bytes[idx] {
				b'.' => {
					idx += 1;
					expect_key = true;
				}
				b'[' => {
					idx += 1;
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
						return Err(invalid());
					}
					let number = rest[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					segments.push(PathSegment::Index(number));
					idx += 1;
				}
				_ => return Err(invalid()),
			}
		}

		Ok(Self { segments })
	}
}

impl fmt::Display for CodingPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(ROOT)?;
		for segment in &self.segments {
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}

impl FromIterator<PathSegment> for CodingPath {
	fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
		Self {
			segments: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests;

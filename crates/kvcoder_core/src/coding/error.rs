use std::fmt::Display;

use thiserror::Error;

use crate::coding::CodingPath;

/// Crate-local result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while decoding or encoding between typed data and [`Value`](crate::coding::Value) trees.
///
/// Every variant carries the coding path of the node being processed when the
/// failure happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
	/// A value is present but not of, or coercible to, the requested shape.
	#[error("type mismatch at {path}: {description}")]
	TypeMismatch {
		/// Location of the offending value.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// The location holds null (or the nil strategy's placeholder) where a value was required.
	#[error("value not found at {path}: {description}")]
	ValueNotFound {
		/// Location of the null value.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// A keyed container has no entry for the requested key.
	#[error("key `{key}` not found at {path}: {description}")]
	KeyNotFound {
		/// Storage key that was looked up.
		key: String,
		/// Location of the keyed container.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// An unkeyed container has no element at the requested index.
	#[error("index {index} not found at {path}: {description}")]
	IndexNotFound {
		/// Requested element index.
		index: usize,
		/// Location of the unkeyed container.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// The base type is plausible but a further semantic parse failed.
	#[error("data corrupted at {path}: {description}")]
	DataCorrupted {
		/// Location of the malformed value.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// A typed value cannot be represented in the dynamic value space.
	#[error("invalid value at {path}: {description}")]
	InvalidValue {
		/// Location the value was written to.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
	/// A textual coding path could not be parsed.
	#[error("{description}")]
	InvalidPath {
		/// Always the root path.
		path: CodingPath,
		/// Human-readable detail.
		description: String,
	},
}

impl Error {
	pub(crate) fn type_mismatch(path: &CodingPath, expected: &str, found: &str) -> Self {
		Self::TypeMismatch {
			path: path.clone(),
			description: format!("expected {expected}, found {found}"),
		}
	}

	pub(crate) fn value_not_found(path: &CodingPath, expected: &str) -> Self {
		Self::ValueNotFound {
			path: path.clone(),
			description: format!("expected {expected}, found null"),
		}
	}

	pub(crate) fn key_not_found(path: &CodingPath, key: &str) -> Self {
		Self::KeyNotFound {
			key: key.to_owned(),
			path: path.clone(),
			description: format!("no value associated with key `{key}`"),
		}
	}

	pub(crate) fn index_not_found(path: &CodingPath, index: usize, count: usize) -> Self {
		Self::IndexNotFound {
			index,
			path: path.clone(),
			description: format!("unkeyed container is at end ({count} elements)"),
		}
	}

	pub(crate) fn data_corrupted(path: &CodingPath, description: impl Into<String>) -> Self {
		Self::DataCorrupted {
			path: path.clone(),
			description: description.into(),
		}
	}

	pub(crate) fn invalid_value(path: &CodingPath, description: impl Into<String>) -> Self {
		Self::InvalidValue {
			path: path.clone(),
			description: description.into(),
		}
	}

	/// Coding path recorded when the error was raised.
	pub fn path(&self) -> &CodingPath {
		match self {
			Self::TypeMismatch { path, .. }
			| Self::ValueNotFound { path, .. }
			| Self::KeyNotFound { path, .. }
			| Self::IndexNotFound { path, .. }
			| Self::DataCorrupted { path, .. }
			| Self::InvalidValue { path, .. }
			| Self::InvalidPath { path, .. } => path,
		}
	}

	/// Human-readable detail without the path prefix.
	pub fn description(&self) -> &str {
		match self {
			Self::TypeMismatch { description, .. }
			| Self::ValueNotFound { description, .. }
			| Self::KeyNotFound { description, .. }
			| Self::IndexNotFound { description, .. }
			| Self::DataCorrupted { description, .. }
			| Self::InvalidValue { description, .. }
			| Self::InvalidPath { description, .. } => description,
		}
	}

	fn path_mut(&mut self) -> &mut CodingPath {
		match self {
			Self::TypeMismatch { path, .. }
			| Self::ValueNotFound { path, .. }
			| Self::KeyNotFound { path, .. }
			| Self::IndexNotFound { path, .. }
			| Self::DataCorrupted { path, .. }
			| Self::InvalidValue { path, .. }
			| Self::InvalidPath { path, .. } => path,
		}
	}

	/// Stamp `path` onto errors raised without location (by serde-generated code).
	///
	/// Errors that already carry a non-root path keep it, so the innermost frame wins.
	pub(crate) fn located(mut self, path: &CodingPath) -> Self {
		let slot = self.path_mut();
		if slot.is_empty() && !path.is_empty() {
			*slot = path.clone();
		}
		self
	}
}

impl serde::de::Error for Error {
	fn custom<T: Display>(msg: T) -> Self {
		Self::DataCorrupted {
			path: CodingPath::root(),
			description: msg.to_string(),
		}
	}

	fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
		Self::TypeMismatch {
			path: CodingPath::root(),
			description: format!("expected {exp}, found {unexp}"),
		}
	}

	fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
		Self::IndexNotFound {
			index: len,
			path: CodingPath::root(),
			description: format!("expected {exp}, found {len} elements"),
		}
	}

	fn missing_field(field: &'static str) -> Self {
		Self::KeyNotFound {
			key: field.to_owned(),
			path: CodingPath::root(),
			description: format!("no value associated with key `{field}`"),
		}
	}
}

impl serde::ser::Error for Error {
	fn custom<T: Display>(msg: T) -> Self {
		Self::InvalidValue {
			path: CodingPath::root(),
			description: msg.to_string(),
		}
	}
}

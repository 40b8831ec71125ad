use std::fmt;
use std::sync::Arc;

use crate::coding::Value;

/// Marker written for nil by [`NilStrategy::string_null`].
pub(crate) const STRING_NULL: &str = "$null";

/// Predicate recognizing a placeholder sentinel.
pub type NilPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// How nil is represented when encoding and recognized when decoding.
#[derive(Clone)]
pub enum NilStrategy {
	/// Nil entries vanish from maps and lists.
	Removed,
	/// Nil is written as `sentinel`; `is_null` recognizes it when decoding.
	Placeholder {
		/// Value stored in place of nil.
		sentinel: Value,
		/// Recognizes `sentinel` (and equivalents) as nil.
		is_null: NilPredicate,
	},
}

impl NilStrategy {
	/// Placeholder strategy with a caller-chosen sentinel and predicate.
	pub fn placeholder(sentinel: Value, is_null: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
		Self::Placeholder {
			sentinel,
			is_null: Arc::new(is_null),
		}
	}

	/// Property-list interop: nil is the string `"$null"`.
	pub fn string_null() -> Self {
		Self::placeholder(Value::String(STRING_NULL.to_owned()), |value| value.as_str() == Some(STRING_NULL))
	}

	/// JSON interop: nil is the JSON null object.
	///
	/// The dynamic value space has a single null, so this coincides with [`NilStrategy::default`].
	pub fn json_null() -> Self {
		Self::default()
	}

	/// True when `value` must be treated as nil.
	pub fn is_null(&self, value: &Value) -> bool {
		match self {
			Self::Removed => value.is_null(),
			Self::Placeholder { is_null, .. } => value.is_null() || is_null(value),
		}
	}

	/// Value written for nil, or `None` when nils are dropped.
	pub fn placeholder_value(&self) -> Option<&Value> {
		match self {
			Self::Removed => None,
			Self::Placeholder { sentinel, .. } => Some(sentinel),
		}
	}
}

impl Default for NilStrategy {
	fn default() -> Self {
		Self::placeholder(Value::Null, Value::is_null)
	}
}

impl fmt::Debug for NilStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Removed => f.write_str("Removed"),
			Self::Placeholder { sentinel, .. } => f.debug_struct("Placeholder").field("sentinel", sentinel).finish_non_exhaustive(),
		}
	}
}

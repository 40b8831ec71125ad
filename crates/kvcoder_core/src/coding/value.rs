use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::coding::{BoxedNumber, CodingPath, Numeric, PathSegment, Uri};

/// Untyped value exchanged with JSON-shaped and property-list-shaped producers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// UTF-8 string.
	String(String),
	/// Signed 8-bit integer.
	I8(i8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// High-precision decimal.
	Decimal(rust_decimal::Decimal),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// Point in time.
	Timestamp(DateTime<Utc>),
	/// URI reference.
	Uri(Uri),
	/// Ordered list.
	Array(Vec<Value>),
	/// Keyed map with unique keys.
	Map(BTreeMap<String, Value>),
	/// Native numeric box awaiting classification.
	Number(BoxedNumber),
}

impl Value {
	/// Diagnostic name of the value's kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::String(_) => "string",
			Self::I8(_) => "int8",
			Self::I16(_) => "int16",
			Self::I32(_) => "int32",
			Self::I64(_) => "int64",
			Self::U8(_) => "uint8",
			Self::U16(_) => "uint16",
			Self::U32(_) => "uint32",
			Self::U64(_) => "uint64",
			Self::F32(_) => "float32",
			Self::F64(_) => "float64",
			Self::Decimal(_) => "decimal",
			Self::Bytes(_) => "bytes",
			Self::Timestamp(_) => "timestamp",
			Self::Uri(_) => "uri",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
			Self::Number(_) => "number",
		}
	}

	/// True for the explicit null marker only; nil strategies may widen this.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Numeric view of integer, float, and classifiable boxed values.
	///
	/// Decimals are not included; boolean boxes return `None`.
	pub fn as_numeric(&self) -> Option<Numeric> {
		match *self {
			Self::I8(v) => Some(Numeric::Signed(i64::from(v))),
			Self::I16(v) => Some(Numeric::Signed(i64::from(v))),
			Self::I32(v) => Some(Numeric::Signed(i64::from(v))),
			Self::I64(v) => Some(Numeric::Signed(v)),
			Self::U8(v) => Some(Numeric::Unsigned(u64::from(v))),
			Self::U16(v) => Some(Numeric::Unsigned(u64::from(v))),
			Self::U32(v) => Some(Numeric::Unsigned(u64::from(v))),
			Self::U64(v) => Some(Numeric::Unsigned(v)),
			Self::F32(v) => Some(Numeric::Float(f64::from(v))),
			Self::F64(v) => Some(Numeric::Float(v)),
			Self::Number(boxed) => boxed.classify(),
			_ => None,
		}
	}

	/// String payload, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Element slice, if this is an ordered list.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Entry map, if this is a keyed map.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Map entry for `key`; `None` for missing keys and non-map values.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map()?.get(key)
	}

	/// Follow `path` from this value; `None` when any segment is missing.
	pub fn pointer(&self, path: &CodingPath) -> Option<&Value> {
		path.segments().iter().try_fold(self, |current, segment| match segment {
			PathSegment::Key(key) => current.get(key),
			PathSegment::Index(index) => current.as_array()?.get(*index),
		})
	}
}

macro_rules! value_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value)
				}
			}
		)*
	};
}

value_from!(
	bool => Bool,
	String => String,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	rust_decimal::Decimal => Decimal,
	Vec<u8> => Bytes,
	DateTime<Utc> => Timestamp,
	Uri => Uri,
	Vec<Value> => Array,
	BTreeMap<String, Value> => Map,
	BoxedNumber => Number,
);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl FromIterator<Value> for Value {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self::Array(iter.into_iter().collect())
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

#[cfg(test)]
mod tests;

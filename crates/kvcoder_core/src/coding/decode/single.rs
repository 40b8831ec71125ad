use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Deserialize;
use tracing::trace;

use crate::coding::{CodingPath, CoerceInteger, DecodeOptions, Error, KeyedContainer, Numeric, Result, UnkeyedContainer, Uri, Value, coerce};

/// Decoding view over one value and its location.
///
/// Implements [`serde::Deserializer`], so any `Deserialize` type can be read from it.
#[derive(Debug, Clone)]
pub struct SingleValueContainer<'de> {
	pub(super) value: &'de Value,
	pub(super) path: CodingPath,
	pub(super) options: Arc<DecodeOptions>,
}

macro_rules! integer_getters {
	($($name:ident => $ty:ty),* $(,)?) => {
		$(
			#[doc = concat!("Read the value as `", stringify!($ty), "` under the configured integer strategy.")]
			pub fn $name(&self) -> Result<$ty> {
				self.decode_integer::<$ty>()
			}
		)*
	};
}

impl<'de> SingleValueContainer<'de> {
	/// Root container over `value`.
	pub fn new(value: &'de Value, options: Arc<DecodeOptions>) -> Self {
		Self {
			value,
			path: CodingPath::root(),
			options,
		}
	}

	pub(super) fn child(&self, value: &'de Value, path: CodingPath) -> Self {
		Self {
			value,
			path,
			options: Arc::clone(&self.options),
		}
	}

	/// Wrapped value.
	pub fn value(&self) -> &'de Value {
		self.value
	}

	/// Location of the wrapped value.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Options of the running decode call.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	/// True when the nil strategy treats the wrapped value as nil.
	pub fn is_null(&self) -> bool {
		self.options.nil.is_null(self.value)
	}

	pub(crate) fn mismatch(&self, expected: &str) -> Error {
		if self.is_null() {
			Error::value_not_found(&self.path, expected)
		} else {
			Error::type_mismatch(&self.path, expected, self.value.kind())
		}
	}

	fn present(&self, expected: &str) -> Result<&'de Value> {
		if self.is_null() {
			return Err(Error::value_not_found(&self.path, expected));
		}
		Ok(self.value)
	}

	/// Read a boolean; boolean-class boxed numbers qualify, other numbers do not.
	pub fn decode_bool(&self) -> Result<bool> {
		match self.present("bool")? {
			Value::Bool(flag) => Ok(*flag),
			Value::Number(boxed) => boxed.as_flag().ok_or_else(|| self.mismatch("bool")),
			_ => Err(self.mismatch("bool")),
		}
	}

	/// Borrow a string.
	pub fn decode_str(&self) -> Result<&'de str> {
		match self.present("string")? {
			Value::String(text) => Ok(text),
			_ => Err(self.mismatch("string")),
		}
	}

	/// Read an owned string.
	pub fn decode_string(&self) -> Result<String> {
		self.decode_str().map(str::to_owned)
	}

	/// Borrow a byte payload.
	pub fn decode_bytes(&self) -> Result<&'de [u8]> {
		match self.present("bytes")? {
			Value::Bytes(bytes) => Ok(bytes),
			_ => Err(self.mismatch("bytes")),
		}
	}

	integer_getters!(
		decode_i8 => i8,
		decode_i16 => i16,
		decode_i32 => i32,
		decode_i64 => i64,
		decode_u8 => u8,
		decode_u16 => u16,
		decode_u32 => u32,
		decode_u64 => u64,
	);

	fn decode_integer<T: CoerceInteger>(&self) -> Result<T> {
		let source = match self.present(T::NAME)? {
			Value::Decimal(decimal) => decimal.to_f64().map(Numeric::Float),
			other => other.as_numeric(),
		};
		let source = source.ok_or_else(|| self.mismatch(T::NAME))?;
		let strategy = self.options.integers;
		coerce::<T>(source, strategy).ok_or_else(|| Error::TypeMismatch {
			path: self.path.clone(),
			description: format!("{source} is not representable as {} under {strategy} coercion", T::NAME),
		})
	}

	/// Read a 64-bit float; every numeric source is accepted and widened.
	pub fn decode_f64(&self) -> Result<f64> {
		match self.present("float64")? {
			Value::Decimal(decimal) => decimal.to_f64().ok_or_else(|| self.mismatch("float64")),
			other => other.as_numeric().map(Numeric::as_f64).ok_or_else(|| self.mismatch("float64")),
		}
	}

	/// Read a 32-bit float; every numeric source is accepted.
	pub fn decode_f32(&self) -> Result<f32> {
		match self.value {
			Value::F32(v) => Ok(*v),
			_ => self.decode_f64().map(|v| v as f32).map_err(|_| self.mismatch("float32")),
		}
	}

	/// Read a decimal from a decimal, integer, or float value.
	pub fn decode_decimal(&self) -> Result<rust_decimal::Decimal> {
		let source = match self.present("decimal")? {
			Value::Decimal(decimal) => return Ok(*decimal),
			other => other.as_numeric().ok_or_else(|| self.mismatch("decimal"))?,
		};
		match source {
			Numeric::Signed(v) => Ok(rust_decimal::Decimal::from(v)),
			Numeric::Unsigned(v) => Ok(rust_decimal::Decimal::from(v)),
			Numeric::Float(v) => rust_decimal::Decimal::from_f64(v).ok_or_else(|| Error::TypeMismatch {
				path: self.path.clone(),
				description: format!("{v} is not representable as decimal"),
			}),
		}
	}

	/// Read a timestamp through the configured date strategy.
	pub fn decode_timestamp(&self) -> Result<DateTime<Utc>> {
		self.options.dates.decode(self)
	}

	/// Read a URI from a URI value or a non-empty well-formed string.
	pub fn decode_uri(&self) -> Result<Uri> {
		match self.present("uri")? {
			Value::Uri(uri) => Ok(uri.clone()),
			Value::String(text) => Uri::parse(text).map_err(|err| Error::data_corrupted(&self.path, format!("invalid uri string `{text}`: {err}"))),
			_ => Err(self.mismatch("uri")),
		}
	}

	/// Open the wrapped map as a keyed container.
	pub fn keyed_container(&self) -> Result<KeyedContainer<'de>> {
		match self.present("map")? {
			Value::Map(entries) => {
				trace!(path = %self.path, len = entries.len(), "open keyed container");
				Ok(KeyedContainer::new(self.value, entries, self.path.clone(), Arc::clone(&self.options)))
			}
			_ => Err(self.mismatch("map")),
		}
	}

	/// Open the wrapped list as an unkeyed container.
	pub fn unkeyed_container(&self) -> Result<UnkeyedContainer<'de>> {
		match self.present("array")? {
			Value::Array(items) => {
				trace!(path = %self.path, len = items.len(), "open unkeyed container");
				Ok(UnkeyedContainer::new(items, self.path.clone(), Arc::clone(&self.options)))
			}
			_ => Err(self.mismatch("array")),
		}
	}

	/// Decode the wrapped value as `T`.
	pub fn decode<T: Deserialize<'de>>(&self) -> Result<T> {
		T::deserialize(self.clone())
	}
}

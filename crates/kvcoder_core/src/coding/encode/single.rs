use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use super::encoded::{SharedSlot, resolve_slot, slot_provider};
use crate::coding::{CodingPath, EncodeOptions, EncodedValue, Error, KeyedEncoder, Result, UnkeyedEncoder, Uri, Value};

/// Encoding slot holding at most one value, last write wins.
///
/// Implements [`serde::Serializer`]; clones share the same slot.
#[derive(Debug, Clone)]
pub struct SingleValueEncoder {
	slot: SharedSlot,
	path: CodingPath,
	options: Arc<EncodeOptions>,
}

macro_rules! scalar_writers {
	($($name:ident => $ty:ty),* $(,)?) => {
		$(
			#[doc = concat!("Store a `", stringify!($ty), "` leaf.")]
			pub fn $name(&self, value: $ty) {
				self.encode_value(Value::from(value));
			}
		)*
	};
}

impl SingleValueEncoder {
	/// Root encoder for one encode call.
	pub fn new(options: Arc<EncodeOptions>) -> Self {
		Self::at(CodingPath::root(), options)
	}

	pub(super) fn at(path: CodingPath, options: Arc<EncodeOptions>) -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
			path,
			options,
		}
	}

	/// Location this encoder writes to.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Options of the running encode call.
	pub fn options(&self) -> &EncodeOptions {
		&self.options
	}

	pub(super) fn options_arc(&self) -> &Arc<EncodeOptions> {
		&self.options
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	fn store(&self, encoded: EncodedValue) {
		*self.slot.borrow_mut() = Some(encoded);
	}

	/// Store the nil marker.
	pub fn encode_nil(&self) {
		self.store(EncodedValue::Null);
	}

	/// Store a finished value.
	pub fn encode_value(&self, value: Value) {
		self.store(EncodedValue::Value(value));
	}

	scalar_writers!(
		encode_bool => bool,
		encode_i8 => i8,
		encode_i16 => i16,
		encode_i32 => i32,
		encode_i64 => i64,
		encode_u8 => u8,
		encode_u16 => u16,
		encode_u32 => u32,
		encode_u64 => u64,
		encode_f32 => f32,
		encode_f64 => f64,
		encode_decimal => rust_decimal::Decimal,
		encode_uri => Uri,
	);

	/// Store a string leaf.
	pub fn encode_str(&self, value: &str) {
		self.encode_value(Value::from(value));
	}

	/// Store a bytes leaf.
	pub fn encode_bytes(&self, value: &[u8]) {
		self.encode_value(Value::Bytes(value.to_vec()));
	}

	/// Store a timestamp through the configured date strategy.
	pub fn encode_timestamp(&self, date: &DateTime<Utc>) {
		self.encode_value(self.options.dates.encode(date));
	}

	/// Serialize `value` into this slot.
	pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
		value.serialize(self.clone()).map_err(|err| err.located(&self.path))
	}

	/// Replace the slot with a keyed container and return it.
	pub fn keyed_container(&self) -> KeyedEncoder {
		trace!(path = %self.path, "open keyed encoder");
		let keyed = KeyedEncoder::new(self.path.clone(), Arc::clone(&self.options));
		self.store(keyed.provider());
		keyed
	}

	/// Replace the slot with an unkeyed container and return it.
	pub fn unkeyed_container(&self) -> UnkeyedEncoder {
		trace!(path = %self.path, "open unkeyed encoder");
		let unkeyed = UnkeyedEncoder::new(self.path.clone(), Arc::clone(&self.options));
		self.store(unkeyed.provider());
		unkeyed
	}

	/// Deferred view of this slot for a parent container.
	pub(super) fn provider(&self) -> EncodedValue {
		slot_provider(Rc::clone(&self.slot), Arc::clone(&self.options))
	}

	/// Move the written node out, for parents that finished serializing into this slot.
	pub(super) fn into_encoded(self) -> EncodedValue {
		let written = self.slot.borrow_mut().take();
		written.unwrap_or_else(|| EncodedValue::Value(Value::Map(Default::default())))
	}

	/// Resolve the slot through the nil strategy.
	pub fn resolve(&self) -> Option<Value> {
		resolve_slot(&self.slot, &self.options.nil)
	}

	pub(super) fn take_text(self, expected: &str) -> Result<String> {
		let path = self.path.clone();
		match self.into_encoded() {
			EncodedValue::Value(Value::String(text)) => Ok(text),
			_ => Err(Error::invalid_value(&path, format!("{expected} must serialize as text"))),
		}
	}
}

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use super::encoded::{SharedEntries, entries_provider};
use crate::coding::{CodingPath, EncodeOptions, EncodedValue, Result, SingleValueEncoder, UnkeyedEncoder, Value};

/// Key used by [`KeyedEncoder::super_encoder`].
const SUPER_KEY: &str = "super";

/// Encoding container accumulating key to value entries.
///
/// Keys passed in are declared field names; the configured key strategy maps them to
/// storage keys. Nil entries stay distinct from keys that were never written.
#[derive(Debug, Clone)]
pub struct KeyedEncoder {
	entries: SharedEntries,
	path: CodingPath,
	options: Arc<EncodeOptions>,
}

impl KeyedEncoder {
	pub(super) fn new(path: CodingPath, options: Arc<EncodeOptions>) -> Self {
		Self {
			entries: Rc::new(RefCell::new(BTreeMap::new())),
			path,
			options,
		}
	}

	pub(super) fn provider(&self) -> EncodedValue {
		entries_provider(Rc::clone(&self.entries), Arc::clone(&self.options))
	}

	/// Location of the map being built.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	/// Number of entries written so far, nil entries included.
	pub fn count(&self) -> usize {
		self.entries.borrow().len()
	}

	fn insert(&self, storage_key: String, encoded: EncodedValue) {
		self.entries.borrow_mut().insert(storage_key, encoded);
	}

	fn storage_key(&self, key: &str) -> String {
		self.options.keys.storage_key(key).into_owned()
	}

	/// Store the nil marker under `key`.
	pub fn encode_nil(&self, key: &str) {
		self.insert(self.storage_key(key), EncodedValue::Null);
	}

	/// Store a finished value under `key`.
	pub fn encode_value(&self, key: &str, value: Value) {
		self.insert(self.storage_key(key), EncodedValue::Value(value));
	}

	/// Serialize `value` under `key`.
	pub fn encode<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
		self.encode_stored(self.storage_key(key), self.path.appending_key(key), value)
	}

	/// Serialize `value` under `key` unless it is `None`.
	pub fn encode_if_present<T: Serialize>(&self, key: &str, value: Option<&T>) -> Result<()> {
		match value {
			Some(value) => self.encode(key, value),
			None => Ok(()),
		}
	}

	/// Serialize `value` under a storage key that bypasses the key strategy.
	pub(super) fn encode_raw<T: Serialize + ?Sized>(&self, storage_key: &str, value: &T) -> Result<()> {
		self.encode_stored(storage_key.to_owned(), self.path.appending_key(storage_key), value)
	}

	fn encode_stored<T: Serialize + ?Sized>(&self, storage_key: String, path: CodingPath, value: &T) -> Result<()> {
		let child = SingleValueEncoder::at(path, Arc::clone(&self.options));
		child.encode(value)?;
		self.insert(storage_key, child.into_encoded());
		Ok(())
	}

	/// Create a keyed container stored under `key` and return it.
	pub fn nested_container(&self, key: &str) -> KeyedEncoder {
		self.nested_container_raw(&self.storage_key(key), key)
	}

	/// Create an unkeyed container stored under `key` and return it.
	pub fn nested_unkeyed_container(&self, key: &str) -> UnkeyedEncoder {
		self.nested_unkeyed_container_raw(&self.storage_key(key), key)
	}

	pub(super) fn nested_container_raw(&self, storage_key: &str, declared: &str) -> KeyedEncoder {
		trace!(path = %self.path, key = storage_key, "nested keyed encoder");
		let nested = KeyedEncoder::new(self.path.appending_key(declared), Arc::clone(&self.options));
		self.insert(storage_key.to_owned(), nested.provider());
		nested
	}

	pub(super) fn nested_unkeyed_container_raw(&self, storage_key: &str, declared: &str) -> UnkeyedEncoder {
		trace!(path = %self.path, key = storage_key, "nested unkeyed encoder");
		let nested = UnkeyedEncoder::new(self.path.appending_key(declared), Arc::clone(&self.options));
		self.insert(storage_key.to_owned(), nested.provider());
		nested
	}

	/// Single-value encoder stored under the `super` key.
	pub fn super_encoder(&self) -> SingleValueEncoder {
		self.super_encoder_for(SUPER_KEY)
	}

	/// Single-value encoder stored under `key`.
	pub fn super_encoder_for(&self, key: &str) -> SingleValueEncoder {
		let encoder = SingleValueEncoder::at(self.path.appending_key(key), Arc::clone(&self.options));
		self.insert(self.storage_key(key), encoder.provider());
		encoder
	}
}

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::coding::{CodingPath, DecodeOptions, Error, Result, SingleValueContainer, UnkeyedContainer, Value};

/// Decoding view over a keyed map.
///
/// Keys passed to lookups are declared field names; the configured key strategy maps
/// them to storage keys. A missing key is always [`Error::KeyNotFound`], never nil.
#[derive(Debug, Clone)]
pub struct KeyedContainer<'de> {
	value: &'de Value,
	entries: &'de BTreeMap<String, Value>,
	path: CodingPath,
	options: Arc<DecodeOptions>,
}

impl<'de> KeyedContainer<'de> {
	pub(super) fn new(value: &'de Value, entries: &'de BTreeMap<String, Value>, path: CodingPath, options: Arc<DecodeOptions>) -> Self {
		Self {
			value,
			entries,
			path,
			options,
		}
	}

	/// Location of the map.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	/// Every storage key present in the map.
	pub fn all_keys(&self) -> Vec<&'de str> {
		self.entries.keys().map(String::as_str).collect()
	}

	/// Raw map entries.
	pub(super) fn entries(&self) -> &'de BTreeMap<String, Value> {
		self.entries
	}

	pub(super) fn options_arc(&self) -> &Arc<DecodeOptions> {
		&self.options
	}

	/// True when the storage key for `key` exists.
	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(self.options.keys.storage_key(key).as_ref())
	}

	/// Raw value stored for `key`.
	pub fn value_for(&self, key: &str) -> Result<&'de Value> {
		let storage = self.options.keys.storage_key(key);
		self.entries
			.get(storage.as_ref())
			.ok_or_else(|| Error::key_not_found(&self.path, &storage))
	}

	/// True when `key` exists and holds nil.
	pub fn decode_nil(&self, key: &str) -> Result<bool> {
		Ok(self.super_decoder_for(key)?.is_null())
	}

	/// Decode the entry for `key` as `T`.
	pub fn decode<T: Deserialize<'de>>(&self, key: &str) -> Result<T> {
		self.super_decoder_for(key)?.decode()
	}

	/// Decode the entry for `key`, yielding `None` when the key is absent or nil.
	pub fn decode_if_present<T: Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
		if !self.contains(key) {
			return Ok(None);
		}
		let child = self.super_decoder_for(key)?;
		if child.is_null() {
			return Ok(None);
		}
		child.decode().map(Some)
	}

	/// Open the entry for `key` as a keyed container.
	pub fn nested_container(&self, key: &str) -> Result<KeyedContainer<'de>> {
		self.super_decoder_for(key)?.keyed_container()
	}

	/// Open the entry for `key` as an unkeyed container.
	pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedContainer<'de>> {
		self.super_decoder_for(key)?.unkeyed_container()
	}

	/// Re-wrap the whole map as a single value at this container's location.
	pub fn super_decoder(&self) -> SingleValueContainer<'de> {
		SingleValueContainer {
			value: self.value,
			path: self.path.clone(),
			options: Arc::clone(&self.options),
		}
	}

	/// Wrap the entry for `key` as a single value.
	pub fn super_decoder_for(&self, key: &str) -> Result<SingleValueContainer<'de>> {
		let value = self.value_for(key)?;
		Ok(SingleValueContainer {
			value,
			path: self.path.appending_key(key),
			options: Arc::clone(&self.options),
		})
	}
}

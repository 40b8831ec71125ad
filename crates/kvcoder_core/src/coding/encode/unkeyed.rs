use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use super::encoded::{SharedItems, items_provider};
use crate::coding::{CodingPath, EncodeOptions, EncodedValue, KeyedEncoder, Result, SingleValueEncoder, Value};

/// Append-only encoding container for ordered lists.
#[derive(Debug, Clone)]
pub struct UnkeyedEncoder {
	items: SharedItems,
	path: CodingPath,
	options: Arc<EncodeOptions>,
}

impl UnkeyedEncoder {
	pub(super) fn new(path: CodingPath, options: Arc<EncodeOptions>) -> Self {
		Self {
			items: Rc::new(RefCell::new(Vec::new())),
			path,
			options,
		}
	}

	pub(super) fn provider(&self) -> EncodedValue {
		items_provider(Rc::clone(&self.items), Arc::clone(&self.options))
	}

	/// Location of the list being built.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	/// Number of elements appended so far, nil elements included.
	pub fn count(&self) -> usize {
		self.items.borrow().len()
	}

	fn push(&self, encoded: EncodedValue) {
		self.items.borrow_mut().push(encoded);
	}

	fn next_path(&self) -> CodingPath {
		self.path.appending_index(self.count())
	}

	/// Append the nil marker.
	pub fn encode_nil(&self) {
		self.push(EncodedValue::Null);
	}

	/// Append a finished value.
	pub fn encode_value(&self, value: Value) {
		self.push(EncodedValue::Value(value));
	}

	/// Serialize and append `value`.
	pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
		let child = SingleValueEncoder::at(self.next_path(), Arc::clone(&self.options));
		child.encode(value)?;
		self.push(child.into_encoded());
		Ok(())
	}

	/// Append a keyed container and return it.
	pub fn nested_container(&self) -> KeyedEncoder {
		trace!(path = %self.path, index = self.count(), "nested keyed encoder");
		let nested = KeyedEncoder::new(self.next_path(), Arc::clone(&self.options));
		self.push(nested.provider());
		nested
	}

	/// Append an unkeyed container and return it.
	pub fn nested_unkeyed_container(&self) -> UnkeyedEncoder {
		trace!(path = %self.path, index = self.count(), "nested unkeyed encoder");
		let nested = UnkeyedEncoder::new(self.next_path(), Arc::clone(&self.options));
		self.push(nested.provider());
		nested
	}

	/// Append a single-value slot and return it.
	pub fn super_encoder(&self) -> SingleValueEncoder {
		let encoder = SingleValueEncoder::at(self.next_path(), Arc::clone(&self.options));
		self.push(encoder.provider());
		encoder
	}
}

use std::any::Any;
use std::sync::Arc;

use serde::Deserialize;

use crate::coding::{CodingPath, DecodeOptions, Error, KeyedContainer, Result, SingleValueContainer, Value};

/// Decoding view over an ordered list with a read cursor.
///
/// Every read consumes one element. The cursor moves before the element is decoded,
/// so a failed read still leaves the cursor past the failing element.
#[derive(Debug, Clone)]
pub struct UnkeyedContainer<'de> {
	items: &'de [Value],
	path: CodingPath,
	options: Arc<DecodeOptions>,
	index: usize,
}

impl<'de> UnkeyedContainer<'de> {
	pub(super) fn new(items: &'de [Value], path: CodingPath, options: Arc<DecodeOptions>) -> Self {
		Self {
			items,
			path,
			options,
			index: 0,
		}
	}

	/// Location of the list.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Typed entry of the caller's auxiliary context.
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.options.user_info(key)
	}

	/// Number of elements.
	pub fn count(&self) -> usize {
		self.items.len()
	}

	/// True when every element has been consumed.
	pub fn is_at_end(&self) -> bool {
		self.index >= self.items.len()
	}

	/// Index of the next element to read.
	pub fn current_index(&self) -> usize {
		self.index
	}

	pub(super) fn remaining(&self) -> usize {
		self.items.len().saturating_sub(self.index)
	}

	/// Consume the next element as a single-value container.
	///
	/// Reading past the end fails with [`Error::IndexNotFound`] and leaves the cursor in place.
	pub fn super_decoder(&mut self) -> Result<SingleValueContainer<'de>> {
		let Some(value) = self.items.get(self.index) else {
			return Err(Error::index_not_found(&self.path, self.index, self.items.len()));
		};
		let path = self.path.appending_index(self.index);
		self.index += 1;
		Ok(SingleValueContainer {
			value,
			path,
			options: Arc::clone(&self.options),
		})
	}

	/// Consume the next element and report whether it is nil.
	pub fn decode_nil(&mut self) -> Result<bool> {
		Ok(self.super_decoder()?.is_null())
	}

	/// Consume the next element and decode it as `T`.
	pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T> {
		self.super_decoder()?.decode()
	}

	/// Consume the next element as a keyed container.
	pub fn nested_container(&mut self) -> Result<KeyedContainer<'de>> {
		self.super_decoder()?.keyed_container()
	}

	/// Consume the next element as an unkeyed container.
	pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'de>> {
		self.super_decoder()?.unkeyed_container()
	}
}

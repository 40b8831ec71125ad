use std::any::type_name;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::coding::{DecodeOptions, Result, Value};

mod de;
mod keyed;
mod single;
mod unkeyed;

/// Keyed-map decoding container.
pub use keyed::KeyedContainer;
/// Single-value decoding container and serde deserializer.
pub use single::SingleValueContainer;
/// Ordered-list decoding container.
pub use unkeyed::UnkeyedContainer;

/// Decode `value` into `T`.
///
/// Fails on the first shape, type, or range mismatch found by the depth-first walk.
pub fn decode<'de, T: Deserialize<'de>>(value: &'de Value, options: &DecodeOptions) -> Result<T> {
	decode_with(value, options, |container| container.decode())
}

/// Decode `value` with hand-written logic driving the root container.
pub fn decode_with<'de, T>(value: &'de Value, options: &DecodeOptions, read: impl FnOnce(SingleValueContainer<'de>) -> Result<T>) -> Result<T> {
	debug!(target_type = type_name::<T>(), kind = value.kind(), "decode");
	read(SingleValueContainer::new(value, Arc::new(options.clone())))
}

#[cfg(test)]
mod tests;

use std::any::type_name;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::coding::{EncodeOptions, Result, Value};

mod encoded;
mod keyed;
mod ser;
mod single;
mod unkeyed;

/// In-flight encoded node.
pub use encoded::EncodedValue;
/// Keyed-map encoding container.
pub use keyed::KeyedEncoder;
/// Single-value encoder and serde serializer.
pub use single::SingleValueEncoder;
/// Ordered-list encoding container.
pub use unkeyed::UnkeyedEncoder;

/// Encode `value` into a dynamic value tree.
///
/// Returns `None` only when the whole value resolves to nil under [`NilStrategy::Removed`](crate::coding::NilStrategy::Removed).
pub fn encode<T: Serialize + ?Sized>(value: &T, options: &EncodeOptions) -> Result<Option<Value>> {
	run(type_name::<T>(), options, |encoder| encoder.encode(value))
}

/// Encode with hand-written logic driving the root encoder.
pub fn encode_with(options: &EncodeOptions, write: impl FnOnce(SingleValueEncoder) -> Result<()>) -> Result<Option<Value>> {
	run("custom", options, write)
}

fn run(source: &str, options: &EncodeOptions, write: impl FnOnce(SingleValueEncoder) -> Result<()>) -> Result<Option<Value>> {
	debug!(source_type = source, "encode");
	let root = SingleValueEncoder::new(Arc::new(options.clone()));
	write(root.clone())?;
	Ok(root.resolve())
}

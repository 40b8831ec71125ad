//! Bridge between statically typed serde data and dynamic key-value trees.

/// Dynamic value model, coercion strategies, and the decoding/encoding engines.
pub mod coding;

mod boxed;
mod case;
mod date;
mod decode;
mod encode;
mod error;
mod json;
mod leaf;
mod nil;
mod numeric;
mod options;
mod path;
mod uri;
mod value;
mod value_serde;

/// Native numeric box and its classification.
pub use boxed::{BoxedNumber, NumberClass};
/// Key casing strategy and snake_case transform.
pub use case::{KeyStrategy, to_snake_case};
/// Date coding strategies.
pub use date::{DateDecodeFn, DateEncodeFn, DateStrategy, DateTransform};
/// Decoding engine entry points and containers.
pub use decode::{KeyedContainer, SingleValueContainer, UnkeyedContainer, decode, decode_with};
/// Encoding engine entry points and containers.
pub use encode::{EncodedValue, KeyedEncoder, SingleValueEncoder, UnkeyedEncoder, encode, encode_with};
/// Error and result aliases.
pub use error::{Error, Result};
/// JSON interop helpers.
pub use json::to_json;
/// Built-in structured leaf types.
pub use leaf::{Blob, Decimal, Timestamp};
/// Nil handling strategy.
pub use nil::{NilPredicate, NilStrategy};
/// Numeric coercion policy and helpers.
pub use numeric::{CoerceInteger, IntStrategy, Numeric, RoundingRule, coerce};
/// Per-call decode/encode configuration.
pub use options::{DecodeOptions, EncodeOptions, UserInfo};
/// Coding path types.
pub use path::{CodingPath, PathSegment};
/// URI reference leaf type.
pub use uri::{Uri, UriError};
/// Dynamic value tree.
pub use value::Value;

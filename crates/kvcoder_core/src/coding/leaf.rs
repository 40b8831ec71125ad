//! Structured leaf types stored directly as [`Value`](crate::coding::Value) leaves.
//!
//! `Timestamp`, `Decimal` and `Uri` announce themselves with reserved newtype-struct
//! names. The coding engines recognize those names and read or write the matching
//! leaf; any other serde format sees a plain newtype around the textual form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::coding::Uri;

pub(crate) const TIMESTAMP_TOKEN: &str = "$kvcoder::Timestamp";
pub(crate) const DECIMAL_TOKEN: &str = "$kvcoder::Decimal";
pub(crate) const URI_TOKEN: &str = "$kvcoder::Uri";

/// RFC 3339 in UTC for years 0000-9999; other years carry an explicit sign.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Textual form of a timestamp leaf, lossless across chrono's whole year range.
pub(crate) fn timestamp_text(date: &DateTime<Utc>) -> String {
	date.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses RFC 3339 with any offset, or the signed-year form of [`timestamp_text`].
pub(crate) fn parse_timestamp_text(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
	DateTime::parse_from_rfc3339(text)
		.map(|date| date.with_timezone(&Utc))
		.or_else(|_| NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(|naive| naive.and_utc()))
}

/// Point in time stored as a timestamp leaf (subject to the date strategy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

/// High-precision decimal stored as a decimal leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(pub rust_decimal::Decimal);

/// Byte buffer stored as a bytes leaf.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Blob(pub Vec<u8>);

impl From<DateTime<Utc>> for Timestamp {
	fn from(value: DateTime<Utc>) -> Self {
		Self(value)
	}
}

impl From<rust_decimal::Decimal> for Decimal {
	fn from(value: rust_decimal::Decimal) -> Self {
		Self(value)
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}

impl Serialize for Timestamp {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_newtype_struct(TIMESTAMP_TOKEN, &timestamp_text(&self.0))
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_newtype_struct(TIMESTAMP_TOKEN, TextVisitor::<Self>::new("an RFC 3339 timestamp"))
	}
}

impl FromStr for Timestamp {
	type Err = chrono::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_timestamp_text(s).map(Self)
	}
}

impl Serialize for Decimal {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_newtype_struct(DECIMAL_TOKEN, &self.0.to_string())
	}
}

impl<'de> Deserialize<'de> for Decimal {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_newtype_struct(DECIMAL_TOKEN, TextVisitor::<Self>::new("a decimal number"))
	}
}

impl FromStr for Decimal {
	type Err = rust_decimal::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		rust_decimal::Decimal::from_str(s).map(Self)
	}
}

impl Serialize for Uri {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_newtype_struct(URI_TOKEN, self.as_str())
	}
}

impl<'de> Deserialize<'de> for Uri {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_newtype_struct(URI_TOKEN, TextVisitor::<Self>::new("a URI reference"))
	}
}

/// Parses a leaf from its textual form, whether delivered directly or inside a newtype.
struct TextVisitor<T> {
	expecting: &'static str,
	marker: std::marker::PhantomData<T>,
}

impl<T> TextVisitor<T> {
	fn new(expecting: &'static str) -> Self {
		Self {
			expecting,
			marker: std::marker::PhantomData,
		}
	}
}

impl<'de, T> Visitor<'de> for TextVisitor<T>
where
	T: FromStr,
	T::Err: fmt::Display,
{
	type Value = T;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.expecting)
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
		v.parse().map_err(|err| E::custom(format!("`{v}` is not {}: {err}", self.expecting)))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
		self.visit_str(&v.to_string())
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
		self.visit_str(&v.to_string())
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
		self.visit_str(&v.to_string())
	}

	fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
		deserializer.deserialize_any(self)
	}
}

impl Serialize for Blob {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_bytes(&self.0)
	}
}

impl<'de> Deserialize<'de> for Blob {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_byte_buf(BlobVisitor)
	}
}

struct BlobVisitor;

impl<'de> Visitor<'de> for BlobVisitor {
	type Value = Blob;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a byte buffer")
	}

	fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Blob, E> {
		Ok(Blob(v.to_vec()))
	}

	fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Blob, E> {
		Ok(Blob(v))
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Blob, A::Error> {
		let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(byte) = seq.next_element::<u8>()? {
			bytes.push(byte);
		}
		Ok(Blob(bytes))
	}
}

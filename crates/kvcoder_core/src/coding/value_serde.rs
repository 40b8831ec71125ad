use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::coding::{Blob, Decimal, Numeric, Timestamp, Value};

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_none(),
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::String(v) => serializer.serialize_str(v),
			Self::I8(v) => serializer.serialize_i8(*v),
			Self::I16(v) => serializer.serialize_i16(*v),
			Self::I32(v) => serializer.serialize_i32(*v),
			Self::I64(v) => serializer.serialize_i64(*v),
			Self::U8(v) => serializer.serialize_u8(*v),
			Self::U16(v) => serializer.serialize_u16(*v),
			Self::U32(v) => serializer.serialize_u32(*v),
			Self::U64(v) => serializer.serialize_u64(*v),
			Self::F32(v) => serializer.serialize_f32(*v),
			Self::F64(v) => serializer.serialize_f64(*v),
			Self::Decimal(v) => Decimal(*v).serialize(serializer),
			Self::Bytes(v) => serializer.serialize_bytes(v),
			Self::Timestamp(v) => Timestamp(*v).serialize(serializer),
			Self::Uri(v) => v.serialize(serializer),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Self::Number(boxed) => match (boxed.as_flag(), boxed.classify()) {
				(Some(flag), _) => serializer.serialize_bool(flag),
				(None, Some(Numeric::Signed(v))) => serializer.serialize_i64(v),
				(None, Some(Numeric::Unsigned(v))) => serializer.serialize_u64(v),
				(None, Some(Numeric::Float(v))) => serializer.serialize_f64(v),
				(None, None) => serializer.serialize_none(),
			},
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("any value")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i8<E: de::Error>(self, v: i8) -> Result<Value, E> {
		Ok(Value::I8(v))
	}

	fn visit_i16<E: de::Error>(self, v: i16) -> Result<Value, E> {
		Ok(Value::I16(v))
	}

	fn visit_i32<E: de::Error>(self, v: i32) -> Result<Value, E> {
		Ok(Value::I32(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
		Ok(Value::I64(v))
	}

	fn visit_u8<E: de::Error>(self, v: u8) -> Result<Value, E> {
		Ok(Value::U8(v))
	}

	fn visit_u16<E: de::Error>(self, v: u16) -> Result<Value, E> {
		Ok(Value::U16(v))
	}

	fn visit_u32<E: de::Error>(self, v: u32) -> Result<Value, E> {
		Ok(Value::U32(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
		Ok(Value::U64(v))
	}

	fn visit_f32<E: de::Error>(self, v: f32) -> Result<Value, E> {
		Ok(Value::F32(v))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
		Ok(Value::F64(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
		Ok(Value::String(v.to_owned()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
		Ok(Value::String(v))
	}

	fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Value, E> {
		Ok(Value::Bytes(v.to_vec()))
	}

	fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Value, E> {
		Ok(Value::Bytes(v))
	}

	fn visit_none<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::Array(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
		let mut entries = BTreeMap::new();
		while let Some((key, value)) = map.next_entry::<String, Value>()? {
			entries.insert(key, value);
		}
		Ok(Value::Map(entries))
	}
}

impl From<Blob> for Value {
	fn from(blob: Blob) -> Self {
		Self::Bytes(blob.0)
	}
}

impl From<Timestamp> for Value {
	fn from(stamp: Timestamp) -> Self {
		Self::Timestamp(stamp.0)
	}
}

impl From<Decimal> for Value {
	fn from(decimal: Decimal) -> Self {
		Self::Decimal(decimal.0)
	}
}

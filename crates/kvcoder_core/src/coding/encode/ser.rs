use std::sync::Arc;

use serde::Serialize;
use serde::ser::{self, Impossible};

use crate::coding::leaf::{DECIMAL_TOKEN, TIMESTAMP_TOKEN, URI_TOKEN, parse_timestamp_text};
use crate::coding::{CodingPath, Error, KeyedEncoder, Result, SingleValueEncoder, UnkeyedEncoder, Uri, Value};

impl SingleValueEncoder {
	fn encode_leaf_text<T: Serialize + ?Sized>(&self, token: &'static str, inner: &T) -> Result<()> {
		let scratch = SingleValueEncoder::at(self.coding_path().clone(), Arc::clone(self.options_arc()));
		scratch.encode(inner)?;
		let text = scratch.take_text(token)?;
		let path = self.coding_path();
		match token {
			TIMESTAMP_TOKEN => {
				let date = parse_timestamp_text(&text).map_err(|err| Error::invalid_value(path, format!("timestamp text `{text}` is malformed: {err}")))?;
				self.encode_timestamp(&date);
			}
			DECIMAL_TOKEN => {
				let decimal = text
					.parse::<rust_decimal::Decimal>()
					.map_err(|err| Error::invalid_value(path, format!("decimal text `{text}` is malformed: {err}")))?;
				self.encode_decimal(decimal);
			}
			_ => {
				let uri = Uri::parse(&text).map_err(|err| Error::invalid_value(path, format!("uri text `{text}` is malformed: {err}")))?;
				self.encode_uri(uri);
			}
		}
		Ok(())
	}
}

impl ser::Serializer for SingleValueEncoder {
	type Ok = ();
	type Error = Error;
	type SerializeSeq = UnkeyedEncoder;
	type SerializeTuple = UnkeyedEncoder;
	type SerializeTupleStruct = UnkeyedEncoder;
	type SerializeTupleVariant = UnkeyedEncoder;
	type SerializeMap = MapEncoder;
	type SerializeStruct = KeyedEncoder;
	type SerializeStructVariant = KeyedEncoder;

	fn serialize_bool(self, v: bool) -> Result<()> {
		self.encode_bool(v);
		Ok(())
	}

	fn serialize_i8(self, v: i8) -> Result<()> {
		self.encode_i8(v);
		Ok(())
	}

	fn serialize_i16(self, v: i16) -> Result<()> {
		self.encode_i16(v);
		Ok(())
	}

	fn serialize_i32(self, v: i32) -> Result<()> {
		self.encode_i32(v);
		Ok(())
	}

	fn serialize_i64(self, v: i64) -> Result<()> {
		self.encode_i64(v);
		Ok(())
	}

	fn serialize_i128(self, v: i128) -> Result<()> {
		if let Ok(narrow) = i64::try_from(v) {
			self.encode_i64(narrow);
		} else if let Ok(narrow) = u64::try_from(v) {
			self.encode_u64(narrow);
		} else {
			return Err(Error::invalid_value(self.coding_path(), format!("{v} does not fit 64-bit storage")));
		}
		Ok(())
	}

	fn serialize_u8(self, v: u8) -> Result<()> {
		self.encode_u8(v);
		Ok(())
	}

	fn serialize_u16(self, v: u16) -> Result<()> {
		self.encode_u16(v);
		Ok(())
	}

	fn serialize_u32(self, v: u32) -> Result<()> {
		self.encode_u32(v);
		Ok(())
	}

	fn serialize_u64(self, v: u64) -> Result<()> {
		self.encode_u64(v);
		Ok(())
	}

	fn serialize_u128(self, v: u128) -> Result<()> {
		let narrow = u64::try_from(v).map_err(|_| Error::invalid_value(self.coding_path(), format!("{v} does not fit 64-bit storage")))?;
		self.encode_u64(narrow);
		Ok(())
	}

	fn serialize_f32(self, v: f32) -> Result<()> {
		self.encode_f32(v);
		Ok(())
	}

	fn serialize_f64(self, v: f64) -> Result<()> {
		self.encode_f64(v);
		Ok(())
	}

	fn serialize_char(self, v: char) -> Result<()> {
		self.encode_str(v.encode_utf8(&mut [0; 4]));
		Ok(())
	}

	fn serialize_str(self, v: &str) -> Result<()> {
		self.encode_str(v);
		Ok(())
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<()> {
		self.encode_bytes(v);
		Ok(())
	}

	fn serialize_none(self) -> Result<()> {
		self.encode_nil();
		Ok(())
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<()> {
		self.encode_value(Value::Null);
		Ok(())
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
		self.serialize_unit()
	}

	fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<()> {
		self.encode_str(variant);
		Ok(())
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, name: &'static str, value: &T) -> Result<()> {
		match name {
			TIMESTAMP_TOKEN | DECIMAL_TOKEN | URI_TOKEN => self.encode_leaf_text(name, value),
			_ => value.serialize(self),
		}
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(self, _name: &'static str, _variant_index: u32, variant: &'static str, value: &T) -> Result<()> {
		self.keyed_container().encode_raw(variant, value)
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<UnkeyedEncoder> {
		Ok(self.unkeyed_container())
	}

	fn serialize_tuple(self, _len: usize) -> Result<UnkeyedEncoder> {
		Ok(self.unkeyed_container())
	}

	fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<UnkeyedEncoder> {
		Ok(self.unkeyed_container())
	}

	fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<UnkeyedEncoder> {
		Ok(self.keyed_container().nested_unkeyed_container_raw(variant, variant))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<MapEncoder> {
		Ok(MapEncoder {
			keyed: self.keyed_container(),
			pending_key: None,
		})
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<KeyedEncoder> {
		Ok(self.keyed_container())
	}

	fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<KeyedEncoder> {
		Ok(self.keyed_container().nested_container_raw(variant, variant))
	}
}

impl ser::SerializeSeq for UnkeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.encode(value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

impl ser::SerializeTuple for UnkeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.encode(value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

impl ser::SerializeTupleStruct for UnkeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.encode(value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

impl ser::SerializeTupleVariant for UnkeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.encode(value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

impl ser::SerializeStruct for KeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
		self.encode(key, value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

impl ser::SerializeStructVariant for KeyedEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
		self.encode(key, value)
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

/// Map entries stored under verbatim (stringified) keys.
pub struct MapEncoder {
	keyed: KeyedEncoder,
	pending_key: Option<String>,
}

impl ser::SerializeMap for MapEncoder {
	type Ok = ();
	type Error = Error;

	fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
		self.pending_key = Some(key.serialize(MapKeySerializer { path: self.keyed.coding_path() })?);
		Ok(())
	}

	fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		match self.pending_key.take() {
			Some(key) => self.keyed.encode_raw(&key, value),
			None => Err(Error::invalid_value(self.keyed.coding_path(), "map value written before its key")),
		}
	}

	fn end(self) -> Result<()> {
		Ok(())
	}
}

/// Stringifies scalar map keys.
struct MapKeySerializer<'p> {
	path: &'p CodingPath,
}

impl MapKeySerializer<'_> {
	fn unsupported(&self, kind: &str) -> Error {
		Error::invalid_value(self.path, format!("map keys must be strings, integers, chars or bools, found {kind}"))
	}
}

macro_rules! key_to_string {
	($($method:ident => $ty:ty),* $(,)?) => {
		$(
			fn $method(self, v: $ty) -> Result<String> {
				Ok(v.to_string())
			}
		)*
	};
}

impl ser::Serializer for MapKeySerializer<'_> {
	type Ok = String;
	type Error = Error;
	type SerializeSeq = Impossible<String, Error>;
	type SerializeTuple = Impossible<String, Error>;
	type SerializeTupleStruct = Impossible<String, Error>;
	type SerializeTupleVariant = Impossible<String, Error>;
	type SerializeMap = Impossible<String, Error>;
	type SerializeStruct = Impossible<String, Error>;
	type SerializeStructVariant = Impossible<String, Error>;

	key_to_string!(
		serialize_bool => bool,
		serialize_i8 => i8,
		serialize_i16 => i16,
		serialize_i32 => i32,
		serialize_i64 => i64,
		serialize_i128 => i128,
		serialize_u8 => u8,
		serialize_u16 => u16,
		serialize_u32 => u32,
		serialize_u64 => u64,
		serialize_u128 => u128,
		serialize_char => char,
	);

	fn serialize_str(self, v: &str) -> Result<String> {
		Ok(v.to_owned())
	}

	fn serialize_f32(self, _v: f32) -> Result<String> {
		Err(self.unsupported("float32"))
	}

	fn serialize_f64(self, _v: f64) -> Result<String> {
		Err(self.unsupported("float64"))
	}

	fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
		Err(self.unsupported("bytes"))
	}

	fn serialize_none(self) -> Result<String> {
		Err(self.unsupported("nil"))
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<String> {
		Err(self.unsupported("unit"))
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
		Err(self.unsupported("unit struct"))
	}

	fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<String> {
		Ok(variant.to_owned())
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<String> {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _value: &T) -> Result<String> {
		Err(self.unsupported("enum variant with data"))
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
		Err(self.unsupported("sequence"))
	}

	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
		Err(self.unsupported("tuple"))
	}

	fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
		Err(self.unsupported("tuple struct"))
	}

	fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant> {
		Err(self.unsupported("tuple variant"))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
		Err(self.unsupported("map"))
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
		Err(self.unsupported("struct"))
	}

	fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant> {
		Err(self.unsupported("struct variant"))
	}
}

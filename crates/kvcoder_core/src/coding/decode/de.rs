use std::collections::btree_map;
use std::sync::Arc;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeSeed, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::forward_to_deserialize_any;

use crate::coding::leaf::{DECIMAL_TOKEN, TIMESTAMP_TOKEN, URI_TOKEN, timestamp_text};
use crate::coding::{CodingPath, DecodeOptions, Error, KeyedContainer, Numeric, Result, SingleValueContainer, UnkeyedContainer, Value};

macro_rules! deserialize_leaf {
	($($method:ident => $getter:ident, $visit:ident;)*) => {
		$(
			fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
				let value = self.$getter()?;
				visitor.$visit(value).map_err(|err: Error| err.located(&self.path))
			}
		)*
	};
}

impl<'de> SingleValueContainer<'de> {
	fn struct_error(&self, err: Error) -> Error {
		match err {
			Error::KeyNotFound { key, path, .. } if path.is_empty() => {
				let storage = self.options.keys.storage_key(&key);
				Error::key_not_found(&self.path, &storage)
			}
			other => other.located(&self.path),
		}
	}
}

impl<'de> de::Deserializer<'de> for SingleValueContainer<'de> {
	type Error = Error;

	fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		if self.is_null() {
			return visitor.visit_unit().map_err(|err: Error| err.located(&self.path));
		}

		let result = match self.value {
			Value::Null => visitor.visit_unit(),
			Value::Bool(v) => visitor.visit_bool(*v),
			Value::String(v) => visitor.visit_borrowed_str(v),
			Value::I8(v) => visitor.visit_i8(*v),
			Value::I16(v) => visitor.visit_i16(*v),
			Value::I32(v) => visitor.visit_i32(*v),
			Value::I64(v) => visitor.visit_i64(*v),
			Value::U8(v) => visitor.visit_u8(*v),
			Value::U16(v) => visitor.visit_u16(*v),
			Value::U32(v) => visitor.visit_u32(*v),
			Value::U64(v) => visitor.visit_u64(*v),
			Value::F32(v) => visitor.visit_f32(*v),
			Value::F64(v) => visitor.visit_f64(*v),
			Value::Decimal(v) => visitor.visit_string(v.to_string()),
			Value::Bytes(v) => visitor.visit_borrowed_bytes(v),
			Value::Timestamp(v) => visitor.visit_string(timestamp_text(v)),
			Value::Uri(v) => visitor.visit_borrowed_str(v.as_str()),
			Value::Array(_) => visitor.visit_seq(self.unkeyed_container()?),
			Value::Map(_) => visitor.visit_map(EntriesAccess::new(self.keyed_container()?)),
			Value::Number(boxed) => match (boxed.as_flag(), boxed.classify()) {
				(Some(flag), _) => visitor.visit_bool(flag),
				(None, Some(Numeric::Signed(v))) => visitor.visit_i64(v),
				(None, Some(Numeric::Unsigned(v))) => visitor.visit_u64(v),
				(None, Some(Numeric::Float(v))) => visitor.visit_f64(v),
				(None, None) => Err(self.mismatch("number")),
			},
		};
		result.map_err(|err: Error| err.located(&self.path))
	}

	deserialize_leaf! {
		deserialize_bool => decode_bool, visit_bool;
		deserialize_i8 => decode_i8, visit_i8;
		deserialize_i16 => decode_i16, visit_i16;
		deserialize_i32 => decode_i32, visit_i32;
		deserialize_i64 => decode_i64, visit_i64;
		deserialize_u8 => decode_u8, visit_u8;
		deserialize_u16 => decode_u16, visit_u16;
		deserialize_u32 => decode_u32, visit_u32;
		deserialize_u64 => decode_u64, visit_u64;
		deserialize_f32 => decode_f32, visit_f32;
		deserialize_f64 => decode_f64, visit_f64;
		deserialize_str => decode_str, visit_borrowed_str;
		deserialize_string => decode_str, visit_borrowed_str;
		deserialize_bytes => decode_bytes, visit_borrowed_bytes;
		deserialize_byte_buf => decode_bytes, visit_borrowed_bytes;
	}

	fn deserialize_i128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let value = match self.value.as_numeric() {
			Some(Numeric::Unsigned(_)) => i128::from(self.decode_u64()?),
			_ => i128::from(self.decode_i64()?),
		};
		visitor.visit_i128(value).map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let value = self.decode_u64()?;
		visitor.visit_u128(u128::from(value)).map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let text = self.decode_str()?;
		let mut chars = text.chars();
		match (chars.next(), chars.next()) {
			(Some(ch), None) => visitor.visit_char(ch).map_err(|err: Error| err.located(&self.path)),
			_ => Err(Error::TypeMismatch {
				path: self.path.clone(),
				description: format!("expected a single character, found string of length {}", text.chars().count()),
			}),
		}
	}

	fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		if self.is_null() {
			visitor.visit_none().map_err(|err: Error| err.located(&self.path))
		} else {
			visitor.visit_some(self)
		}
	}

	fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		if !self.is_null() {
			return Err(Error::type_mismatch(&self.path, "null", self.value.kind()));
		}
		visitor.visit_unit().map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		self.deserialize_unit(visitor)
	}

	fn deserialize_newtype_struct<V: Visitor<'de>>(self, name: &'static str, visitor: V) -> Result<V::Value> {
		let result = match name {
			TIMESTAMP_TOKEN => {
				let date = self.decode_timestamp()?;
				visitor.visit_string(timestamp_text(&date))
			}
			DECIMAL_TOKEN => {
				let decimal = self.decode_decimal()?;
				visitor.visit_string(decimal.to_string())
			}
			URI_TOKEN => {
				let uri = self.decode_uri()?;
				visitor.visit_string(uri.to_string())
			}
			_ => return visitor.visit_newtype_struct(self),
		};
		result.map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let container = self.unkeyed_container()?;
		visitor.visit_seq(container).map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_tuple_struct<V: Visitor<'de>>(self, _name: &'static str, _len: usize, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let container = self.keyed_container()?;
		visitor.visit_map(EntriesAccess::new(container)).map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_struct<V: Visitor<'de>>(self, _name: &'static str, fields: &'static [&'static str], visitor: V) -> Result<V::Value> {
		let container = self.keyed_container()?;
		visitor.visit_map(StructAccess::new(container, fields)).map_err(|err: Error| self.struct_error(err))
	}

	fn deserialize_enum<V: Visitor<'de>>(self, _name: &'static str, _variants: &'static [&'static str], visitor: V) -> Result<V::Value> {
		if self.is_null() {
			return Err(Error::value_not_found(&self.path, "enum"));
		}
		let result = match self.value {
			Value::String(name) => visitor.visit_enum(BorrowedStrDeserializer::<Error>::new(name)),
			Value::Map(entries) if entries.len() == 1 => match entries.iter().next() {
				Some((name, content)) => visitor.visit_enum(VariantContainer {
					name,
					content: self.child(content, self.path.appending_key(name.as_str())),
				}),
				None => Err(self.mismatch("enum")),
			},
			_ => Err(Error::type_mismatch(&self.path, "enum variant name or single-entry map", self.value.kind())),
		};
		result.map_err(|err: Error| err.located(&self.path))
	}

	fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_str(visitor)
	}

	fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_unit()
	}
}

impl<'de> SeqAccess<'de> for UnkeyedContainer<'de> {
	type Error = Error;

	fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
		if self.is_at_end() {
			return Ok(None);
		}
		let element = self.super_decoder()?;
		let path = element.path.clone();
		seed.deserialize(element).map(Some).map_err(|err: Error| err.located(&path))
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.remaining())
	}
}

/// Struct fields driven by the declared field list, so lookups forward-transform declared names.
///
/// Storage keys no declared field maps to are offered afterwards, verbatim, so
/// `deny_unknown_fields` can reject them; other visitors skip them.
struct StructAccess<'de> {
	container: KeyedContainer<'de>,
	declared: &'static [&'static str],
	fields: std::slice::Iter<'static, &'static str>,
	undeclared: btree_map::Iter<'de, String, Value>,
	pending: Option<SingleValueContainer<'de>>,
}

impl<'de> StructAccess<'de> {
	fn new(container: KeyedContainer<'de>, fields: &'static [&'static str]) -> Self {
		let undeclared = container.entries().iter();
		Self {
			container,
			declared: fields,
			fields: fields.iter(),
			undeclared,
			pending: None,
		}
	}

	fn is_declared(&self, key: &str) -> bool {
		let keys = &self.container.options_arc().keys;
		self.declared.iter().any(|&field| field == key || keys.storage_key(field).as_ref() == key)
	}
}

impl<'de> MapAccess<'de> for StructAccess<'de> {
	type Error = Error;

	fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
		for &field in self.fields.by_ref() {
			if !self.container.contains(field) {
				continue;
			}
			self.pending = Some(self.container.super_decoder_for(field)?);
			return seed.deserialize(BorrowedStrDeserializer::<Error>::new(field)).map(Some);
		}
		while let Some((key, value)) = self.undeclared.next() {
			if self.is_declared(key) {
				continue;
			}
			self.pending = Some(SingleValueContainer {
				value,
				path: self.container.coding_path().appending_key(key.as_str()),
				options: Arc::clone(self.container.options_arc()),
			});
			return seed.deserialize(BorrowedStrDeserializer::<Error>::new(key)).map(Some);
		}
		Ok(None)
	}

	fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
		match self.pending.take() {
			Some(field) => {
				let path = field.path.clone();
				seed.deserialize(field).map_err(|err: Error| err.located(&path))
			}
			None => Err(de::Error::custom("struct value requested before its key")),
		}
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.fields.len())
	}
}

/// Raw map entries, keys passed through verbatim.
struct EntriesAccess<'de> {
	path: CodingPath,
	options: Arc<DecodeOptions>,
	entries: btree_map::Iter<'de, String, Value>,
	pending: Option<SingleValueContainer<'de>>,
}

impl<'de> EntriesAccess<'de> {
	fn new(container: KeyedContainer<'de>) -> Self {
		Self {
			path: container.coding_path().clone(),
			options: Arc::clone(container.options_arc()),
			entries: container.entries().iter(),
			pending: None,
		}
	}
}

impl<'de> MapAccess<'de> for EntriesAccess<'de> {
	type Error = Error;

	fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
		let Some((key, value)) = self.entries.next() else {
			return Ok(None);
		};
		let path = self.path.appending_key(key.as_str());
		let decoded = seed.deserialize(MapKey { key, path: &path })?;
		self.pending = Some(SingleValueContainer {
			value,
			path,
			options: Arc::clone(&self.options),
		});
		Ok(Some(decoded))
	}

	fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
		match self.pending.take() {
			Some(entry) => {
				let path = entry.path.clone();
				seed.deserialize(entry).map_err(|err: Error| err.located(&path))
			}
			None => Err(de::Error::custom("map value requested before its key")),
		}
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.entries.len())
	}
}

struct VariantContainer<'de> {
	name: &'de str,
	content: SingleValueContainer<'de>,
}

impl<'de> EnumAccess<'de> for VariantContainer<'de> {
	type Error = Error;
	type Variant = SingleValueContainer<'de>;

	fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
		let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.name))?;
		Ok((variant, self.content))
	}
}

impl<'de> VariantAccess<'de> for SingleValueContainer<'de> {
	type Error = Error;

	fn unit_variant(self) -> Result<()> {
		if self.is_null() {
			Ok(())
		} else {
			Err(Error::type_mismatch(&self.path, "null", self.value.kind()))
		}
	}

	fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
		seed.deserialize(self)
	}

	fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_tuple(self, len, visitor)
	}

	fn struct_variant<V: Visitor<'de>>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_struct(self, "", fields, visitor)
	}
}

/// Map keys are strings in storage; integer and bool keys are parsed back.
struct MapKey<'de, 'p> {
	key: &'de str,
	path: &'p CodingPath,
}

macro_rules! deserialize_parsed_key {
	($($method:ident => $ty:ty, $visit:ident;)*) => {
		$(
			fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
				let parsed = self.key.parse::<$ty>().map_err(|_| Error::TypeMismatch {
					path: self.path.clone(),
					description: format!("map key `{}` is not a valid {}", self.key, stringify!($ty)),
				})?;
				visitor.$visit(parsed).map_err(|err: Error| err.located(self.path))
			}
		)*
	};
}

impl<'de> de::Deserializer<'de> for MapKey<'de, '_> {
	type Error = Error;

	fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_borrowed_str(self.key).map_err(|err: Error| err.located(self.path))
	}

	deserialize_parsed_key! {
		deserialize_bool => bool, visit_bool;
		deserialize_i8 => i8, visit_i8;
		deserialize_i16 => i16, visit_i16;
		deserialize_i32 => i32, visit_i32;
		deserialize_i64 => i64, visit_i64;
		deserialize_u8 => u8, visit_u8;
		deserialize_u16 => u16, visit_u16;
		deserialize_u32 => u32, visit_u32;
		deserialize_u64 => u64, visit_u64;
		deserialize_char => char, visit_char;
	}

	fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_some(self)
	}

	fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		visitor.visit_newtype_struct(self)
	}

	fn deserialize_enum<V: Visitor<'de>>(self, _name: &'static str, _variants: &'static [&'static str], visitor: V) -> Result<V::Value> {
		visitor
			.visit_enum(BorrowedStrDeserializer::<Error>::new(self.key))
			.map_err(|err: Error| err.located(self.path))
	}

	forward_to_deserialize_any! {
		i128 u128 f32 f64 str string bytes byte_buf unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
	}
}

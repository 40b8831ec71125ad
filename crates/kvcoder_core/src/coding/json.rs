use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::coding::leaf::timestamp_text;
use crate::coding::{BoxedNumber, Numeric, Value};

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(flag) => Self::Bool(flag),
			serde_json::Value::Number(number) => {
				if let Some(v) = number.as_i64() {
					Self::Number(BoxedNumber::from(v))
				} else if let Some(v) = number.as_u64() {
					Self::Number(BoxedNumber::from(v))
				} else {
					Self::Number(BoxedNumber::from(number.as_f64().unwrap_or(f64::NAN)))
				}
			}
			serde_json::Value::String(text) => Self::String(text),
			serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(entries) => Self::Map(entries.into_iter().map(|(key, value)| (key, Self::from(value))).collect()),
		}
	}
}

/// Render `value` as JSON.
///
/// Bytes become base64 text, timestamps RFC 3339 text, decimals and URIs their
/// textual form, and non-finite floats `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(flag) => serde_json::Value::Bool(*flag),
		Value::String(text) => serde_json::Value::String(text.clone()),
		Value::I8(v) => (*v).into(),
		Value::I16(v) => (*v).into(),
		Value::I32(v) => (*v).into(),
		Value::I64(v) => (*v).into(),
		Value::U8(v) => (*v).into(),
		Value::U16(v) => (*v).into(),
		Value::U32(v) => (*v).into(),
		Value::U64(v) => (*v).into(),
		Value::F32(v) => float(f64::from(*v)),
		Value::F64(v) => float(*v),
		Value::Decimal(v) => serde_json::Value::String(v.to_string()),
		Value::Bytes(bytes) => serde_json::Value::String(STANDARD.encode(bytes)),
		Value::Timestamp(date) => serde_json::Value::String(timestamp_text(date)),
		Value::Uri(uri) => serde_json::Value::String(uri.to_string()),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
		Value::Map(entries) => serde_json::Value::Object(entries.iter().map(|(key, value)| (key.clone(), to_json(value))).collect()),
		Value::Number(boxed) => match (boxed.as_flag(), boxed.classify()) {
			(Some(flag), _) => serde_json::Value::Bool(flag),
			(None, Some(Numeric::Signed(v))) => v.into(),
			(None, Some(Numeric::Unsigned(v))) => v.into(),
			(None, Some(Numeric::Float(v))) => float(v),
			(None, None) => serde_json::Value::Null,
		},
	}
}

fn float(value: f64) -> serde_json::Value {
	serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

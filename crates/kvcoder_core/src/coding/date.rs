use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::coding::{Error, Result, SingleValueContainer, Value};

/// Parses a stored value into a timestamp; the error text becomes a data-corrupted description.
pub type DateDecodeFn = Arc<dyn Fn(&Value) -> std::result::Result<DateTime<Utc>, String> + Send + Sync>;
/// Renders a timestamp as a stored value.
pub type DateEncodeFn = Arc<dyn Fn(&DateTime<Utc>) -> Value + Send + Sync>;

/// User-supplied bidirectional date transform.
#[derive(Clone)]
pub struct DateTransform {
	/// Stored value to timestamp.
	pub decode: DateDecodeFn,
	/// Timestamp to stored value.
	pub encode: DateEncodeFn,
}

impl DateTransform {
	/// Build a transform from a decode and an encode closure.
	pub fn new(
		decode: impl Fn(&Value) -> std::result::Result<DateTime<Utc>, String> + Send + Sync + 'static,
		encode: impl Fn(&DateTime<Utc>) -> Value + Send + Sync + 'static,
	) -> Self {
		Self {
			decode: Arc::new(decode),
			encode: Arc::new(encode),
		}
	}
}

impl fmt::Debug for DateTransform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DateTransform").finish_non_exhaustive()
	}
}

/// How timestamps are stored.
#[derive(Debug, Clone, Default)]
pub enum DateStrategy {
	/// Store [`Value::Timestamp`] leaves unchanged.
	#[default]
	Raw,
	/// Signed milliseconds since the Unix epoch.
	MillisecondsSince1970,
	/// Signed seconds since the Unix epoch.
	SecondsSince1970,
	/// Caller-supplied transform.
	Custom(DateTransform),
}

impl DateStrategy {
	/// RFC 3339 internet date-time strings with whole seconds.
	pub fn iso8601() -> Self {
		Self::Custom(DateTransform::new(parse_rfc3339, |date| Value::String(date.to_rfc3339_opts(SecondsFormat::Secs, true))))
	}

	/// RFC 3339 internet date-time strings with millisecond fractions.
	pub fn iso8601_fractional() -> Self {
		Self::Custom(DateTransform::new(parse_rfc3339, |date| Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true))))
	}

	pub(crate) fn decode(&self, container: &SingleValueContainer<'_>) -> Result<DateTime<Utc>> {
		let path = container.coding_path();
		if container.is_null() {
			return Err(Error::value_not_found(path, "timestamp"));
		}

		match self {
			Self::Raw => match container.value() {
				Value::Timestamp(date) => Ok(*date),
				other => Err(Error::type_mismatch(path, "timestamp", other.kind())),
			},
			Self::MillisecondsSince1970 => {
				let millis = container.decode_i64()?;
				DateTime::from_timestamp_millis(millis).ok_or_else(|| Error::data_corrupted(path, format!("{millis} ms is outside the representable date range")))
			}
			Self::SecondsSince1970 => {
				let secs = container.decode_i64()?;
				DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::data_corrupted(path, format!("{secs} s is outside the representable date range")))
			}
			Self::Custom(transform) => (transform.decode)(container.value()).map_err(|description| Error::data_corrupted(path, description)),
		}
	}

	pub(crate) fn encode(&self, date: &DateTime<Utc>) -> Value {
		match self {
			Self::Raw => Value::Timestamp(*date),
			Self::MillisecondsSince1970 => Value::I64(date.timestamp_millis()),
			Self::SecondsSince1970 => Value::I64(date.timestamp()),
			Self::Custom(transform) => (transform.encode)(date),
		}
	}
}

fn parse_rfc3339(value: &Value) -> std::result::Result<DateTime<Utc>, String> {
	let text = value.as_str().ok_or_else(|| format!("expected date string, found {}", value.kind()))?;
	DateTime::parse_from_rfc3339(text)
		.map(|date| date.with_timezone(&Utc))
		.map_err(|err| format!("date string `{text}` is not RFC 3339: {err}"))
}

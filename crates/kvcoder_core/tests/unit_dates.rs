#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use kvcoder::coding::{DateStrategy, DateTransform, DecodeOptions, EncodeOptions, Error, IntStrategy, Timestamp, Value, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Event {
	at: Timestamp,
	until: Option<Timestamp>,
}

fn moment() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2021, 6, 30, 23, 59, 58).single().expect("valid date")
}

fn decode_options(dates: DateStrategy) -> DecodeOptions {
	DecodeOptions {
		dates,
		..DecodeOptions::default()
	}
}

fn encode_options(dates: DateStrategy) -> EncodeOptions {
	EncodeOptions {
		dates,
		..EncodeOptions::default()
	}
}

#[test]
fn epoch_strategies_store_integers() {
	let event = Event {
		at: Timestamp(moment()),
		until: None,
	};

	let millis = encode(&event, &encode_options(DateStrategy::MillisecondsSince1970))
		.expect("encode succeeds")
		.expect("map is present");
	assert_eq!(millis.get("at"), Some(&Value::I64(moment().timestamp_millis())));
	let back: Event = decode(&millis, &decode_options(DateStrategy::MillisecondsSince1970)).expect("decode succeeds");
	assert_eq!(back, event);

	let secs = encode(&event, &encode_options(DateStrategy::SecondsSince1970))
		.expect("encode succeeds")
		.expect("map is present");
	assert_eq!(secs.get("at"), Some(&Value::I64(1_625_097_598)));
}

#[test]
fn epoch_decoding_goes_through_integer_strategy() {
	let value = Value::from_iter([("at", Value::F64(1_625_097_598.4)), ("until", Value::Null)]);

	let exact = decode::<Event>(&value, &decode_options(DateStrategy::SecondsSince1970));
	assert!(matches!(exact, Err(Error::TypeMismatch { .. })), "{exact:?}");

	let options = DecodeOptions {
		integers: IntStrategy::Clamping(Some(kvcoder::coding::RoundingRule::Down)),
		dates: DateStrategy::SecondsSince1970,
		..DecodeOptions::default()
	};
	let event: Event = decode(&value, &options).expect("rounded seconds decode");
	assert_eq!(event.at, Timestamp(moment()));
	assert_eq!(event.until, None);
}

#[test]
fn iso8601_strategies_render_strings() {
	let stamp = Timestamp(moment() + chrono::Duration::milliseconds(120));

	let whole = encode(&stamp, &encode_options(DateStrategy::iso8601())).expect("encode succeeds");
	assert_eq!(whole, Some(Value::from("2021-06-30T23:59:58Z")));

	let fractional = encode(&stamp, &encode_options(DateStrategy::iso8601_fractional())).expect("encode succeeds");
	assert_eq!(fractional, Some(Value::from("2021-06-30T23:59:58.120Z")));

	let decoded: Timestamp = decode(&Value::from("2021-06-30T23:59:58.120Z"), &decode_options(DateStrategy::iso8601())).expect("decode succeeds");
	assert_eq!(decoded, stamp);
}

#[test]
fn malformed_date_strings_are_data_corrupted() {
	let err = decode::<Timestamp>(&Value::from("30/06/2021"), &decode_options(DateStrategy::iso8601())).expect_err("not rfc 3339");
	assert!(matches!(err, Error::DataCorrupted { .. }), "{err:?}");
}

#[test]
fn null_dates_are_value_not_found_before_transform_runs() {
	let strict = DateTransform::new(|_| panic!("transform must not see null"), |_| Value::Null);
	let err = decode::<Timestamp>(&Value::Null, &decode_options(DateStrategy::Custom(strict))).expect_err("null date");
	assert!(matches!(err, Error::ValueNotFound { .. }), "{err:?}");
}

#[test]
fn raw_strategy_requires_timestamp_leaf() {
	let err = decode::<Timestamp>(&Value::from("2021-06-30T23:59:58Z"), &DecodeOptions::default()).expect_err("string is not a timestamp");
	assert!(matches!(err, Error::TypeMismatch { .. }), "{err:?}");

	let stamp: Timestamp = decode(&Value::Timestamp(moment()), &DecodeOptions::default()).expect("raw decodes");
	assert_eq!(stamp.0, moment());
}

#[test]
fn custom_transform_runs_in_both_directions() {
	let day_number = DateTransform::new(
		|value| match value {
			Value::I64(days) => DateTime::from_timestamp(days * 86_400, 0).ok_or_else(|| "day out of range".to_owned()),
			other => Err(format!("expected day number, found {}", other.kind())),
		},
		|date| Value::I64(date.timestamp().div_euclid(86_400)),
	);
	let midnight = Timestamp(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().expect("valid date"));

	let encoded = encode(&midnight, &encode_options(DateStrategy::Custom(day_number.clone()))).expect("encode succeeds");
	assert_eq!(encoded, Some(Value::I64(10_957)));

	let decoded: Timestamp = decode(&Value::I64(10_957), &decode_options(DateStrategy::Custom(day_number.clone()))).expect("decode succeeds");
	assert_eq!(decoded, midnight);

	let err = decode::<Timestamp>(&Value::from("x"), &decode_options(DateStrategy::Custom(day_number))).expect_err("transform rejects");
	assert_eq!(err.description(), "expected day number, found string");
}

#[test]
fn years_beyond_four_digits_round_trip() {
	let far = [
		Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).single().expect("valid date"),
		Utc.with_ymd_and_hms(-1, 7, 4, 12, 0, 0).single().expect("valid date") + chrono::Duration::milliseconds(5),
	];
	for date in far {
		for dates in [DateStrategy::Raw, DateStrategy::MillisecondsSince1970] {
			let event = Event {
				at: Timestamp(date),
				until: None,
			};
			let encoded = encode(&event, &encode_options(dates.clone())).expect("encode succeeds").expect("map is present");
			let back: Event = decode(&encoded, &decode_options(dates)).expect("decode succeeds");
			assert_eq!(back, event);
		}
	}

	let stamp: Timestamp = decode(&Value::I64(253_402_300_800_000), &decode_options(DateStrategy::MillisecondsSince1970)).expect("year 10000 decodes");
	assert_eq!(stamp, Timestamp(far[0]));
}

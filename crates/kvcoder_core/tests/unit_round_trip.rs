#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};

use chrono::{TimeZone, Utc};
use kvcoder::coding::{Blob, DecodeOptions, Decimal, EncodeOptions, KeyStrategy, NilStrategy, Timestamp, Uri, Value, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Shape {
	Empty,
	Circle(f64),
	Pair(i8, i8),
	Rect { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Marker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Meters(f32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scalars {
	flag: bool,
	text: String,
	letter: char,
	tiny: i8,
	small: i16,
	medium: i32,
	large: i64,
	utiny: u8,
	usmall: u16,
	umedium: u32,
	ularge: u64,
	wide: i128,
	single: f32,
	double: f64,
	payload: Blob,
	created_at: Timestamp,
	amount: Decimal,
	home_page: Uri,
	nickname: Option<String>,
	retries: Option<u8>,
	history: Vec<i16>,
	pair: (u8, String),
	nothing: (),
	marker: Marker,
	distance: Meters,
	shapes: Vec<Shape>,
	by_id: HashMap<u32, String>,
	labels: BTreeMap<String, bool>,
}

fn sample() -> Scalars {
	Scalars {
		flag: true,
		text: "hello".to_owned(),
		letter: 'λ',
		tiny: i8::MIN,
		small: -300,
		medium: 70_000,
		large: i64::MAX,
		utiny: u8::MAX,
		usmall: 60_000,
		umedium: u32::MAX,
		ularge: u64::MAX,
		wide: -5,
		single: 1.5,
		double: -0.125,
		payload: Blob(vec![0, 1, 254, 255]),
		created_at: Timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid date")),
		amount: Decimal("1234.5678".parse().expect("decimal parses")),
		home_page: Uri::parse("https://example.com/~ada?x=1#top").expect("uri parses"),
		nickname: None,
		retries: Some(3),
		history: vec![1, -2, 3],
		pair: (9, "nine".to_owned()),
		nothing: (),
		marker: Marker,
		distance: Meters(2.5),
		shapes: vec![Shape::Empty, Shape::Circle(1.25), Shape::Pair(-1, 1), Shape::Rect { width: 3, height: 4 }],
		by_id: HashMap::from([(1, "one".to_owned()), (20, "twenty".to_owned())]),
		labels: BTreeMap::from([("camelCaseKey".to_owned(), true)]),
	}
}

fn round_trip<T: Serialize + DeserializeOwned>(value: &T, encode_options: &EncodeOptions, decode_options: &DecodeOptions) -> T {
	let encoded = encode(value, encode_options).expect("encode succeeds").expect("value is present");
	decode(&encoded, decode_options).expect("decode succeeds")
}

#[test]
fn every_scalar_kind_round_trips_with_default_options() {
	let value = sample();
	assert_eq!(round_trip(&value, &EncodeOptions::default(), &DecodeOptions::default()), value);
}

#[test]
fn round_trips_under_each_matching_nil_strategy() {
	let value = sample();
	for (encode_options, decode_options) in [
		(EncodeOptions::plist_compatible(), DecodeOptions::plist_compatible()),
		(EncodeOptions::json_compatible(), DecodeOptions::json_compatible()),
		(
			EncodeOptions {
				nil: NilStrategy::Removed,
				..EncodeOptions::default()
			},
			DecodeOptions {
				nil: NilStrategy::Removed,
				..DecodeOptions::default()
			},
		),
	] {
		assert_eq!(round_trip(&value, &encode_options, &decode_options), value);
	}
}

#[test]
fn round_trips_with_snake_case_keys() {
	let encode_options = EncodeOptions {
		keys: KeyStrategy::SnakeCase,
		..EncodeOptions::default()
	};
	let decode_options = DecodeOptions {
		keys: KeyStrategy::SnakeCase,
		..DecodeOptions::default()
	};
	let value = sample();
	let encoded = encode(&value, &encode_options).expect("encode succeeds").expect("map is present");

	assert!(encoded.get("created_at").is_some());
	assert!(encoded.get("home_page").is_some());
	assert!(encoded.get("createdAt").is_none());
	let labels = encoded.get("labels").and_then(Value::as_map).expect("labels map");
	assert!(labels.contains_key("camelCaseKey"), "map keys are stored verbatim");

	assert_eq!(decode::<Scalars>(&encoded, &decode_options).expect("decode succeeds"), value);
}

#[test]
fn leaves_are_stored_as_native_values() {
	let encoded = encode(&sample(), &EncodeOptions::default()).expect("encode succeeds").expect("map is present");

	assert!(matches!(encoded.get("payload"), Some(Value::Bytes(bytes)) if bytes.len() == 4));
	assert!(matches!(encoded.get("createdAt"), Some(Value::Timestamp(_))));
	assert!(matches!(encoded.get("amount"), Some(Value::Decimal(_))));
	assert!(matches!(encoded.get("homePage"), Some(Value::Uri(_))));
	assert_eq!(encoded.get("nothing"), Some(&Value::Null));
	assert_eq!(encoded.get("wide"), Some(&Value::I64(-5)));
	assert_eq!(encoded.get("letter"), Some(&Value::from("λ")));

	let shapes = encoded.get("shapes").and_then(Value::as_array).expect("shapes list");
	assert_eq!(shapes[0], Value::from("Empty"));
	assert_eq!(shapes[1], Value::from_iter([("Circle", Value::F64(1.25))]));
	assert_eq!(shapes[2], Value::from_iter([("Pair", [Value::I8(-1), Value::I8(1)].into_iter().collect::<Value>())]));
	assert_eq!(
		shapes[3],
		Value::from_iter([("Rect", Value::from_iter([("width", Value::U32(3)), ("height", Value::U32(4))]))])
	);

	let by_id = encoded.get("byId").and_then(Value::as_map).expect("by_id map");
	assert_eq!(by_id.get("20"), Some(&Value::from("twenty")));
}

#[test]
fn oversized_wide_integers_fail_to_encode() {
	let err = encode(&u128::MAX, &EncodeOptions::default()).expect_err("u128::MAX does not fit");
	assert!(err.to_string().contains("does not fit 64-bit storage"), "{err}");
}

#[test]
fn dynamic_values_round_trip_through_the_engine() {
	let value = Value::from_iter([
		("list", [Value::I32(1), Value::Null, Value::from("x")].into_iter().collect::<Value>()),
		("flag", Value::Bool(false)),
	]);
	let encoded = encode(&value, &EncodeOptions::default()).expect("encode succeeds").expect("map is present");
	assert_eq!(encoded, value);

	let decoded: Value = decode(&encoded, &DecodeOptions::default()).expect("decode succeeds");
	assert_eq!(decoded, value);
}

#![allow(missing_docs)]

use kvcoder::coding::{DecodeOptions, EncodeOptions, NilStrategy, Value, decode, encode};
use serde::{Deserialize, Serialize};

fn items() -> Vec<Option<String>> {
	vec![Some("v0".to_owned()), Some("v1".to_owned()), None, Some("v3".to_owned())]
}

fn encode_with_nil(nil: NilStrategy) -> Value {
	let options = EncodeOptions {
		nil,
		..EncodeOptions::default()
	};
	encode(&items(), &options).expect("encode succeeds").expect("list is present")
}

#[test]
fn removed_drops_nil_elements() {
	let encoded = encode_with_nil(NilStrategy::Removed);
	let expected: Value = ["v0", "v1", "v3"].into_iter().map(Value::from).collect();
	assert_eq!(encoded, expected);
}

#[test]
fn default_keeps_nil_as_null_marker_and_round_trips() {
	let encoded = encode_with_nil(NilStrategy::default());
	let list = encoded.as_array().expect("encoded list");
	assert_eq!(list.len(), 4);
	assert_eq!(list[2], Value::Null);

	let decoded: Vec<Option<String>> = decode(&encoded, &DecodeOptions::default()).expect("decode succeeds");
	assert_eq!(decoded, items());
}

#[test]
fn string_null_round_trips_through_sentinel() {
	let encoded = encode(&items(), &EncodeOptions::plist_compatible())
		.expect("encode succeeds")
		.expect("list is present");
	assert_eq!(encoded.as_array().expect("encoded list")[2], Value::from("$null"));

	let decoded: Vec<Option<String>> = decode(&encoded, &DecodeOptions::plist_compatible()).expect("decode succeeds");
	assert_eq!(decoded, items());

	let literal: Vec<Option<String>> = decode(&encoded, &DecodeOptions::default()).expect("decode succeeds");
	assert_eq!(literal[2].as_deref(), Some("$null"));
}

#[test]
fn custom_placeholder_uses_caller_predicate() {
	let nil = NilStrategy::placeholder(Value::I64(-1), |value| matches!(value, Value::I64(-1)));
	let encode_options = EncodeOptions {
		nil: nil.clone(),
		..EncodeOptions::default()
	};
	let decode_options = DecodeOptions {
		nil,
		..DecodeOptions::default()
	};

	let counts = vec![Some(3_u8), None];
	let encoded = encode(&counts, &encode_options).expect("encode succeeds").expect("list is present");
	assert_eq!(encoded, [Value::U8(3), Value::I64(-1)].into_iter().collect::<Value>());
	let decoded: Vec<Option<u8>> = decode(&encoded, &decode_options).expect("decode succeeds");
	assert_eq!(decoded, counts);
}

#[test]
fn json_null_matches_default_marker() {
	assert!(NilStrategy::json_null().is_null(&Value::Null));
	assert_eq!(NilStrategy::json_null().placeholder_value(), Some(&Value::Null));
	assert_eq!(NilStrategy::Removed.placeholder_value(), None);
	assert!(!NilStrategy::Removed.is_null(&Value::from("$null")));
	assert!(NilStrategy::string_null().is_null(&Value::from("$null")));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Settings {
	theme: Option<String>,
	volume: Option<u8>,
}

#[test]
fn removed_struct_fields_vanish_and_decode_back_as_none() {
	let settings = Settings {
		theme: None,
		volume: Some(7),
	};
	let options = EncodeOptions {
		nil: NilStrategy::Removed,
		..EncodeOptions::default()
	};
	let encoded = encode(&settings, &options).expect("encode succeeds").expect("map is present");
	assert_eq!(encoded, Value::from_iter([("volume", Value::U8(7))]));

	let decoded: Settings = decode(&encoded, &DecodeOptions::default()).expect("decode succeeds");
	assert_eq!(decoded, settings);
}

#[test]
fn removed_nested_optional_nil_does_not_round_trip() {
	let nested: Vec<Option<Option<u8>>> = vec![Some(None), Some(Some(1))];
	let options = EncodeOptions {
		nil: NilStrategy::Removed,
		..EncodeOptions::default()
	};
	let encoded = encode(&nested, &options).expect("encode succeeds").expect("list is present");
	assert_eq!(encoded, [Value::U8(1)].into_iter().collect::<Value>());
}

#![allow(missing_docs)]

use kvcoder::coding::{BoxedNumber, DecodeOptions, Error, IntStrategy, RoundingRule, Value, decode};

fn with_integers(integers: IntStrategy) -> DecodeOptions {
	DecodeOptions {
		integers,
		..DecodeOptions::default()
	}
}

#[test]
fn exact_strategy_decodes_integral_floats_only() {
	let exact = DecodeOptions::default();
	assert_eq!(decode::<i16>(&Value::F64(10.0), &exact).expect("10.0 fits int16"), 10);

	let err = decode::<i8>(&Value::F64(10.1), &exact).expect_err("10.1 is not integral");
	assert!(matches!(err, Error::TypeMismatch { .. }), "{err:?}");
	assert_eq!(err.description(), "10.1 is not representable as int8 under exact coercion");
}

#[test]
fn rounding_strategy_rounds_half_away_from_zero() {
	let rounding = with_integers(IntStrategy::Rounding(RoundingRule::ToNearestOrAwayFromZero));
	assert_eq!(decode::<i16>(&Value::F64(10.5), &rounding).expect("rounds up"), 11);
	assert_eq!(decode::<i16>(&Value::F64(-10.5), &rounding).expect("rounds down"), -11);
	assert!(decode::<u8>(&Value::F64(-0.7), &rounding).is_err());
}

#[test]
fn clamping_strategy_saturates_and_rejects_nan() {
	let clamping = with_integers(IntStrategy::Clamping(None));
	assert_eq!(decode::<i8>(&Value::F64(1000.0), &clamping).expect("clamps"), 127);
	assert!(decode::<i8>(&Value::F64(f64::NAN), &clamping).is_err());

	let rounded = with_integers(IntStrategy::Clamping(Some(RoundingRule::ToNearestOrAwayFromZero)));
	assert_eq!(decode::<i8>(&Value::F64(f64::INFINITY), &rounded).expect("clamps infinity"), 127);
	assert_eq!(decode::<u16>(&Value::I64(-9), &rounded).expect("clamps negative"), 0);
}

#[test]
fn boxed_numbers_classify_before_coercion() {
	let options = DecodeOptions::default();
	assert_eq!(decode::<u8>(&Value::Number(BoxedNumber::from(200_i64)), &options).expect("fits"), 200);
	assert_eq!(decode::<f64>(&Value::Number(BoxedNumber::from(2.25_f32)), &options).expect("float"), 2.25);
	assert!(decode::<i8>(&Value::Number(BoxedNumber::from(200_u16)), &options).is_err());
}

#[test]
fn boolean_boxes_never_decode_as_numbers() {
	let options = DecodeOptions::default();
	let flag = Value::Number(BoxedNumber::boolean(true));
	let err = decode::<i32>(&flag, &options).expect_err("flag is not numeric");
	assert!(matches!(err, Error::TypeMismatch { .. }), "{err:?}");
	assert!(decode::<f64>(&flag, &options).is_err());
	assert!(decode::<bool>(&flag, &options).expect("flag decodes as bool"));

	let char_one = Value::Number(BoxedNumber::from(1_i8));
	assert!(decode::<bool>(&char_one, &options).is_err());
	assert_eq!(decode::<i32>(&char_one, &options).expect("char box is numeric"), 1);
}

#[test]
fn float_decoding_widens_integer_and_decimal_sources() {
	let options = DecodeOptions::default();
	assert_eq!(decode::<f64>(&Value::I64(-3), &options).expect("signed"), -3.0);
	assert_eq!(decode::<f32>(&Value::U64(7), &options).expect("unsigned"), 7.0);
	assert_eq!(decode::<f64>(&Value::Decimal("2.5".parse().expect("decimal parses")), &options).expect("decimal"), 2.5);
	assert!(decode::<f64>(&Value::from("2.5"), &options).is_err());
}

#[test]
fn null_numbers_are_value_not_found() {
	let err = decode::<u32>(&Value::Null, &DecodeOptions::default()).expect_err("null is absent");
	assert!(matches!(err, Error::ValueNotFound { .. }), "{err:?}");

	let err = decode::<u32>(&Value::from("$null"), &DecodeOptions::plist_compatible()).expect_err("sentinel is absent");
	assert!(matches!(err, Error::ValueNotFound { .. }), "{err:?}");
}

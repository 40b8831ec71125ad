use crate::coding::{DecodeOptions, Error, KeyStrategy, NilStrategy, Value, decode_with};

fn list(items: impl IntoIterator<Item = Value>) -> Value {
	items.into_iter().collect()
}

#[test]
fn unkeyed_cursor_reaches_end_then_reports_index() {
	let value = list([Value::I64(1), Value::I64(2), Value::I64(3)]);
	let (sum, at_end, err) = decode_with(&value, &DecodeOptions::default(), |root| {
		let mut items = root.unkeyed_container()?;
		let mut sum = 0_i32;
		while !items.is_at_end() {
			sum += items.decode::<i32>()?;
		}
		let at_end = items.is_at_end();
		let err = items.decode::<i32>().expect_err("fourth read fails");
		assert_eq!(items.current_index(), 3);
		Ok((sum, at_end, err))
	})
	.expect("decode succeeds");

	assert_eq!(sum, 6);
	assert!(at_end);
	assert!(matches!(err, Error::IndexNotFound { index: 3, .. }), "{err:?}");
}

#[test]
fn unkeyed_cursor_advances_past_failed_element() {
	let value = list([Value::from("x"), Value::I64(7)]);
	let next = decode_with(&value, &DecodeOptions::default(), |root| {
		let mut items = root.unkeyed_container()?;
		let failed = items.decode::<i64>();
		assert!(matches!(failed, Err(Error::TypeMismatch { .. })));
		assert_eq!(items.current_index(), 1);
		items.decode::<i64>()
	})
	.expect("second element decodes");
	assert_eq!(next, 7);
}

#[test]
fn unkeyed_nested_reads_consume_one_element_each() {
	let value = list([list([Value::I8(1)]), Value::from_iter([("a", Value::Bool(true))]), Value::from("tail")]);
	let tail = decode_with(&value, &DecodeOptions::default(), |root| {
		let mut items = root.unkeyed_container()?;
		let mut inner = items.nested_unkeyed_container()?;
		assert_eq!(inner.decode::<u8>()?, 1);
		let keyed = items.nested_container()?;
		assert!(keyed.decode::<bool>("a")?);
		assert_eq!(items.current_index(), 2);
		items.super_decoder()?.decode_string()
	})
	.expect("decode succeeds");
	assert_eq!(tail, "tail");
}

#[test]
fn unkeyed_decode_nil_consumes_element() {
	let value = list([Value::Null, Value::I32(4)]);
	decode_with(&value, &DecodeOptions::default(), |root| {
		let mut items = root.unkeyed_container()?;
		assert!(items.decode_nil()?);
		assert!(!items.decode_nil()?);
		assert!(items.is_at_end());
		Ok(())
	})
	.expect("decode succeeds");
}

#[test]
fn keyed_absent_key_is_key_not_found_and_null_is_value_not_found() {
	let value = Value::from_iter([("present", Value::Null)]);
	decode_with(&value, &DecodeOptions::default(), |root| {
		let keyed = root.keyed_container()?;
		assert_eq!(keyed.all_keys(), vec!["present"]);
		assert!(keyed.contains("present"));
		assert!(keyed.decode_nil("present")?);
		assert!(matches!(keyed.decode::<String>("absent"), Err(Error::KeyNotFound { .. })));
		assert!(matches!(keyed.decode_nil("absent"), Err(Error::KeyNotFound { .. })));
		assert!(matches!(keyed.decode::<String>("present"), Err(Error::ValueNotFound { .. })));
		assert_eq!(keyed.decode_if_present::<String>("absent")?, None);
		assert_eq!(keyed.decode_if_present::<String>("present")?, None);
		Ok(())
	})
	.expect("decode succeeds");
}

#[test]
fn keyed_lookups_forward_transform_declared_names() {
	let value = Value::from_iter([("profile_url", Value::from("https://example.com"))]);
	let options = DecodeOptions {
		keys: KeyStrategy::SnakeCase,
		..DecodeOptions::default()
	};
	decode_with(&value, &options, |root| {
		let keyed = root.keyed_container()?;
		assert!(keyed.contains("profileURL"));
		assert!(!keyed.contains("profile_URL_missing"));
		let uri = keyed.super_decoder_for("profileURL")?.decode_uri()?;
		assert_eq!(uri.as_str(), "https://example.com");
		Ok(())
	})
	.expect("decode succeeds");
}

#[test]
fn keyed_super_decoder_rewraps_whole_map() {
	let value = Value::from_iter([("a", Value::I8(1)), ("b", Value::I8(2))]);
	let whole: std::collections::BTreeMap<String, i8> = decode_with(&value, &DecodeOptions::default(), |root| {
		let keyed = root.keyed_container()?;
		let inner = keyed.super_decoder();
		assert!(inner.coding_path().is_empty());
		inner.decode()
	})
	.expect("decode succeeds");
	assert_eq!(whole.len(), 2);
}

#[test]
fn placeholder_sentinel_reads_as_nil() {
	let value = list([Value::from("$null"), Value::from("kept")]);
	let options = DecodeOptions {
		nil: NilStrategy::string_null(),
		..DecodeOptions::default()
	};
	decode_with(&value, &options, |root| {
		let mut items = root.unkeyed_container()?;
		assert!(items.decode_nil()?);
		assert!(!items.decode_nil()?);
		Ok(())
	})
	.expect("decode succeeds");
}

use crate::coding::{BoxedNumber, CodingPath, Numeric, Value};

fn sample() -> Value {
	Value::from_iter([
		("name", Value::from("demo")),
		("items", Value::from_iter([Value::from(1_i64), Value::from_iter([("leaf", Value::Bool(true))])])),
	])
}

#[test]
fn pointer_follows_keys_and_indices() {
	let value = sample();
	let path = CodingPath::parse("SELF.items[1].leaf").expect("path parses");
	assert_eq!(value.pointer(&path), Some(&Value::Bool(true)));
	assert_eq!(value.pointer(&CodingPath::root()), Some(&value));
}

#[test]
fn pointer_misses_return_none() {
	let value = sample();
	for text in ["missing", "items[9]", "name[0]", "items.leaf"] {
		let path = CodingPath::parse(text).expect("path parses");
		assert_eq!(value.pointer(&path), None, "{text}");
	}
}

#[test]
fn numeric_view_widens_and_rejects_flags() {
	assert_eq!(Value::I8(-3).as_numeric(), Some(Numeric::Signed(-3)));
	assert_eq!(Value::U32(7).as_numeric(), Some(Numeric::Unsigned(7)));
	assert_eq!(Value::F32(1.5).as_numeric(), Some(Numeric::Float(1.5)));
	assert_eq!(Value::Number(BoxedNumber::from(2.5_f64)).as_numeric(), Some(Numeric::Float(2.5)));
	assert_eq!(Value::Number(BoxedNumber::boolean(true)).as_numeric(), None);
	assert_eq!(Value::Bool(true).as_numeric(), None);
}

#[test]
fn kind_names_are_stable() {
	assert_eq!(Value::Null.kind(), "null");
	assert_eq!(Value::from(Some(3_u16)).kind(), "uint16");
	assert_eq!(Value::from(None::<u16>).kind(), "null");
	assert_eq!(sample().kind(), "map");
}

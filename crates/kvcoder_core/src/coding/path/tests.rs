use super::{CodingPath, PathSegment};

#[test]
fn renders_root_marker_and_segments() {
	let path = CodingPath::root().appending_key("tArray").appending_index(0).appending_key("tString");
	assert_eq!(path.to_string(), "SELF.tArray[0].tString");
	assert_eq!(CodingPath::root().to_string(), "SELF");
}

#[test]
fn appending_leaves_parent_untouched() {
	let parent = CodingPath::root().appending_key("a");
	let child = parent.appending_index(3);
	assert_eq!(parent.len(), 1);
	assert_eq!(child.len(), 2);
	assert_eq!(child.last(), Some(&PathSegment::Index(3)));
}

#[test]
fn parses_with_and_without_root_marker() {
	let rooted = CodingPath::parse("SELF.a[2].b").expect("rooted path parses");
	let bare = CodingPath::parse("a[2].b").expect("bare path parses");
	assert_eq!(rooted, bare);
	assert_eq!(
		rooted.segments(),
		&[PathSegment::Key("a".into()), PathSegment::Index(2), PathSegment::Key("b".into())]
	);
	assert!(CodingPath::parse("SELF").expect("root parses").is_empty());
	assert!(CodingPath::parse("").expect("empty parses").is_empty());
}

#[test]
fn rejects_malformed_paths() {
	for input in ["a..b", "a[", "a[x]", "a[1", ".", "SELF.", "a.[0]"] {
		assert!(CodingPath::parse(input).is_err(), "{input} should be rejected");
	}
}

use std::borrow::Cow;

/// Mapping between declared field names and storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStrategy {
	/// Store declared names verbatim.
	#[default]
	UseDefaultKeys,
	/// Store declared camelCase names as snake_case.
	///
	/// Decoding forward-transforms each declared name and looks the result up;
	/// incoming keys are never reverse-mapped.
	SnakeCase,
}

impl KeyStrategy {
	/// Storage key for a declared field name.
	pub fn storage_key<'a>(&self, declared: &'a str) -> Cow<'a, str> {
		match self {
			Self::UseDefaultKeys => Cow::Borrowed(declared),
			Self::SnakeCase => Cow::Owned(to_snake_case(declared)),
		}
	}
}

/// Rewrite a camelCase identifier as snake_case.
///
/// Words break before an uppercase letter that follows a non-uppercase letter, and
/// before the last capital of an uppercase run that is followed by a lowercase letter,
/// so `profileURL` becomes `profile_url` and `relNODESLink` becomes `rel_nodes_link`.
pub fn to_snake_case(identifier: &str) -> String {
	let chars: Vec<char> = identifier.chars().collect();
	let mut out = String::with_capacity(identifier.len() + 4);

	for (idx, &ch) in chars.iter().enumerate() {
		if idx > 0 && ch.is_uppercase() && starts_word(&chars, idx) {
			out.push('_');
		}
		out.extend(ch.to_lowercase());
	}

	out
}

fn starts_word(chars: &[char], idx: usize) -> bool {
	let prev = chars[idx - 1];
	if prev == '_' {
		return false;
	}
	if !prev.is_uppercase() {
		return true;
	}
	chars.get(idx + 1).is_some_and(|next| next.is_lowercase())
}

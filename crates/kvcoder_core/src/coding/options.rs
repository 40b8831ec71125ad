use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coding::{DateStrategy, IntStrategy, KeyStrategy, NilStrategy};

/// Open auxiliary context handed to custom decode and encode logic.
pub type UserInfo = HashMap<String, Arc<dyn Any + Send + Sync>>;

/// Configuration for one decode call.
///
/// Shared immutably by every container the call creates.
#[derive(Clone, Default)]
pub struct DecodeOptions {
	/// Which values count as nil.
	pub nil: NilStrategy,
	/// Integer coercion policy.
	pub integers: IntStrategy,
	/// Timestamp storage format.
	pub dates: DateStrategy,
	/// Declared-name to storage-key mapping.
	pub keys: KeyStrategy,
	/// Auxiliary context for custom decode logic.
	pub user_info: UserInfo,
}

impl DecodeOptions {
	/// Property-list interop: `"$null"` marks nil.
	pub fn plist_compatible() -> Self {
		Self {
			nil: NilStrategy::string_null(),
			..Self::default()
		}
	}

	/// JSON interop: the null object marks nil.
	pub fn json_compatible() -> Self {
		Self {
			nil: NilStrategy::json_null(),
			..Self::default()
		}
	}

	/// Typed lookup into [`DecodeOptions::user_info`].
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.user_info.get(key)?.downcast_ref()
	}
}

impl std::fmt::Debug for DecodeOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DecodeOptions")
			.field("nil", &self.nil)
			.field("integers", &self.integers)
			.field("dates", &self.dates)
			.field("keys", &self.keys)
			.field("user_info", &self.user_info.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Configuration for one encode call.
///
/// Shared immutably by every container the call creates.
#[derive(Clone, Default)]
pub struct EncodeOptions {
	/// How nil is written.
	pub nil: NilStrategy,
	/// Timestamp storage format.
	pub dates: DateStrategy,
	/// Declared-name to storage-key mapping.
	pub keys: KeyStrategy,
	/// Auxiliary context for custom encode logic.
	pub user_info: UserInfo,
}

impl EncodeOptions {
	/// Property-list interop: nil is written as `"$null"`.
	pub fn plist_compatible() -> Self {
		Self {
			nil: NilStrategy::string_null(),
			..Self::default()
		}
	}

	/// JSON interop: nil is written as the null object.
	pub fn json_compatible() -> Self {
		Self {
			nil: NilStrategy::json_null(),
			..Self::default()
		}
	}

	/// Typed lookup into [`EncodeOptions::user_info`].
	pub fn user_info<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.user_info.get(key)?.downcast_ref()
	}
}

impl std::fmt::Debug for EncodeOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EncodeOptions")
			.field("nil", &self.nil)
			.field("dates", &self.dates)
			.field("keys", &self.keys)
			.field("user_info", &self.user_info.keys().collect::<Vec<_>>())
			.finish()
	}
}

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::coding::{EncodeOptions, NilStrategy, Value};

/// In-flight encoded node.
#[derive(Clone)]
pub enum EncodedValue {
	/// Nil marker, substituted by the nil strategy at resolution.
	Null,
	/// Finished value.
	Value(Value),
	/// Deferred node owned by a container that may still receive writes.
	Provider(Rc<dyn Fn() -> EncodedValue>),
}

impl EncodedValue {
	/// Resolve depth-first through `nil`; `None` when the node vanishes.
	///
	/// Providers read their container without consuming it, so resolving twice
	/// yields the same value.
	pub fn resolve(&self, nil: &NilStrategy) -> Option<Value> {
		match self {
			Self::Null => nil.placeholder_value().cloned(),
			Self::Value(value) => Some(value.clone()),
			Self::Provider(provider) => provider().resolve(nil),
		}
	}
}

impl fmt::Debug for EncodedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Provider(_) => f.write_str("Provider(..)"),
		}
	}
}

pub(super) type SharedSlot = Rc<RefCell<Option<EncodedValue>>>;
pub(super) type SharedEntries = Rc<RefCell<BTreeMap<String, EncodedValue>>>;
pub(super) type SharedItems = Rc<RefCell<Vec<EncodedValue>>>;

/// Value of a single-value slot; a slot that was never written is an empty map.
pub(super) fn resolve_slot(slot: &SharedSlot, nil: &NilStrategy) -> Option<Value> {
	match slot.borrow().as_ref() {
		Some(encoded) => encoded.resolve(nil),
		None => Some(Value::Map(BTreeMap::new())),
	}
}

pub(super) fn slot_provider(slot: SharedSlot, options: Arc<EncodeOptions>) -> EncodedValue {
	EncodedValue::Provider(Rc::new(move || match resolve_slot(&slot, &options.nil) {
		Some(value) => EncodedValue::Value(value),
		None => EncodedValue::Null,
	}))
}

pub(super) fn entries_provider(entries: SharedEntries, options: Arc<EncodeOptions>) -> EncodedValue {
	EncodedValue::Provider(Rc::new(move || {
		let map = entries
			.borrow()
			.iter()
			.filter_map(|(key, encoded)| encoded.resolve(&options.nil).map(|value| (key.clone(), value)))
			.collect();
		EncodedValue::Value(Value::Map(map))
	}))
}

pub(super) fn items_provider(items: SharedItems, options: Arc<EncodeOptions>) -> EncodedValue {
	EncodedValue::Provider(Rc::new(move || {
		let list = items.borrow().iter().filter_map(|encoded| encoded.resolve(&options.nil)).collect();
		EncodedValue::Value(Value::Array(list))
	}))
}

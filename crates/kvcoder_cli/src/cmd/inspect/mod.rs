use std::fmt::{self, Write};
use std::path::PathBuf;

use kvcoder::coding::{CodingPath, Value, to_json};

use crate::cmd::load_json;
use crate::error::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Coding path of the sub-value to print, e.g. `SELF.items[0]`.
	#[arg(long = "path")]
	pub at: Option<String>,
	#[arg(long)]
	pub json: bool,
	#[arg(long, default_value_t = 6)]
	pub max_depth: u32,
	#[arg(long, default_value_t = 16)]
	pub max_items: usize,
	#[arg(long, default_value_t = 200)]
	pub max_string: usize,
}

/// Output truncation limits for printed trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single map.
	pub max_map_entries: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum recursive print depth for nested arrays/maps.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_map_entries: 80,
			max_array_items: 16,
			max_string_len: 200,
			max_print_depth: 6,
		}
	}
}

/// Print one document, or the sub-value selected by `--path`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		at,
		json,
		max_depth,
		max_items,
		max_string,
	} = args;

	let document = load_json(&file)?;
	let path = match at {
		Some(text) => CodingPath::parse(&text)?,
		None => CodingPath::root(),
	};
	let selected = document.pointer(&path).ok_or_else(|| CliError::MissingPath { path: path.clone() })?;

	if json {
		println!("{}", serde_json::to_string_pretty(&to_json(selected))?);
		return Ok(());
	}

	let options = PrintOptions {
		max_map_entries: max_items,
		max_array_items: max_items,
		max_string_len: max_string,
		max_print_depth: max_depth,
	};
	println!("path: {path}");
	print!("{}", render_tree(selected, options)?);
	Ok(())
}

/// Render a value tree with kind annotations on every leaf.
pub fn render_tree(value: &Value, options: PrintOptions) -> Result<String, fmt::Error> {
	let mut out = String::new();
	write_value(&mut out, value, 0, 0, options)?;
	Ok(out)
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	let pad = " ".repeat(indent);
	match value {
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}array[{}] [ ... ]", items.len());
			}
			writeln!(out, "{pad}array[{}] [", items.len())?;
			for item in items.iter().take(options.max_array_items) {
				write_value(out, item, indent + 2, depth + 1, options)?;
			}
			if items.len() > options.max_array_items {
				writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items)?;
			}
			writeln!(out, "{pad}]")
		}
		Value::Map(entries) => {
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}map[{}] {{ ... }}", entries.len());
			}
			writeln!(out, "{pad}map[{}] {{", entries.len())?;
			for (key, entry) in entries.iter().take(options.max_map_entries) {
				write!(out, "{pad}  {key} = ")?;
				if matches!(entry, Value::Array(_) | Value::Map(_)) {
					writeln!(out)?;
					write_value(out, entry, indent + 4, depth + 1, options)?;
				} else {
					write_value(out, entry, 0, depth + 1, options)?;
				}
			}
			if entries.len() > options.max_map_entries {
				writeln!(out, "{pad}  ... {} more entries", entries.len() - options.max_map_entries)?;
			}
			writeln!(out, "{pad}}}")
		}
		leaf => writeln!(out, "{pad}{}", leaf_label(leaf, options)),
	}
}

fn leaf_label(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Bool(v) => format!("bool {v}"),
		Value::String(v) => format!("string \"{}\"", truncate(v, options.max_string_len)),
		Value::I8(v) => format!("int8 {v}"),
		Value::I16(v) => format!("int16 {v}"),
		Value::I32(v) => format!("int32 {v}"),
		Value::I64(v) => format!("int64 {v}"),
		Value::U8(v) => format!("uint8 {v}"),
		Value::U16(v) => format!("uint16 {v}"),
		Value::U32(v) => format!("uint32 {v}"),
		Value::U64(v) => format!("uint64 {v}"),
		Value::F32(v) => format!("float32 {v}"),
		Value::F64(v) => format!("float64 {v}"),
		Value::Decimal(v) => format!("decimal {v}"),
		Value::Bytes(v) => format!("bytes[{}]", v.len()),
		Value::Timestamp(v) => format!("timestamp {}", v.to_rfc3339()),
		Value::Uri(v) => format!("uri {}", truncate(v.as_str(), options.max_string_len)),
		Value::Number(v) => format!("number({}) {v}", v.class().name()),
		Value::Array(_) | Value::Map(_) => value.kind().to_owned(),
	}
}

fn truncate(input: &str, limit: usize) -> String {
	let mut chars = input.chars();
	let head: String = chars.by_ref().take(limit).collect();
	if chars.next().is_some() { format!("{head}...") } else { head }
}

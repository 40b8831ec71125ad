use std::path::PathBuf;

use kvcoder::coding::{EncodeOptions, NilStrategy, Value, encode, to_json};

use crate::cmd::load_json;
use crate::error::Result;

/// Nil handling selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NilArg {
	/// Drop nil entries from maps and arrays.
	Removed,
	/// Keep nil as the `null` marker.
	#[default]
	Default,
	/// Replace nil with the `"$null"` sentinel.
	StringNull,
}

impl NilArg {
	/// Engine strategy for this flag value.
	pub fn strategy(self) -> NilStrategy {
		match self {
			Self::Removed => NilStrategy::Removed,
			Self::Default => NilStrategy::default(),
			Self::StringNull => NilStrategy::string_null(),
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long, value_enum, default_value_t = NilArg::Default)]
	pub nil: NilArg,
}

/// Run a document through the encoding engine and print the result as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { file, nil } = args;

	let document = load_json(&file)?;
	let options = EncodeOptions {
		nil: nil.strategy(),
		..EncodeOptions::default()
	};
	let normalized = encode(&document, &options)?.unwrap_or(Value::Null);
	println!("{}", serde_json::to_string_pretty(&to_json(&normalized))?);
	Ok(())
}

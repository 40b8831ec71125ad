use kvcoder::coding::to_snake_case;

use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub identifiers: Vec<String>,
}

/// Print `identifier -> storage_key` for each argument.
pub fn run(args: Args) -> Result<()> {
	for identifier in &args.identifiers {
		println!("{identifier} -> {}", to_snake_case(identifier));
	}
	Ok(())
}

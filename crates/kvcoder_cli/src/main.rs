#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;

#[derive(Parser)]
#[command(name = "kvcoder", about = "Dynamic key-value tree tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a JSON document as a kind-annotated value tree.
	Inspect(cmd::inspect::Args),
	/// Re-encode a JSON document under a nil strategy.
	Normalize(cmd::normalize::Args),
	/// Print snake_case storage keys for identifiers.
	Snake(cmd::snake::Args),
}

fn main() {
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Inspect(args) => cmd::inspect::run(args),
		Commands::Normalize(args) => cmd::normalize::run(args),
		Commands::Snake(args) => cmd::snake::run(args),
	}
}

use std::path::PathBuf;

use kvcoder::coding::CodingPath;

/// Result alias for command handlers.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Failures surfaced by `kvcoder` subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying IO error.
		source: std::io::Error,
	},
	/// Input file is not valid JSON.
	#[error("{} is not valid json: {source}", path.display())]
	Json {
		/// File that failed to parse.
		path: PathBuf,
		/// Underlying parse error.
		source: serde_json::Error,
	},
	/// JSON output could not be rendered.
	#[error("failed to render json: {0}")]
	Render(#[from] serde_json::Error),
	/// Tree output could not be formatted.
	#[error("failed to format output")]
	Format(#[from] std::fmt::Error),
	/// Encoding or decoding through the engines failed.
	#[error(transparent)]
	Coding(#[from] kvcoder::coding::Error),
	/// Selected path does not exist in the document.
	#[error("no value at {path}")]
	MissingPath {
		/// Path that was requested.
		path: CodingPath,
	},
}

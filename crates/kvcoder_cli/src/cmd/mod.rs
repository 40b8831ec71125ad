use std::path::Path;

use kvcoder::coding::Value;

use crate::error::{CliError, Result};

/// Dynamic value tree printing command.
pub mod inspect;
/// Nil strategy normalization command.
pub mod normalize;
/// Snake-case key preview command.
pub mod snake;

/// Read a JSON file into the dynamic value model.
pub(crate) fn load_json(path: &Path) -> Result<Value> {
	let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
		path: path.to_owned(),
		source,
	})?;
	let json: serde_json::Value = serde_json::from_str(&text).map_err(|source| CliError::Json {
		path: path.to_owned(),
		source,
	})?;
	tracing::debug!(path = %path.display(), "loaded json document");
	Ok(Value::from(json))
}

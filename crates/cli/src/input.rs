//! Reading command input and the optional config file.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use wirefix::PipelineConfig;

use crate::error::CliError;

/// Reads the named file, or stdin when `file` is `None` or `-`.
pub fn read_input(file: Option<&Path>) -> Result<String, CliError> {
	match file {
		Some(path) if path != Path::new("-") => {
			debug!(target = "wirefix", path = %path.display(), "reading input file");
			fs::read_to_string(path).map_err(|source| CliError::Read {
				path: path.to_path_buf(),
				source,
			})
		}
		_ => {
			let mut text = String::new();
			io::stdin().read_to_string(&mut text).map_err(CliError::Stdin)?;
			Ok(text)
		}
	}
}

/// Loads pipeline settings, falling back to defaults without a file.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, CliError> {
	let Some(path) = path else {
		return Ok(PipelineConfig::default());
	};
	let text = fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	serde_json::from_str(&text).map_err(|source| CliError::Config {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn missing_config_path_uses_defaults() {
		assert_eq!(load_config(None).expect("defaults"), PipelineConfig::default());
	}

	#[test]
	fn partial_config_file_keeps_other_defaults() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		write!(file, r#"{{"inlineExternal": false, "inliner": {{"timeoutMs": 250}}}}"#).expect("write config");

		let config = load_config(Some(file.path())).expect("config should load");
		assert!(!config.inline_external);
		assert_eq!(config.inliner.timeout_ms, 250);
		assert_eq!(config.sanitizer.wrapper_class, wirefix::DEFAULT_WRAPPER_CLASS);
	}

	#[test]
	fn malformed_config_is_rejected() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		write!(file, "{{not json").expect("write config");
		assert!(matches!(load_config(Some(file.path())), Err(CliError::Config { .. })));
	}

	#[test]
	fn reads_named_file() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		write!(file, "<p>x</p>").expect("write input");
		assert_eq!(read_input(Some(file.path())).expect("input"), "<p>x</p>");
	}
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::output::ErrorCode;

/// Failures the CLI maps to a specific envelope error code.
#[derive(Debug, Error)]
pub enum CliError {
	#[error("Failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Failed to read stdin: {0}")]
	Stdin(#[source] io::Error),

	#[error("Invalid config file {}: {source}", path.display())]
	Config {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Invalid wrapper class {0:?}: expected letters, digits, '-' or '_'")]
	WrapperClass(String),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Read { .. } | CliError::Stdin(_) => ErrorCode::IoError,
			CliError::Config { .. } | CliError::WrapperClass(_) => ErrorCode::InvalidInput,
		}
	}
}

/// Envelope error code for an error returned at the command boundary.
pub fn error_code(err: &anyhow::Error) -> ErrorCode {
	err.downcast_ref::<CliError>().map_or(ErrorCode::InternalError, CliError::code)
}

use std::path::Path;

use anyhow::Result;
use wirefix::{SanitizationResult, Sanitizer, SanitizerConfig};

use crate::error::CliError;
use crate::input::read_input;

pub fn execute(file: Option<&Path>, wrapper_class: Option<String>, mut config: SanitizerConfig) -> Result<SanitizationResult> {
	if let Some(class) = wrapper_class {
		config.wrapper_class = class;
	}
	check_wrapper_class(&config)?;

	let raw = read_input(file)?;
	Ok(Sanitizer::new(config).sanitize(Some(&raw)))
}

/// Maps a rejected wrapper class to the CLI's input error.
pub(crate) fn check_wrapper_class(config: &SanitizerConfig) -> Result<(), CliError> {
	config.validate().map_err(|_| CliError::WrapperClass(config.wrapper_class.clone()))
}

use std::path::Path;

use anyhow::Result;
use wirefix::{ValidationResult, validate_and_fix};

use crate::input::read_input;

/// Invalid markup is still a successful command; the verdict is in the data.
pub fn execute(file: Option<&Path>) -> Result<ValidationResult> {
	let html = read_input(file)?;
	Ok(validate_and_fix(&html))
}

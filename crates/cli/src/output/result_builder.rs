use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandResult, ErrorCode};

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	/// Measures duration from `start` instead of builder creation.
	pub fn started_at(mut self, start: Instant) -> Self {
		self.start_time = start;
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();

		CommandResult {
			ok,
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
		}
	}
}

/// Print a command result to stdout in the specified format.
pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => {
			let mut stdout = io::stdout().lock();
			let _ = write_result_text(&mut stdout, result);
		}
	}
}

/// Text rendering: string fields verbatim under a heading, everything else as JSON.
pub(crate) fn write_result_text<T: Serialize>(out: &mut impl Write, result: &CommandResult<T>) -> io::Result<()> {
	if let Some(ref error) = result.error {
		writeln!(out, "Error [{}]: {}", error.code, error.message)?;
		return Ok(());
	}

	let Some(data) = result.data.as_ref().and_then(|d| serde_json::to_value(d).ok()) else {
		return Ok(());
	};

	match data {
		serde_json::Value::Object(fields) => {
			for (name, value) in fields {
				match value {
					serde_json::Value::String(text) if text.is_empty() => {}
					serde_json::Value::String(text) => writeln!(out, "== {name} ==\n{text}\n")?,
					serde_json::Value::Array(items) if items.is_empty() => {}
					other => writeln!(out, "== {name} ==\n{}\n", serde_json::to_string_pretty(&other).unwrap_or_default())?,
				}
			}
		}
		other => writeln!(out, "{}", serde_json::to_string_pretty(&other).unwrap_or_default())?,
	}

	Ok(())
}

//! Subcommand implementations. Each returns its payload as JSON for the envelope.

mod prepare;
mod sanitize;
mod validate;

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::input::load_config;

pub async fn dispatch(cli: Cli) -> Result<Value> {
	let config = load_config(cli.config.as_deref())?;
	info!(target = "wirefix", command = cli.command.name(), "running command");

	let data = match cli.command {
		Commands::Sanitize { file, wrapper_class } => serde_json::to_value(sanitize::execute(file.as_deref(), wrapper_class, config.sanitizer)?)?,
		Commands::Validate { file } => serde_json::to_value(validate::execute(file.as_deref())?)?,
		Commands::Prepare {
			file,
			origin,
			no_inline,
			timeout_ms,
		} => {
			let overrides = prepare::Overrides {
				origin,
				no_inline,
				timeout_ms,
			};
			serde_json::to_value(prepare::execute(file.as_deref(), overrides, config).await?)?
		}
	};

	Ok(data)
}

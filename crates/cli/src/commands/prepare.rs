use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use url::Url;
use wirefix::{Pipeline, PipelineConfig, PreparedFragment};

use crate::commands::sanitize::check_wrapper_class;
use crate::input::read_input;

/// Flag values layered over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
	pub origin: Option<Url>,
	pub no_inline: bool,
	pub timeout_ms: Option<u64>,
}

impl Overrides {
	fn apply(self, config: &mut PipelineConfig) {
		if let Some(origin) = self.origin {
			config.inliner.origin = Some(origin);
		}
		if let Some(timeout_ms) = self.timeout_ms {
			config.inliner.timeout_ms = timeout_ms;
		}
		if self.no_inline {
			config.inline_external = false;
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedOutput {
	/// Repaired markup, ready to embed.
	pub html: String,
	/// Captured styles followed by inlined stylesheets.
	pub stylesheet: String,
	#[serde(flatten)]
	pub fragment: PreparedFragment,
}

pub async fn execute(file: Option<&Path>, overrides: Overrides, mut config: PipelineConfig) -> Result<PreparedOutput> {
	overrides.apply(&mut config);
	check_wrapper_class(&config.sanitizer)?;

	let raw = read_input(file)?;
	let pipeline = Pipeline::new(config)?;
	let fragment = pipeline.run(&raw).await;

	Ok(PreparedOutput {
		html: fragment.html().to_string(),
		stylesheet: fragment.stylesheet(),
		fragment,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_override_config_values() {
		let mut config = PipelineConfig::default();
		config.inliner.timeout_ms = 9_000;

		Overrides {
			origin: Some(Url::parse("https://app.test").expect("url")),
			no_inline: true,
			timeout_ms: Some(100),
		}
		.apply(&mut config);

		assert!(!config.inline_external);
		assert_eq!(config.inliner.timeout_ms, 100);
		assert_eq!(config.inliner.origin.map(String::from), Some("https://app.test/".to_string()));
	}

	#[test]
	fn absent_flags_keep_config_values() {
		let mut config = PipelineConfig::default();
		config.inline_external = false;
		config.inliner.timeout_ms = 9_000;

		Overrides::default().apply(&mut config);

		assert!(!config.inline_external);
		assert_eq!(config.inliner.timeout_ms, 9_000);
	}
}

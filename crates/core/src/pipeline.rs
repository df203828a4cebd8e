//! One-call orchestration: sanitize, inline linked stylesheets, then repair.

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::inline::StylesheetInliner;
use crate::repair::validate_and_fix;
use crate::sanitize::Sanitizer;
use crate::types::{PreparedFragment, SanitizationResult};

/// Sanitize, inline and repair in one pass.
#[derive(Debug)]
pub struct Pipeline {
	sanitizer: Sanitizer,
	inliner: Option<StylesheetInliner>,
}

impl Pipeline {
	pub fn new(config: PipelineConfig) -> Result<Self> {
		config.sanitizer.validate()?;
		let inliner = if config.inline_external {
			Some(StylesheetInliner::new(config.inliner)?)
		} else {
			None
		};
		Ok(Self {
			sanitizer: Sanitizer::new(config.sanitizer),
			inliner,
		})
	}

	/// Runs every stage, fetching linked stylesheets when enabled.
	pub async fn run(&self, raw: &str) -> PreparedFragment {
		let mut sanitized = self.sanitizer.sanitize(Some(raw));

		match &self.inliner {
			Some(inliner) if !sanitized.links.is_empty() => {
				info!(target = "wirefix.pipeline", links = sanitized.links.len(), "inlining external stylesheets");
				sanitized.inlined_styles = Some(inliner.inline(&sanitized.links).await);
			}
			_ => {}
		}

		finish(sanitized)
	}

	/// Runs sanitize and repair only. Links are reported but never fetched.
	pub fn run_offline(&self, raw: &str) -> PreparedFragment {
		finish(self.sanitizer.sanitize(Some(raw)))
	}
}

fn finish(sanitized: SanitizationResult) -> PreparedFragment {
	let validation = validate_and_fix(&sanitized.html);
	debug!(
		target = "wirefix.pipeline",
		valid = validation.is_valid,
		fixes = validation.auto_fixes_applied.len(),
		"prepared fragment"
	);
	PreparedFragment { sanitized, validation }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SanitizerConfig;
	use crate::error::Error;
	use crate::repair::PLACEHOLDER_HTML;

	fn offline() -> Pipeline {
		Pipeline::new(PipelineConfig {
			inline_external: false,
			..Default::default()
		})
		.expect("pipeline should build")
	}

	#[test]
	fn offline_run_reports_links_without_fetching() {
		let prepared = offline().run_offline("<link rel=\"stylesheet\" href=\"https://cdn.test/a.css\"><p>Hi</p>");
		assert_eq!(prepared.sanitized.links, vec!["https://cdn.test/a.css".to_string()]);
		assert_eq!(prepared.sanitized.inlined_styles, None);
		assert_eq!(prepared.html(), "<p>Hi</p>");
	}

	#[test]
	fn rejects_unsafe_wrapper_class() {
		let config = PipelineConfig {
			sanitizer: SanitizerConfig {
				wrapper_class: "a\" onload=\"x".to_string(),
			},
			..Default::default()
		};
		assert!(matches!(Pipeline::new(config), Err(Error::InvalidWrapperClass { .. })));
	}

	#[test]
	fn empty_input_gets_placeholder_markup() {
		let prepared = offline().run_offline("");
		assert_eq!(prepared.html(), PLACEHOLDER_HTML);
		assert!(!prepared.validation.is_valid);
	}

	#[tokio::test]
	async fn run_without_links_skips_inliner() {
		let pipeline = Pipeline::new(PipelineConfig::default()).expect("pipeline should build");
		let prepared = pipeline.run("<style>p { margin: 0; }</style><p>x</p>").await;
		assert_eq!(prepared.sanitized.inlined_styles, None);
		assert_eq!(prepared.stylesheet(), "p { margin: 0; }");
	}
}

//! Orchestration of the sanitizer stages.

use std::sync::LazyLock;

use tracing::debug;

use crate::config::SanitizerConfig;
use crate::sanitize::capture::{CapturedAssets, strip_assets};
use crate::sanitize::scaffold;
use crate::sanitize::scope::{WrapperScope, is_effectively_empty};
use crate::types::SanitizationResult;

static DEFAULT_SANITIZER: LazyLock<Sanitizer> = LazyLock::new(|| Sanitizer::new(SanitizerConfig::default()));

/// Strips model scaffolding from generated markup and extracts its CSS.
///
/// A `Sanitizer` holds no per-call state and can be shared across threads.
#[derive(Debug)]
pub struct Sanitizer {
	config: SanitizerConfig,
	scope: WrapperScope,
}

impl Sanitizer {
	/// Builds a sanitizer without checking the wrapper class. It is escaped
	/// when written into markup; use [`SanitizerConfig::validate`] to reject
	/// classes that would not match as a selector.
	pub fn new(config: SanitizerConfig) -> Self {
		let scope = WrapperScope::new(&config.wrapper_class);
		Self { config, scope }
	}

	pub fn config(&self) -> &SanitizerConfig {
		&self.config
	}

	/// Sanitizes raw model output. `None` and empty input give an empty result.
	pub fn sanitize(&self, raw: Option<&str>) -> SanitizationResult {
		let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
			return SanitizationResult::default();
		};

		let mut assets = CapturedAssets::default();
		assets.capture_from(raw);
		let mut text = strip_assets(raw);

		text = scaffold::normalize(&text);
		text = scaffold::strip_narrative_preamble(&text);

		if scaffold::is_full_document(&text) {
			debug!(target = "wirefix.sanitize", "unwrapping full document");
			assets.capture_head(raw);
			text = scaffold::unwrap_document(&text);
		}

		text = scaffold::strip_explanation(&text);
		text = scaffold::strip_narrative_bullets(&text);
		text = scaffold::strip_scripts(&text);
		text = scaffold::strip_document_tags(&text);
		text = scaffold::ensure_block(text.trim());

		assets.dedup();
		let mut styles = assets.joined_styles();

		let auto_wrapped = self.scope.css_targets_wrapper(&styles) && !self.scope.html_has_wrapper(&text);
		if auto_wrapped {
			debug!(
				target = "wirefix.sanitize",
				wrapper = %self.config.wrapper_class,
				"wrapping fragment to match namespaced css"
			);
			text = self.scope.wrap(&text);
		}

		styles = self.scope.rewrite_css(&styles, auto_wrapped);
		if is_effectively_empty(&styles) {
			styles.clear();
		}

		debug!(
			target = "wirefix.sanitize",
			html_len = text.len(),
			styles_len = styles.len(),
			links = assets.links.len(),
			auto_wrapped,
			"sanitized fragment"
		);

		SanitizationResult {
			html: text.trim().to_string(),
			styles: styles.trim().to_string(),
			links: assets.links,
			inlined_styles: None,
			auto_wrapped,
		}
	}
}

impl Default for Sanitizer {
	fn default() -> Self {
		Self::new(SanitizerConfig::default())
	}
}

/// Sanitizes raw model output with the default wrapper class.
pub fn sanitize(raw: &str) -> SanitizationResult {
	DEFAULT_SANITIZER.sanitize(Some(raw))
}

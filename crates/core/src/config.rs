//! Tag and phrase vocabularies loaded from `patterns.json`, plus the
//! runtime configuration of each pipeline stage.

use std::sync::LazyLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Wrapper class the preview surface scopes generated CSS under.
pub const DEFAULT_WRAPPER_CLASS: &str = "wireframe-content";

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
	let json = include_str!("patterns.json");
	serde_json::from_str(json).expect("Failed to parse patterns.json")
});

pub(crate) fn patterns() -> &'static Patterns {
	&PATTERNS
}

#[derive(Debug, Deserialize)]
pub(crate) struct Patterns {
	/// Lead-in phrases that mark model prose before the markup starts.
	pub(crate) narrative_preambles: Vec<String>,
	/// Tags a narrative preamble is cut back to.
	pub(crate) structural_tags: Vec<String>,
	/// Document scaffolding that also ends a preamble.
	pub(crate) document_tags: Vec<String>,
	/// Tags that make a fragment renderable on its own.
	pub(crate) block_tags: Vec<String>,
	/// Vocabulary covered by the name-specific bracket repair rules.
	pub(crate) repair_tags: Vec<String>,
	pub(crate) void_tags: Vec<String>,
}

impl Patterns {
	pub(crate) fn is_void(&self, tag: &str) -> bool {
		self.void_tags.iter().any(|v| v.eq_ignore_ascii_case(tag))
	}
}

/// Sanitizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SanitizerConfig {
	/// Class name that namespaced CSS is authored under.
	pub wrapper_class: String,
}

impl SanitizerConfig {
	/// Rejects wrapper classes that cannot be spliced verbatim into a class
	/// attribute and a CSS selector.
	pub fn validate(&self) -> Result<()> {
		let class = self.wrapper_class.as_str();
		let valid = !class.is_empty()
			&& !class.starts_with(|c: char| c.is_ascii_digit())
			&& class.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
		if valid {
			Ok(())
		} else {
			Err(Error::InvalidWrapperClass { class: class.to_string() })
		}
	}
}

impl Default for SanitizerConfig {
	fn default() -> Self {
		Self {
			wrapper_class: DEFAULT_WRAPPER_CLASS.to_string(),
		}
	}
}

/// External stylesheet fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InlinerConfig {
	/// Origin root-relative references resolve against. Root-relative links are
	/// skipped when unset.
	pub origin: Option<Url>,
	/// Per-request timeout in milliseconds.
	pub timeout_ms: u64,
	pub user_agent: String,
}

impl InlinerConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl Default for InlinerConfig {
	fn default() -> Self {
		Self {
			origin: None,
			timeout_ms: 10_000,
			user_agent: concat!("wirefix/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}
}

/// Settings for the full sanitize, inline and repair pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
	pub sanitizer: SanitizerConfig,
	pub inliner: InlinerConfig,
	/// Fetch stylesheets referenced by `<link>` tags.
	pub inline_external: bool,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			sanitizer: SanitizerConfig::default(),
			inliner: InlinerConfig::default(),
			inline_external: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn patterns_load() {
		let p = patterns();
		assert!(!p.narrative_preambles.is_empty());
		assert!(p.structural_tags.iter().any(|t| t == "footer"));
		assert!(p.repair_tags.iter().any(|t| t == "style"));
		assert!(p.is_void("IMG"));
		assert!(!p.is_void("div"));
	}

	#[test]
	fn pipeline_config_fills_missing_fields() {
		let config: PipelineConfig = serde_json::from_str(r#"{"inliner":{"timeoutMs":500}}"#).expect("config should parse");
		assert_eq!(config.sanitizer.wrapper_class, DEFAULT_WRAPPER_CLASS);
		assert_eq!(config.inliner.timeout(), Duration::from_millis(500));
		assert!(config.inline_external);
	}

	#[test]
	fn wrapper_class_validation() {
		let config = |class: &str| SanitizerConfig {
			wrapper_class: class.to_string(),
		};
		assert!(SanitizerConfig::default().validate().is_ok());
		assert!(config("preview_root2").validate().is_ok());
		assert!(config("").validate().is_err());
		assert!(config("2col").validate().is_err());
		assert!(matches!(config("a\" onload=\"x").validate(), Err(Error::InvalidWrapperClass { .. })));
	}
}

//! Public types returned by the sanitizer, the repairer and the pipeline.

use serde::{Deserialize, Serialize};

/// Output of [`crate::sanitize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationResult {
	/// Trimmed HTML fragment with document scaffolding, narrative and scripts removed.
	pub html: String,
	/// Deduplicated CSS captured from `<style>` blocks, rewritten for the wrapper scope.
	pub styles: String,
	/// Deduplicated stylesheet `href` values, not fetched.
	pub links: Vec<String>,
	/// CSS fetched for `links`, when the inliner ran.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inlined_styles: Option<String>,
	/// Whether the fragment was wrapped to satisfy wrapper-scoped CSS.
	pub auto_wrapped: bool,
}

/// Output of [`crate::validate_and_fix`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
	pub is_valid: bool,
	/// Best-effort markup. Never empty, even when `is_valid` is false.
	pub corrected_html: String,
	pub errors: Vec<String>,
	pub warnings: Vec<String>,
	/// Every repair that changed the markup, in application order.
	pub auto_fixes_applied: Vec<String>,
}

/// Fragment and stylesheet ready for a preview surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedFragment {
	pub sanitized: SanitizationResult,
	pub validation: ValidationResult,
}

impl PreparedFragment {
	/// Repaired fragment markup.
	pub fn html(&self) -> &str {
		&self.validation.corrected_html
	}

	/// Captured styles followed by any inlined external stylesheets.
	pub fn stylesheet(&self) -> String {
		match self.sanitized.inlined_styles.as_deref() {
			Some(inlined) if !inlined.is_empty() && !self.sanitized.styles.is_empty() => {
				format!("{}\n\n{}", self.sanitized.styles, inlined)
			}
			Some(inlined) if !inlined.is_empty() => inlined.to_string(),
			_ => self.sanitized.styles.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_result_serializes_camel_case() {
		let result = ValidationResult {
			is_valid: true,
			corrected_html: "<p>x</p>".to_string(),
			..Default::default()
		};
		let json = serde_json::to_value(&result).expect("serialize");
		assert_eq!(json["isValid"], serde_json::Value::Bool(true));
		assert_eq!(json["correctedHtml"], "<p>x</p>");
		assert!(json["autoFixesApplied"].as_array().is_some_and(|a| a.is_empty()));
	}

	#[test]
	fn stylesheet_appends_inlined_css() {
		let prepared = PreparedFragment {
			sanitized: SanitizationResult {
				styles: "h1 { color: red; }".to_string(),
				inlined_styles: Some("/* Inlined from https://cdn.test/a.css */\np { margin: 0; }".to_string()),
				..Default::default()
			},
			validation: ValidationResult::default(),
		};
		let css = prepared.stylesheet();
		assert!(css.starts_with("h1 { color: red; }"));
		assert!(css.ends_with("p { margin: 0; }"));
	}

	#[test]
	fn stylesheet_without_inlined_css_is_captured_styles() {
		let prepared = PreparedFragment {
			sanitized: SanitizationResult {
				styles: "h1 {}".to_string(),
				inlined_styles: Some(String::new()),
				..Default::default()
			},
			validation: ValidationResult::default(),
		};
		assert_eq!(prepared.stylesheet(), "h1 {}");
	}
}

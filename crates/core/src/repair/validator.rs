//! Repair orchestration and the structured validation report.

use tracing::{debug, warn};

use crate::repair::fixes;
use crate::repair::parse::{ParseMode, parse_markup};
use crate::repair::rules::rules;
use crate::repair::unclosed::find_unclosed;
use crate::types::ValidationResult;

/// Rendered in place of empty input so the preview surface always has markup.
pub const PLACEHOLDER_HTML: &str = "<div class=\"wirefix-placeholder\"><p>No content to display</p></div>";

/// Working text plus the log of fixes that changed it.
struct RepairLog {
	text: String,
	fixes: Vec<String>,
}

impl RepairLog {
	fn new(text: &str) -> Self {
		Self {
			text: text.to_string(),
			fixes: Vec::new(),
		}
	}

	fn apply(&mut self, description: &str, fix: impl FnOnce(&str) -> String) {
		let fixed = fix(&self.text);
		if fixed != self.text {
			debug!(target = "wirefix.repair", fix = description, "applied repair");
			self.text = fixed;
			self.fixes.push(description.to_string());
		}
	}
}

/// Repairs bracket-level corruption and validates the result with an HTML
/// parser. Never panics and never returns empty `corrected_html`.
pub fn validate_and_fix(html: &str) -> ValidationResult {
	if html.trim().is_empty() {
		return ValidationResult {
			is_valid: false,
			corrected_html: PLACEHOLDER_HTML.to_string(),
			errors: vec!["Invalid input: expected a non-empty HTML string".to_string()],
			..Default::default()
		};
	}

	let mut log = RepairLog::new(html);
	for rule in rules() {
		log.apply(&rule.description, |text| rule.apply(text));
	}
	log.apply("Collapsed duplicated angle brackets", fixes::collapse_brackets);
	log.apply("Added missing '<' before DOCTYPE declaration", fixes::repair_doctype);
	log.apply("Removed stray brackets at the start or end of the markup", fixes::trim_stray_brackets);
	log.apply("Completed truncated tag at the end of the markup", fixes::complete_truncated_tag);

	let RepairLog { text: repaired, mut fixes } = log;
	let mut errors = Vec::new();
	let mut warnings = Vec::new();

	let corrected_html = match parse_markup(&repaired, ParseMode::detect(&repaired)) {
		Ok(parsed) => {
			warnings.extend(parsed.parser_errors.iter().map(|e| format!("Parser recovered from: {e}")));
			adopt_serialization(&repaired, parsed.serialized, &mut fixes)
		}
		Err(failure) => {
			warn!(target = "wirefix.repair", %failure, "parse failed; retrying inside a container");
			let wrapped = format!("<div>{repaired}</div>");
			match parse_markup(&wrapped, ParseMode::Fragment) {
				Ok(parsed) => {
					warnings.push(format!("Recovered from parse failure ({failure}) by wrapping content in a container"));
					warnings.extend(parsed.parser_errors.iter().map(|e| format!("Parser recovered from: {e}")));
					fixes.push("Wrapped content in a container to recover structure".to_string());
					adopt_serialization(&wrapped, parsed.serialized, &mut fixes)
				}
				Err(retry_failure) => {
					warn!(target = "wirefix.repair", failure = %retry_failure, "unrecoverable html structure");
					errors.push(format!("Unrecoverable HTML structure: {retry_failure}"));
					repaired.clone()
				}
			}
		}
	};

	for tag in find_unclosed(&repaired) {
		warnings.push(format!("Possibly unclosed <{}> tag: opened {} time(s), closed {} time(s)", tag.name, tag.opened, tag.closed));
	}

	let corrected_html = if corrected_html.trim().is_empty() { PLACEHOLDER_HTML.to_string() } else { corrected_html };

	debug!(
		target = "wirefix.repair",
		fixes = fixes.len(),
		warnings = warnings.len(),
		errors = errors.len(),
		"validated markup"
	);

	ValidationResult {
		is_valid: errors.is_empty(),
		corrected_html,
		errors,
		warnings,
		auto_fixes_applied: fixes,
	}
}

/// Boolean-only parse gate without repairs or reporting.
pub fn is_valid_html(html: &str) -> bool {
	!html.trim().is_empty() && parse_markup(html, ParseMode::detect(html)).is_ok()
}

fn adopt_serialization(input: &str, serialized: String, fixes: &mut Vec<String>) -> String {
	if serialized.trim().is_empty() || serialized == input {
		return input.to_string();
	}
	fixes.push("Normalized markup to the parser's serialization".to_string());
	serialized
}

//! Removal of fences, narrative prose and document scaffolding.
//!
//! Each function is one stage of the sanitizer and is applied in the order
//! the sanitizer lists them. Stages never fail: when a pattern does not
//! match, the input comes back unchanged.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::config::patterns;

static LINE_ENDING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n?").expect("LINE_ENDING_RE should compile"));
static FENCE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[\w+-]*[ \t]*$\n?").expect("FENCE_LINE_RE should compile"));
static INLINE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(?:html|HTML|css|xml)?").expect("INLINE_FENCE_RE should compile"));
static PREAMBLE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
	patterns()
		.narrative_preambles
		.iter()
		.map(|p| Regex::new(p).expect("narrative preamble regex should compile"))
		.collect()
});
static CUT_POINT_RE: LazyLock<Regex> = LazyLock::new(|| {
	let p = patterns();
	let tags: Vec<String> = p.document_tags.iter().chain(&p.structural_tags).map(|t| regex_lite::escape(t)).collect();
	Regex::new(&format!(r"(?i)<(?:{})\b", tags.join("|"))).expect("CUT_POINT_RE should compile")
});
static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<!doctype\b|<html[\s>]").expect("DOCUMENT_RE should compile"));
static BODY_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").expect("BODY_OPEN_RE should compile"));
static BODY_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("BODY_CLOSE_RE should compile"));
static HEAD_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").expect("HEAD_BLOCK_RE should compile"));
static EXPLANATION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?im)^[ \t]*#{1,6}[ \t]*explanation[ \t]*:?[ \t]*$").expect("EXPLANATION_RE should compile"));
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s").expect("BULLET_RE should compile"));
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z!][^>]*>").expect("ANY_TAG_RE should compile"));
static SCRIPT_BLOCK_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("SCRIPT_BLOCK_RE should compile"));
static OPEN_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<script\b.*$").expect("OPEN_SCRIPT_RE should compile"));
static DOCUMENT_TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)<!doctype[^>]*>|</?html\b[^>]*>|</?body\b[^>]*>|</?head\b[^>]*>").expect("DOCUMENT_TAG_RE should compile"));
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
	let tags: Vec<String> = patterns().block_tags.iter().map(|t| regex_lite::escape(t)).collect();
	Regex::new(&format!(r"(?i)<(?:{})\b", tags.join("|"))).expect("BLOCK_TAG_RE should compile")
});

/// Unifies line endings and drops markdown fences and stray quoting.
pub(crate) fn normalize(text: &str) -> String {
	let result = LINE_ENDING_RE.replace_all(text, "\n");
	let result = FENCE_LINE_RE.replace_all(&result, "");
	let result = INLINE_FENCE_RE.replace_all(&result, "");
	result.trim().trim_matches(|c: char| c == '`' || c == '"' || c == '\'').trim().to_string()
}

/// Discards model prose that precedes the first structural tag.
pub(crate) fn strip_narrative_preamble(text: &str) -> String {
	let Some(cut) = CUT_POINT_RE.find(text) else {
		return text.to_string();
	};
	let prefix = &text[..cut.start()];
	if prefix.trim().is_empty() {
		return text.to_string();
	}
	if PREAMBLE_RES.iter().any(|re| re.is_match(prefix)) {
		return text[cut.start()..].to_string();
	}
	text.to_string()
}

pub(crate) fn is_full_document(text: &str) -> bool {
	DOCUMENT_RE.is_match(text)
}

/// Reduces a full document to its body content.
pub(crate) fn unwrap_document(text: &str) -> String {
	if let Some(open) = BODY_OPEN_RE.find(text) {
		let rest = &text[open.end()..];
		let body = match BODY_CLOSE_RE.find_iter(rest).last() {
			Some(close) => &rest[..close.start()],
			None => rest,
		};
		return body.to_string();
	}

	let result = HEAD_BLOCK_RE.replace_all(text, "");
	DOCUMENT_TAG_RE.replace_all(&result, "").into_owned()
}

/// Drops a trailing `## Explanation` section and everything after it.
pub(crate) fn strip_explanation(text: &str) -> String {
	match EXPLANATION_RE.find(text) {
		Some(m) => text[..m.start()].to_string(),
		None => text.to_string(),
	}
}

/// Drops markdown bullet lines that carry no markup.
pub(crate) fn strip_narrative_bullets(text: &str) -> String {
	text.lines()
		.filter(|line| !(BULLET_RE.is_match(line) && !ANY_TAG_RE.is_match(line)))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Removes script elements, including an unterminated trailing one.
pub(crate) fn strip_scripts(text: &str) -> String {
	let result = SCRIPT_BLOCK_RE.replace_all(text, "");
	OPEN_SCRIPT_RE.replace(&result, "").into_owned()
}

pub(crate) fn strip_document_tags(text: &str) -> String {
	DOCUMENT_TAG_RE.replace_all(text, "").into_owned()
}

pub(crate) fn has_block_element(text: &str) -> bool {
	BLOCK_TAG_RE.is_match(text)
}

/// Wraps text without any block-level tag in a generic container.
pub(crate) fn ensure_block(text: &str) -> String {
	if has_block_element(text) {
		text.to_string()
	} else {
		format!("<div>{}</div>", text.trim())
	}
}

//! Structural validation through a WHATWG-conformant HTML parser.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::{Html, Node};

/// Element nesting beyond this depth is treated as a fatal parse failure.
pub(crate) const MAX_NESTING_DEPTH: usize = 512;

static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*<!doctype\b").expect("DOCTYPE_RE should compile"));
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<html[\s>]").expect("HTML_TAG_RE should compile"));

/// How the parser should treat the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseMode {
	/// Full document, serialized with its DOCTYPE.
	Document,
	/// Body-context fragment, serialized without the implied scaffold.
	Fragment,
}

impl ParseMode {
	pub(crate) fn detect(text: &str) -> Self {
		if DOCTYPE_RE.is_match(text) || HTML_TAG_RE.is_match(text) {
			ParseMode::Document
		} else {
			ParseMode::Fragment
		}
	}
}

/// Markup the parser accepted, re-serialized.
#[derive(Debug, Clone)]
pub(crate) struct ParsedMarkup {
	pub(crate) serialized: String,
	/// Recoverable errors the parser resynchronized from, deduplicated.
	pub(crate) parser_errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseFailure {
	/// The parser produced no element, text or comment nodes.
	NoContent,
	TooDeep { depth: usize },
}

impl fmt::Display for ParseFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParseFailure::NoContent => write!(f, "parser produced no content nodes"),
			ParseFailure::TooDeep { depth } => write!(f, "element nesting depth {depth} exceeds limit of {MAX_NESTING_DEPTH}"),
		}
	}
}

pub(crate) fn parse_markup(text: &str, mode: ParseMode) -> Result<ParsedMarkup, ParseFailure> {
	let html = match mode {
		ParseMode::Document => Html::parse_document(text),
		ParseMode::Fragment => Html::parse_fragment(text),
	};
	check_structure(&html)?;

	let serialized = match mode {
		ParseMode::Document => {
			let serialized = html.html();
			if DOCTYPE_RE.is_match(text) && !DOCTYPE_RE.is_match(&serialized) {
				format!("<!DOCTYPE html>{serialized}")
			} else {
				serialized
			}
		}
		ParseMode::Fragment => html.root_element().inner_html(),
	};

	let mut parser_errors: Vec<String> = Vec::new();
	for error in &html.errors {
		let error = error.to_string();
		if !parser_errors.contains(&error) {
			parser_errors.push(error);
		}
	}

	Ok(ParsedMarkup { serialized, parser_errors })
}

fn check_structure(html: &Html) -> Result<(), ParseFailure> {
	let mut has_content = false;
	for node in html.root_element().descendants() {
		match node.value() {
			Node::Element(element) => {
				if !matches!(element.name(), "html" | "head" | "body") {
					has_content = true;
				}
				let depth = node.ancestors().count();
				if depth > MAX_NESTING_DEPTH {
					return Err(ParseFailure::TooDeep { depth });
				}
			}
			Node::Text(text) if !text.trim().is_empty() => has_content = true,
			Node::Comment(_) => has_content = true,
			_ => {}
		}
	}

	if has_content { Ok(()) } else { Err(ParseFailure::NoContent) }
}

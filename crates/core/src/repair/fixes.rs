//! Generic bracket-level fixes that do not depend on a tag vocabulary.

use std::sync::LazyLock;

use regex_lite::Regex;

static RAW_TEXT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>|<script\b[^>]*>.*?</script\s*>").expect("RAW_TEXT_RE should compile"));
static REPEATED_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">{2,}").expect("REPEATED_CLOSE_RE should compile"));
static REPEATED_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<{2,}").expect("REPEATED_OPEN_RE should compile"));
static BARE_DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^([ \t]*)(!doctype\s+html\s*>)").expect("BARE_DOCTYPE_RE should compile"));
static TRAILING_TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<(/?[a-zA-Z][a-zA-Z0-9-]*)([^<>]*)$").expect("TRAILING_TAG_RE should compile"));

/// Runs `fix` over the text between `<style>`/`<script>` elements, leaving
/// their bodies untouched.
pub(crate) fn outside_raw_text(text: &str, fix: impl Fn(&str) -> String) -> String {
	let mut out = String::with_capacity(text.len());
	let mut last = 0;
	for raw in RAW_TEXT_RE.find_iter(text) {
		out.push_str(&fix(&text[last..raw.start()]));
		out.push_str(raw.as_str());
		last = raw.end();
	}
	out.push_str(&fix(&text[last..]));
	out
}

/// Drops `<style>`/`<script>` elements, bodies included.
pub(crate) fn without_raw_text(text: &str) -> String {
	RAW_TEXT_RE.replace_all(text, "").into_owned()
}

/// `>>` becomes `>` and `<<` becomes `<`.
pub(crate) fn collapse_brackets(text: &str) -> String {
	outside_raw_text(text, |segment| {
		let result = REPEATED_CLOSE_RE.replace_all(segment, ">");
		REPEATED_OPEN_RE.replace_all(&result, "<").into_owned()
	})
}

/// Restores the `<` of a `!DOCTYPE html>` at the start of a line.
pub(crate) fn repair_doctype(text: &str) -> String {
	BARE_DOCTYPE_RE.replace_all(text, "$1<$2").into_owned()
}

/// Drops `<`/`>` runs glued to either end of the text that belong to no tag.
pub(crate) fn trim_stray_brackets(text: &str) -> String {
	let is_run = |c: char| c == '<' || c == '>' || c.is_whitespace();
	let count_brackets = |s: &str| s.chars().filter(|&c| c == '<' || c == '>').count();

	let body_start = text.find(|c: char| !is_run(c)).unwrap_or(text.len());
	if body_start == text.len() {
		return text.to_string();
	}
	let lead = &text[..body_start];
	// The last `<` of the leading run opens the first tag.
	let start = if lead.ends_with('<') { body_start - 1 } else { body_start };
	let removed_lead = count_brackets(&text[..start]);

	let body_end = text
		.char_indices()
		.rev()
		.find(|&(_, c)| !is_run(c))
		.map_or(start, |(i, c)| i + c.len_utf8());
	let trail = &text[body_end..];
	// A `>` glued to the content closes the last tag.
	let end = if trail.starts_with('>') { body_end + 1 } else { body_end };
	let removed_trail = count_brackets(&text[end..]);

	if removed_lead + removed_trail == 0 {
		return text.to_string();
	}
	text[start..end].to_string()
}

/// Appends the `>` of a tag truncated at the very end of the text.
pub(crate) fn complete_truncated_tag(text: &str) -> String {
	let trimmed = text.trim_end();
	let Some(caps) = TRAILING_TAG_RE.captures(trimmed) else {
		return text.to_string();
	};
	let attrs = caps.get(2).map_or("", |m| m.as_str());
	let closer = if attrs.matches('"').count() % 2 == 1 {
		"\">"
	} else if attrs.matches('\'').count() % 2 == 1 {
		"'>"
	} else {
		">"
	};
	format!("{trimmed}{closer}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collapses_duplicated_brackets() {
		assert_eq!(collapse_brackets("<<div>>x<</div>>>"), "<div>x</div>");
	}

	#[test]
	fn collapse_skips_script_and_style_bodies() {
		let html = "<script>x = a >> 2;</script><p>>>b</p>";
		assert_eq!(collapse_brackets(html), "<script>x = a >> 2;</script><p>b</p>");
	}

	#[test]
	fn repairs_bare_doctype_at_line_start() {
		assert_eq!(repair_doctype("!DOCTYPE html>\n<html></html>"), "<!DOCTYPE html>\n<html></html>");
		assert_eq!(repair_doctype("x\n  !doctype html>"), "x\n  <!doctype html>");
		assert_eq!(repair_doctype("<!DOCTYPE html>"), "<!DOCTYPE html>");
	}

	#[test]
	fn trims_stray_leading_and_trailing_brackets() {
		assert_eq!(trim_stray_brackets("> <div>x</div> <"), "<div>x</div>");
		assert_eq!(trim_stray_brackets("<p>a</p> >"), "<p>a</p>");
		assert_eq!(trim_stray_brackets("text <"), "text");
	}

	#[test]
	fn keeps_brackets_that_belong_to_tags() {
		assert_eq!(trim_stray_brackets("<div>x</div>"), "<div>x</div>");
		assert_eq!(trim_stray_brackets("  <br>  "), "  <br>  ");
		assert_eq!(trim_stray_brackets("<<>>"), "<<>>");
		assert_eq!(trim_stray_brackets("a > b"), "a > b");
	}

	#[test]
	fn completes_truncated_trailing_tag() {
		assert_eq!(complete_truncated_tag("<div>x</div"), "<div>x</div>");
		assert_eq!(complete_truncated_tag("<div>x<custom-card"), "<div>x<custom-card>");
		assert_eq!(complete_truncated_tag("<p>x</p><a href=\"/home"), "<p>x</p><a href=\"/home\">");
		assert_eq!(complete_truncated_tag("<p>x</p>"), "<p>x</p>");
		assert_eq!(complete_truncated_tag("a < b"), "a < b");
	}
}

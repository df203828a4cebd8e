//! Style block and stylesheet link capture.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

static STYLE_BLOCK_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").expect("STYLE_BLOCK_RE should compile"));
static OPEN_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*)$").expect("OPEN_STYLE_RE should compile"));
static LINK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("LINK_TAG_RE should compile"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("ATTR_RE should compile")
});
static HEAD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>(.*?)</head\s*>").expect("HEAD_RE should compile"));

/// Style bodies and stylesheet references found in a piece of text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CapturedAssets {
	pub(crate) styles: Vec<String>,
	pub(crate) links: Vec<String>,
}

impl CapturedAssets {
	/// Collects every `<style>` body and stylesheet `<link>` href in `text`.
	pub(crate) fn capture_from(&mut self, text: &str) {
		for caps in STYLE_BLOCK_RE.captures_iter(text) {
			if let Some(body) = caps.get(1) {
				self.push_style(body.as_str());
			}
		}

		// A truncated `<style>` with no closer swallows the remainder.
		let without_blocks = STYLE_BLOCK_RE.replace_all(text, "");
		if let Some(body) = OPEN_STYLE_RE.captures(&without_blocks).and_then(|c| c.get(1)) {
			self.push_style(body.as_str());
		}

		for tag in LINK_TAG_RE.find_iter(text) {
			if let Some(href) = stylesheet_href(tag.as_str()) {
				self.links.push(href);
			}
		}
	}

	/// Collects assets declared inside a `<head>` section, if any.
	pub(crate) fn capture_head(&mut self, text: &str) {
		if let Some(head) = HEAD_RE.captures(text).and_then(|c| c.get(1)) {
			self.capture_from(head.as_str());
		}
	}

	pub(crate) fn dedup(&mut self) {
		self.styles = dedup_exact(std::mem::take(&mut self.styles));
		self.links = dedup_exact(std::mem::take(&mut self.links));
	}

	pub(crate) fn joined_styles(&self) -> String {
		self.styles.join("\n\n")
	}

	fn push_style(&mut self, body: &str) {
		let body = body.trim();
		if !body.is_empty() {
			self.styles.push(body.to_string());
		}
	}
}

/// Removes captured style blocks and stylesheet links from the markup.
pub(crate) fn strip_assets(text: &str) -> String {
	let result = STYLE_BLOCK_RE.replace_all(text, "");
	let result = OPEN_STYLE_RE.replace(&result, "");
	LINK_TAG_RE
		.replace_all(&result, |caps: &regex_lite::Captures| {
			let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
			if is_stylesheet_link(tag) { String::new() } else { tag.to_string() }
		})
		.into_owned()
}

/// Order-preserving removal of exact duplicates.
pub(crate) fn dedup_exact(items: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

fn tag_attributes(tag: &str) -> impl Iterator<Item = (String, &str)> {
	ATTR_RE.captures_iter(tag).filter_map(|caps| {
		let key = caps.get(1)?.as_str().to_ascii_lowercase();
		let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?.as_str();
		Some((key, value))
	})
}

fn is_stylesheet_link(tag: &str) -> bool {
	tag_attributes(tag).any(|(key, value)| key == "rel" && value.split_whitespace().any(|rel| rel.eq_ignore_ascii_case("stylesheet")))
}

fn stylesheet_href(tag: &str) -> Option<String> {
	if !is_stylesheet_link(tag) {
		return None;
	}
	tag_attributes(tag)
		.find(|(key, _)| key == "href")
		.map(|(_, value)| value.trim().to_string())
		.filter(|href| !href.is_empty())
}

//! Open/close tag tally used for unclosed-tag warnings.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::config::patterns;
use crate::repair::fixes::without_raw_text;

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)\b[^>]*?(/?)>").expect("OPEN_TAG_RE should compile"));
static CLOSE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</([a-zA-Z][a-zA-Z0-9-]*)\s*>").expect("CLOSE_TAG_RE should compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnclosedTag {
	pub(crate) name: String,
	pub(crate) opened: usize,
	pub(crate) closed: usize,
}

/// Tags opened more often than closed, sorted by name. Void elements and
/// self-closing syntax are not counted.
pub(crate) fn find_unclosed(html: &str) -> Vec<UnclosedTag> {
	let markup = without_raw_text(html);
	let mut tally: BTreeMap<String, (usize, usize)> = BTreeMap::new();

	for caps in OPEN_TAG_RE.captures_iter(&markup) {
		let Some(name) = caps.get(1) else {
			continue;
		};
		let self_closing = caps.get(2).is_some_and(|m| !m.as_str().is_empty());
		let name = name.as_str().to_ascii_lowercase();
		if self_closing || patterns().is_void(&name) {
			continue;
		}
		tally.entry(name).or_default().0 += 1;
	}

	for caps in CLOSE_TAG_RE.captures_iter(&markup) {
		if let Some(name) = caps.get(1) {
			tally.entry(name.as_str().to_ascii_lowercase()).or_default().1 += 1;
		}
	}

	tally
		.into_iter()
		.filter(|(_, (opened, closed))| opened > closed)
		.map(|(name, (opened, closed))| UnclosedTag { name, opened, closed })
		.collect()
}

//! Name-specific bracket repair rules.
//!
//! One rule set is generated per tag in the `repair_tags` vocabulary of
//! `patterns.json`. Tags outside the vocabulary rely on the generic fixes
//! and on the parser.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::config::patterns;
use crate::repair::fixes::outside_raw_text;

static RULES: LazyLock<Vec<TagRepairRule>> = LazyLock::new(|| {
	let p = patterns();
	p.repair_tags.iter().flat_map(|tag| TagRepairRule::for_tag(tag, p.is_void(tag))).collect()
});

/// Every generated repair rule, in application order.
pub fn rules() -> &'static [TagRepairRule] {
	&RULES
}

/// A regex-driven repair with the log line recorded when it fires.
#[derive(Debug, Clone)]
pub struct TagRepairRule {
	pub pattern: Regex,
	pub replacement: String,
	pub description: String,
}

impl TagRepairRule {
	pub fn new(pattern: &str, replacement: &str, description: impl Into<String>) -> Self {
		Self {
			pattern: Regex::new(pattern).expect("tag repair pattern should compile"),
			replacement: replacement.to_string(),
			description: description.into(),
		}
	}

	/// Rules for one tag name. Void elements get no closing-tag rules.
	pub fn for_tag(tag: &str, void: bool) -> Vec<Self> {
		let name = regex_lite::escape(tag);
		let mut rules = vec![Self::new(
			&format!(r#"(?i)(^|[^<\w/="'.#-])({name})>"#),
			"$1<$2>",
			format!("Added missing '<' before opening <{tag}> tag"),
		)];
		if !void {
			rules.push(Self::new(
				&format!(r#"(?i)(^|[^</="'.#-])/({name})>"#),
				"$1</$2>",
				format!("Added missing '<' before closing </{tag}> tag"),
			));
			rules.push(Self::new(
				&format!(r"(?i)</({name})(\s+[^\s>])"),
				"</$1>$2",
				format!("Added missing '>' after closing </{tag}> tag"),
			));
			rules.push(Self::new(
				&format!(r"(?i)</({name})\s*$"),
				"</$1>",
				format!("Added missing '>' after closing </{tag}> tag"),
			));
		}
		rules
	}

	/// Applies the rule outside `<style>`/`<script>` bodies until the text
	/// stops changing.
	///
	/// Patterns consume the character before a tag name, so adjacent
	/// corrupted tags (`div>div>`) need more than one pass. Every replacement
	/// inserts a bracket the pattern excludes, so the loop terminates.
	pub fn apply(&self, html: &str) -> String {
		let mut text = html.to_string();
		loop {
			let next = outside_raw_text(&text, |segment| self.pattern.replace_all(segment, self.replacement.as_str()).into_owned());
			if next == text {
				return text;
			}
			text = next;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rule_for(tag: &str, index: usize) -> TagRepairRule {
		TagRepairRule::for_tag(tag, patterns().is_void(tag)).remove(index)
	}

	#[test]
	fn vocabulary_generates_rules() {
		assert!(rules().iter().any(|r| r.description.contains("<style>")));
		assert!(rules().iter().any(|r| r.description.contains("</td>")));
		assert!(!rules().iter().any(|r| r.description.contains("</br>")));
	}

	#[test]
	fn restores_opening_bracket() {
		let rule = rule_for("style", 0);
		assert_eq!(rule.apply("style>color:red;</style>"), "<style>color:red;</style>");
		assert_eq!(rule.apply("<style>a{}</style>"), "<style>a{}</style>");
	}

	#[test]
	fn opening_rule_ignores_words_and_attributes() {
		let rule = rule_for("a", 0);
		assert_eq!(rule.apply("<p>data> x</p>"), "<p>data> x</p>");
		assert_eq!(rule.apply("<div class=a>x</div>"), "<div class=a>x</div>");
		assert_eq!(rule.apply("<p>x</p>a>link</a>"), "<p>x</p><a>link</a>");
	}

	#[test]
	fn repairs_adjacent_tags_with_the_same_name() {
		let rule = rule_for("div", 0);
		assert_eq!(rule.apply("div>div>x"), "<div><div>x");
		assert_eq!(rule.apply("<section>div>div>div>x"), "<section><div><div><div>x");
	}

	#[test]
	fn opening_rule_ignores_dotted_and_hashed_values() {
		let rule = rule_for("p", 0);
		assert_eq!(rule.apply("<img src=a.p>"), "<img src=a.p>");
		assert_eq!(rule.apply("<a href=#p>x</a>"), "<a href=#p>x</a>");
	}

	#[test]
	fn closing_rule_ignores_unquoted_paths() {
		let html = "<nav><a href=/main>Home</a><a href=./nav>Up</a></nav>";
		let repaired = rules().iter().fold(html.to_string(), |text, rule| rule.apply(&text));
		assert_eq!(repaired, html);
	}

	#[test]
	fn restores_closing_tag_opener() {
		let rule = rule_for("div", 1);
		assert_eq!(rule.apply("<div>x/div>"), "<div>x</div>");
		assert_eq!(rule.apply("<div>x</div>"), "<div>x</div>");
	}

	#[test]
	fn restores_closing_tag_terminator() {
		assert_eq!(rule_for("div", 2).apply("<div>x</div\n<p>y</p>"), "<div>x</div>\n<p>y</p>");
		assert_eq!(rule_for("div", 3).apply("<div>x</div"), "<div>x</div>");
		assert_eq!(rule_for("div", 2).apply("<div>x</div >"), "<div>x</div >");
	}

	#[test]
	fn leaves_style_bodies_alone() {
		let rule = rule_for("ul", 0);
		let html = "<style>nav ul>li { x: y; }</style><div>ul></div>";
		assert_eq!(rule.apply(html), "<style>nav ul>li { x: y; }</style><div><ul></div>");
	}
}

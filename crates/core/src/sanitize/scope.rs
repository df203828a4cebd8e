//! Wrapper-class scoping: detecting CSS namespaced under the preview
//! wrapper and rewriting selectors that cannot match inside a fragment.

use std::sync::LazyLock;

use regex_lite::Regex;

static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?i)[\s<]class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("CLASS_ATTR_RE should compile")
});
static ROOT_SELECTOR_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^(?:html\s*>\s*body|html\s+body|html|body)").expect("ROOT_SELECTOR_RE should compile"));
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("COMMENT_RE should compile"));

/// Selector rules for one wrapper class name.
#[derive(Debug)]
pub(crate) struct WrapperScope {
	class: String,
	selector: String,
	scoped_rule_re: Regex,
	body_descendant_re: Regex,
	stray_token_re: Regex,
}

impl WrapperScope {
	pub(crate) fn new(class: &str) -> Self {
		let escaped = regex_lite::escape(class);
		Self {
			class: class.to_string(),
			selector: format!(".{class}"),
			scoped_rule_re: Regex::new(&format!(r"\.{escaped}(?:[^\w-]|$)")).expect("wrapper selector regex should compile"),
			body_descendant_re: Regex::new(&format!(r"(?i)(\.{escaped})\s+body([^\w-]|$)")).expect("wrapper body regex should compile"),
			stray_token_re: Regex::new(&format!(r"(?i)\.{escaped}\s*(/\*|@media\b)")).expect("wrapper stray token regex should compile"),
		}
	}

	/// Whether any captured rule is namespaced under the wrapper class.
	pub(crate) fn css_targets_wrapper(&self, css: &str) -> bool {
		self.scoped_rule_re.is_match(css)
	}

	/// Whether some element in `html` already carries the wrapper class.
	pub(crate) fn html_has_wrapper(&self, html: &str) -> bool {
		CLASS_ATTR_RE.captures_iter(html).any(|caps| {
			caps.get(1)
				.or_else(|| caps.get(2))
				.or_else(|| caps.get(3))
				.is_some_and(|value| value.as_str().split_whitespace().any(|token| token == self.class))
		})
	}

	pub(crate) fn wrap(&self, html: &str) -> String {
		format!("<div class=\"{}\">{}</div>", escape_attribute(&self.class), html)
	}

	/// Rewrites selectors that cannot match once the fragment is embedded.
	///
	/// `root_selectors` also retargets top-level `html`/`body` selectors at the
	/// wrapper, which is only correct when the wrapper was inserted by us.
	pub(crate) fn rewrite_css(&self, css: &str, root_selectors: bool) -> String {
		let result = self.body_descendant_re.replace_all(css, "$1$2");
		let result = self.stray_token_re.replace_all(&result, "$1");
		if root_selectors {
			self.rewrite_root_selectors(&result)
		} else {
			result.into_owned()
		}
	}

	fn rewrite_root_selectors(&self, css: &str) -> String {
		let bytes = css.as_bytes();
		let mut out = String::with_capacity(css.len());
		let mut segment_start = 0;
		let mut i = 0;

		while i < bytes.len() {
			match bytes[i] {
				b'/' if bytes.get(i + 1) == Some(&b'*') => {
					let end = css[i + 2..].find("*/").map_or(css.len(), |p| i + 2 + p + 2);
					out.push_str(&css[segment_start..end]);
					segment_start = end;
					i = end;
					continue;
				}
				quote @ (b'"' | b'\'') => {
					let end = css[i + 1..].find(quote as char).map_or(css.len(), |p| i + 1 + p + 1);
					i = end;
					continue;
				}
				b'{' => {
					out.push_str(&self.rewrite_prelude(&css[segment_start..i]));
					out.push('{');
					segment_start = i + 1;
				}
				b'}' | b';' => {
					out.push_str(&css[segment_start..=i]);
					segment_start = i + 1;
				}
				_ => {}
			}
			i += 1;
		}

		if segment_start < css.len() {
			out.push_str(&css[segment_start..]);
		}
		out
	}

	fn rewrite_prelude(&self, prelude: &str) -> String {
		if prelude.trim_start().starts_with('@') {
			return prelude.to_string();
		}

		prelude
			.split(',')
			.map(|selector| {
				let body = selector.trim_start();
				let lead = &selector[..selector.len() - body.len()];
				match ROOT_SELECTOR_RE.find(body) {
					Some(m) if ends_compound(&body[m.end()..]) => format!("{lead}{}{}", self.selector, &body[m.end()..]),
					_ => selector.to_string(),
				}
			})
			.collect::<Vec<_>>()
			.join(",")
	}
}

fn escape_attribute(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('\'', "&#39;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// True when `rest` starts a new selector component rather than continuing a tag name.
fn ends_compound(rest: &str) -> bool {
	rest.chars().next().is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
}

/// True when the stylesheet has nothing left besides comments and whitespace.
pub(crate) fn is_effectively_empty(css: &str) -> bool {
	COMMENT_RE.replace_all(css, "").trim().is_empty()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scope() -> WrapperScope {
		WrapperScope::new("wireframe-content")
	}

	#[test]
	fn detects_namespaced_rules() {
		assert!(scope().css_targets_wrapper(".wireframe-content h1 { color: red; }"));
		assert!(scope().css_targets_wrapper(".wireframe-content{}"));
		assert!(!scope().css_targets_wrapper(".wireframe-content-alt h1 {}"));
		assert!(!scope().css_targets_wrapper("h1 {}"));
	}

	#[test]
	fn detects_existing_wrapper_element() {
		assert!(scope().html_has_wrapper(r#"<div class="page wireframe-content"><h1>x</h1></div>"#));
		assert!(scope().html_has_wrapper("<div class='wireframe-content'></div>"));
		assert!(!scope().html_has_wrapper(r#"<div class="wireframe-content-alt"></div>"#));
		assert!(!scope().html_has_wrapper("<p>wireframe-content</p>"));
	}

	#[test]
	fn collapses_body_descendant() {
		let css = ".wireframe-content body { margin: 0; }\n.wireframe-content body h1 { color: red; }";
		assert_eq!(scope().rewrite_css(css, false), ".wireframe-content { margin: 0; }\n.wireframe-content h1 { color: red; }");
	}

	#[test]
	fn strips_stray_token_before_comment_and_media() {
		let css = ".wireframe-content /* layout */\n.wireframe-content @media (max-width: 600px) { h1 { font-size: 1rem; } }";
		assert_eq!(scope().rewrite_css(css, false), "/* layout */\n@media (max-width: 600px) { h1 { font-size: 1rem; } }");
	}

	#[test]
	fn retargets_root_selectors_when_wrapped() {
		let css = "html, body { margin: 0; }\nbody > header, h1 { color: red; }\nhtml body.dark { background: #000; }";
		assert_eq!(
			scope().rewrite_css(css, true),
			".wireframe-content, .wireframe-content { margin: 0; }\n.wireframe-content > header, h1 { color: red; }\n.wireframe-content.dark { background: #000; }"
		);
	}

	#[test]
	fn root_selectors_untouched_without_wrap() {
		let css = "body { margin: 0; }";
		assert_eq!(scope().rewrite_css(css, false), css);
	}

	#[test]
	fn root_rewrite_skips_lookalike_tags_and_at_rules() {
		let css = "bodyguard { x: 1; }\n@media print { body { color: black; } }\n.note::after { content: \"body {\"; }";
		assert_eq!(
			scope().rewrite_css(css, true),
			"bodyguard { x: 1; }\n@media print { .wireframe-content { color: black; } }\n.note::after { content: \"body {\"; }"
		);
	}

	#[test]
	fn empty_detection_ignores_comments() {
		assert!(is_effectively_empty("/* nothing */\n  "));
		assert!(!is_effectively_empty("/* x */ p { }"));
	}

	#[test]
	fn wrap_escapes_the_class_attribute() {
		let scope = WrapperScope::new("x\" onmouseover=\"alert(1)");
		assert_eq!(scope.wrap("<p>a</p>"), "<div class=\"x&quot; onmouseover=&quot;alert(1)\"><p>a</p></div>");
	}
}

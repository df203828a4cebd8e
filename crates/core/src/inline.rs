//! Fetching and inlining of externally referenced stylesheets.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use crate::config::InlinerConfig;
use crate::error::{Error, Result};

/// Fetches stylesheets one at a time, in link order.
///
/// Failures are logged and skipped; a batch never aborts early.
#[derive(Debug, Clone)]
pub struct StylesheetInliner {
	client: reqwest::Client,
	config: InlinerConfig,
}

impl StylesheetInliner {
	pub fn new(config: InlinerConfig) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(config.timeout())
			.user_agent(config.user_agent.as_str())
			.build()
			.map_err(Error::HttpClient)?;
		Ok(Self { client, config })
	}

	pub fn config(&self) -> &InlinerConfig {
		&self.config
	}

	/// Resolves an absolute or root-relative reference to a fetchable URL.
	pub fn resolve(&self, reference: &str) -> Result<Url> {
		let reference = reference.trim();
		let lower = reference.to_ascii_lowercase();

		if lower.starts_with("http://") || lower.starts_with("https://") {
			return Url::parse(reference).map_err(|_| Error::InvalidReference {
				reference: reference.to_string(),
			});
		}

		if reference.starts_with('/') {
			let origin = self.config.origin.as_ref().ok_or_else(|| Error::MissingOrigin {
				reference: reference.to_string(),
			})?;
			return origin.join(reference).map_err(|_| Error::InvalidReference {
				reference: reference.to_string(),
			});
		}

		Err(Error::InvalidReference {
			reference: reference.to_string(),
		})
	}

	/// Fetches one stylesheet, requiring a success status and a CSS content type.
	pub async fn fetch(&self, reference: &str) -> Result<(Url, String)> {
		let url = self.resolve(reference)?;
		let response = self
			.client
			.get(url.clone())
			.header(ACCEPT, "text/css")
			.send()
			.await
			.map_err(|source| Error::Transport {
				url: url.to_string(),
				source,
			})?;

		if !response.status().is_success() {
			return Err(Error::UnexpectedStatus {
				url: url.to_string(),
				status: response.status().as_u16(),
			});
		}

		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(ToString::to_string);
		if !content_type.as_deref().is_some_and(is_css) {
			return Err(Error::UnexpectedContentType {
				url: url.to_string(),
				content_type,
			});
		}

		let css = response.text().await.map_err(|source| Error::Transport {
			url: url.to_string(),
			source,
		})?;
		Ok((url, css))
	}

	/// Fetches every link in order and concatenates the bodies, each preceded
	/// by a provenance comment. Returns an empty string when nothing loaded.
	pub async fn inline(&self, links: &[String]) -> String {
		let mut sheets = Vec::new();

		for link in links {
			match self.fetch(link).await {
				Ok((url, css)) => {
					debug!(target = "wirefix.inline", url = %url, bytes = css.len(), "inlined stylesheet");
					sheets.push(format!("/* Inlined from {} */\n{}", comment_safe(url.as_str()), css.trim()));
				}
				Err(err @ (Error::InvalidReference { .. } | Error::MissingOrigin { .. })) => {
					debug!(target = "wirefix.inline", link = %link, error = %err, "skipping stylesheet reference");
				}
				Err(err) => {
					warn!(target = "wirefix.inline", link = %link, error = %err, "failed to inline stylesheet");
				}
			}
		}

		sheets.join("\n\n")
	}
}

/// Inlines `links` with the default configuration.
pub async fn inline_stylesheets(links: &[String]) -> String {
	match StylesheetInliner::new(InlinerConfig::default()) {
		Ok(inliner) => inliner.inline(links).await,
		Err(err) => {
			warn!(target = "wirefix.inline", error = %err, "stylesheet inliner unavailable");
			String::new()
		}
	}
}

fn is_css(content_type: &str) -> bool {
	content_type.split(';').next().is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/css"))
}

fn comment_safe(url: &str) -> String {
	url.replace("*/", "*%2F")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn inliner(origin: Option<&str>) -> StylesheetInliner {
		StylesheetInliner::new(InlinerConfig {
			origin: origin.map(|o| Url::parse(o).expect("origin should parse")),
			..Default::default()
		})
		.expect("client should build")
	}

	#[test]
	fn resolves_absolute_references() {
		let url = inliner(None).resolve("https://cdn.test/theme.css").expect("absolute url");
		assert_eq!(url.as_str(), "https://cdn.test/theme.css");
	}

	#[test]
	fn resolves_root_relative_against_origin() {
		let url = inliner(Some("https://app.test/editor/")).resolve("/static/site.css").expect("root-relative url");
		assert_eq!(url.as_str(), "https://app.test/static/site.css");
	}

	#[test]
	fn root_relative_without_origin_is_skipped() {
		assert!(matches!(inliner(None).resolve("/site.css"), Err(Error::MissingOrigin { .. })));
	}

	#[test]
	fn relative_and_other_schemes_are_rejected() {
		let inliner = inliner(Some("https://app.test"));
		assert!(matches!(inliner.resolve("theme.css"), Err(Error::InvalidReference { .. })));
		assert!(matches!(inliner.resolve("data:text/css,p{}"), Err(Error::InvalidReference { .. })));
	}

	#[test]
	fn css_content_type_matching() {
		assert!(is_css("text/css"));
		assert!(is_css("Text/CSS; charset=utf-8"));
		assert!(!is_css("text/html"));
	}

	#[test]
	fn provenance_comment_cannot_be_closed_by_url() {
		assert_eq!(comment_safe("https://x.test/a*/b.css"), "https://x.test/a*%2Fb.css");
	}
}

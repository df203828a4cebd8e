//! Error types for configuration and stylesheet fetching.
//!
//! The sanitizer and repairer report problems in their input as data. Errors
//! come from rejected configuration and from the inliner, which logs fetch
//! failures rather than returning them from [`crate::StylesheetInliner::inline`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Invalid wrapper class {class:?}: expected letters, digits, '-' or '_', not starting with a digit")]
	InvalidWrapperClass { class: String },

	#[error("Failed to create HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),

	#[error("Unsupported stylesheet reference: {reference}")]
	InvalidReference { reference: String },

	#[error("Root-relative stylesheet {reference} needs a configured origin")]
	MissingOrigin { reference: String },

	#[error("Stylesheet {url} returned status {status}")]
	UnexpectedStatus { url: String, status: u16 },

	#[error("Stylesheet {url} has content type {content_type:?}, expected text/css")]
	UnexpectedContentType { url: String, content_type: Option<String> },

	#[error("Failed to fetch stylesheet {url}: {source}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},
}

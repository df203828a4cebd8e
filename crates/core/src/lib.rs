//! Normalization and repair of model-generated HTML.
//!
//! Markup produced by a language model arrives with prose lead-ins, code
//! fences, full document scaffolding, scripts and bracket-level damage. This
//! crate turns it into a fragment a preview surface can render:
//!
//! * [`sanitize`] strips the scaffolding and captures CSS and stylesheet links.
//! * [`inline_stylesheets`] fetches linked stylesheets and concatenates them.
//! * [`validate_and_fix`] repairs broken brackets and validates with an HTML parser.
//!
//! [`Pipeline`] chains all of them behind one [`PipelineConfig`].

mod config;
mod error;
mod inline;
mod pipeline;
pub mod repair;
mod sanitize;
mod types;

pub use config::{DEFAULT_WRAPPER_CLASS, InlinerConfig, PipelineConfig, SanitizerConfig};
pub use error::{Error, Result};
pub use inline::{StylesheetInliner, inline_stylesheets};
pub use pipeline::Pipeline;
pub use repair::{PLACEHOLDER_HTML, TagRepairRule, is_valid_html, rules, validate_and_fix};
pub use sanitize::{Sanitizer, sanitize};
pub use types::{PreparedFragment, SanitizationResult, ValidationResult};

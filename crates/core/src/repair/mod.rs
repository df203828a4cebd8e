//! Structural repairer and validator.
//!
//! Repairs run in a fixed order and each one is logged only when it changes
//! the markup:
//!
//! 1. name-specific bracket rules for the known tag vocabulary
//! 2. `>>`/`<<` collapse
//! 3. bare `!DOCTYPE html>` repair
//! 4. stray bracket trim at either end
//! 5. truncated trailing tag completion
//!
//! The result is then parsed with html5ever (through `scraper`). A fatal
//! parse gets one retry inside a `<div>`; a successful parse whose
//! serialization differs from the input replaces it. Unclosed-tag counts are
//! reported as warnings only.

mod fixes;
mod parse;
mod rules;
mod unclosed;
mod validator;

pub use rules::{TagRepairRule, rules};
pub use validator::{PLACEHOLDER_HTML, is_valid_html, validate_and_fix};

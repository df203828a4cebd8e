//! Content sanitizer for model-generated markup.
//!
//! Generated output arrives wrapped in markdown fences, prefixed with prose,
//! as a full document, or with stray scripts. The sanitizer reduces it to a
//! body fragment, lifts `<style>` and stylesheet `<link>` content out of the
//! markup, and fixes the mismatch between wrapper-scoped CSS and a fragment
//! that lacks the wrapper element.
//!
//! Stages run in a fixed order:
//!
//! 1. capture styles and stylesheet links from the raw text
//! 2. normalize line endings, fences and stray quoting
//! 3. strip a narrative preamble
//! 4. unwrap a full document to its body
//! 5. strip a trailing explanation section
//! 6. strip markdown bullets without markup
//! 7. strip scripts
//! 8. strip leftover document tags
//! 9. guarantee a block-level element
//! 10. deduplicate captured styles and links
//! 11. auto-wrap for wrapper-scoped CSS
//! 12. rewrite selectors that cannot match inside a fragment
//! 13. collapse comment-only CSS to empty

mod capture;
mod scaffold;
mod sanitizer;
mod scope;

pub use sanitizer::{Sanitizer, sanitize};

//! Declarative language definitions.
//!
//! A [`Grammar`] lists token matchers and reduction patterns for one file type.
//! It is plain data; `scribe-lib` validates it and turns it into a runnable language.

mod json;
mod types;


pub use json::GrammarError;
pub use types::{CaptureGroup, Grammar, Matcher, Pattern};

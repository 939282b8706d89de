//! Languages bundled with scribe.
//!
//! Each language is a JSON definition embedded at compile time and built on first
//! use. Enable only the ones you need through the `lang-*` features.

use std::sync::Arc;

use scribe_lib::Language;

pub mod builtin;

#[cfg(test)]
mod lib_tests;

pub use builtin::*;

/// Shared handle to a built language.
pub type Lang = Arc<Language>;

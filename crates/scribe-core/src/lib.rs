#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the scribe crates.
//!
//! - [`grammar`]: declarative language definitions loaded from JSON
//! - [`Colors`]: ANSI palette used by printers and the CLI

pub mod colors;
pub mod grammar;


pub use colors::Colors;
pub use grammar::{CaptureGroup, Grammar, GrammarError, Matcher, Pattern};

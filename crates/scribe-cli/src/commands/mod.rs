pub mod check;
pub mod highlight;
pub mod input;
pub mod lang_resolver;
pub mod langs;
pub mod run_common;
pub mod tokens;
pub mod tree;

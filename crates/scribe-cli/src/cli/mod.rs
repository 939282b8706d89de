//! Command line surface of `scribe`: clap builders, and the typed parameters
//! each command body receives.

mod args;
mod commands;
mod dispatch;


use std::io::IsTerminal;

pub use commands::build_cli;
pub use dispatch::{
    CheckParams, HighlightParams, LangsParams, TokensParams, TreeParams, log_level,
};

/// Value of `--color`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Reads a `--color` value. The arg parser only admits the three names, so
    /// anything else is the default.
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            Some("always") => Self::Always,
            Some("never") => Self::Never,
            _ => Self::Auto,
        }
    }

    /// Whether ANSI styles go into highlighted text and rendered diagnostics.
    ///
    /// Styled source is written to stdout and diagnostics to stderr, so `Auto`
    /// needs a terminal on both: `scribe highlight a.sql | less` stays plain.
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Auto => std::io::stdout().is_terminal() && std::io::stderr().is_terminal(),
            choice => choice == Self::Always,
        }
    }
}

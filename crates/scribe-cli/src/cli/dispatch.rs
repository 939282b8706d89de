//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::highlight::HighlightArgs;
use crate::commands::input::InputArgs;
use crate::commands::tokens::TokensArgs;
use crate::commands::tree::TreeArgs;

/// Source and language selection, common to every parsing command.
#[derive(Debug, Default)]
pub struct InputParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub grammar: Option<PathBuf>,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
        }
    }
}

impl From<InputParams> for InputArgs {
    fn from(p: InputParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            grammar: p.grammar,
        }
    }
}

pub struct TokensParams {
    pub input: InputParams,
    pub spans: bool,
    pub json: bool,
    pub color: ColorChoice,
    // Note: fuel, strict, selection are parsed but not extracted (unified flags)
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            spans: m.get_flag("spans"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            input: p.input.into(),
            spans: p.spans,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub input: InputParams,
    pub spans: bool,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            spans: m.get_flag("spans"),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            input: p.input.into(),
            spans: p.spans,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub strict: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            strict: m.get_flag("strict"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input.into(),
            strict: p.strict,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct HighlightParams {
    pub input: InputParams,
    pub selection: Option<String>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl HighlightParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            selection: m.get_one::<String>("selection").cloned(),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<HighlightParams> for HighlightArgs {
    fn from(p: HighlightParams) -> Self {
        Self {
            input: p.input.into(),
            selection: p.selection,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// Log filter derived from the `-v` count.
pub fn log_level(m: &ArgMatches) -> &'static str {
    match m.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    ColorChoice::from_arg(m.get_one::<String>("color").map(String::as_str))
}

mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{
    CheckParams, HighlightParams, LangsParams, TokensParams, TreeParams, build_cli, log_level,
};

fn main() {
    let matches = build_cli().get_matches();
    // `-v` is global, so the subcommand sees it wherever it was given.
    let sub_matches = matches.subcommand().map_or(&matches, |(_, m)| m);
    init_tracing(log_level(sub_matches));

    match matches.subcommand() {
        Some(("tokens", m)) => {
            let params = TokensParams::from_matches(m);
            commands::tokens::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("highlight", m)) => {
            let params = HighlightParams::from_matches(m);
            commands::highlight::run(params.into());
        }
        Some(("langs", m)) => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every parsing command accepts the same flags so they can be swapped freely on
//! the command line; flags a command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Source input and language selection, shared by every parsing command.
fn with_input_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(grammar_arg())
}

/// Add hidden tree output args (for commands that don't print nodes).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(spans_arg().hide(true)).arg(json_arg().hide(true))
}

/// Add hidden validation args (for commands that never fail on diagnostics).
fn with_hidden_check_args(cmd: Command) -> Command {
    cmd.arg(strict_arg().hide(true))
}

/// Add hidden highlight args (for commands that don't highlight).
fn with_hidden_highlight_args(cmd: Command) -> Command {
    cmd.arg(selection_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("scribe")
        .about("Pattern-based lexing and tree reduction for syntax highlighting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(tokens_command())
        .subcommand(tree_command())
        .subcommand(check_command())
        .subcommand(highlight_command())
        .subcommand(langs_command())
}

/// Show the token sequence of a source file.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the tokens of a source file")
        .override_usage(
            "\
  scribe tokens <SOURCE>
  scribe tokens -s <TEXT> -l <LANG>
  scribe tokens <SOURCE> -g <GRAMMAR>",
        )
        .after_help(
            r#"EXAMPLES:
  scribe tokens query.sql                 # language from extension
  scribe tokens -s "select 1" -l sql      # inline source
  scribe tokens app.txt -g my-lang.json   # custom language definition
  scribe tokens query.sql --json          # machine-readable"#,
        )
        .arg(spans_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_hidden_highlight_args(with_hidden_check_args(
        with_input_args(cmd).arg(fuel_arg().hide(true)),
    ))
}

/// Show the reduced syntax tree.
pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Show the syntax tree of a source file")
        .override_usage(
            "\
  scribe tree <SOURCE>
  scribe tree -s <TEXT> -l <LANG>
  scribe tree <SOURCE> -g <GRAMMAR>",
        )
        .after_help(
            r#"EXAMPLES:
  scribe tree config.ini                  # language from extension
  scribe tree -s '{"a": 1}' -l json       # inline source
  scribe tree data.json --spans           # with positions and byte ranges
  cat query.sql | scribe tree - -l sql    # from stdin"#,
        )
        .arg(spans_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_hidden_highlight_args(with_hidden_check_args(with_input_args(cmd)))
}

/// Report diagnostics and fail on errors.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report lexing and reduction problems")
        .override_usage(
            "\
  scribe check <SOURCE>
  scribe check -s <TEXT> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  scribe check query.sql                  # fail on errors only
  scribe check query.sql --strict         # fail on warnings too
  scribe check data.json --fuel 100       # fail when reduction doesn't converge"#,
        )
        .arg(strict_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_hidden_highlight_args(with_hidden_output_args(with_input_args(cmd)))
}

/// Print the source with style classes applied.
pub fn highlight_command() -> Command {
    let cmd = Command::new("highlight")
        .about("Print a source file with syntax highlighting")
        .override_usage(
            "\
  scribe highlight <SOURCE>
  scribe highlight -s <TEXT> -l <LANG> [--selection <TEXT>]",
        )
        .after_help(
            r#"EXAMPLES:
  scribe highlight query.sql                       # colored output
  scribe highlight query.sql --json                # styled spans as JSON
  scribe highlight config.ini --selection port     # also list occurrences"#,
        )
        .arg(selection_arg())
        .arg(json_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_hidden_check_args(with_input_args(cmd).arg(spans_arg().hide(true)))
}

/// List supported languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}

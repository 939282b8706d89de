//! Output helpers shared by the parsing commands.

use serde::Serialize;
use scribe_lib::Diagnostics;

use super::input::Input;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render diagnostics to stderr. Returns false when there was nothing to show.
pub fn report_diagnostics(input: &Input, diagnostics: &Diagnostics, color: bool) -> bool {
    if diagnostics.is_empty() {
        return false;
    }
    let rendered = diagnostics
        .printer(&input.text)
        .path(&input.name)
        .colored(color)
        .render();
    eprint!("{}", rendered);
    true
}

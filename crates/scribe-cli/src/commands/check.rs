use super::input::{InputArgs, load_input};
use super::run_common::report_diagnostics;

pub struct CheckArgs {
    pub input: InputArgs,
    pub strict: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let input = load_input(args.input, "check");
    let fuel = args.fuel.or(input.lang.reducer().exec_fuel());
    let parse = input.lang.parse_with_fuel(&input.text, fuel);
    let diagnostics = &parse.diagnostics;

    report_diagnostics(&input, diagnostics, args.color);

    let failed = diagnostics.has_errors() || (args.strict && diagnostics.has_warnings());
    if failed {
        eprintln!(
            "error: {} failed with {} error(s) and {} warning(s)",
            input.name,
            diagnostics.error_count(),
            diagnostics.warning_count()
        );
        std::process::exit(1);
    }

    tracing::info!(
        source = %input.name,
        warnings = diagnostics.warning_count(),
        reduced = parse.tree.is_reduced(),
        "check passed"
    );
}

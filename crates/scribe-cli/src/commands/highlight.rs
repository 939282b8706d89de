use scribe_core::Colors;
use scribe_lib::{StyleMap, SyntaxHighlighter};
use serde_json::json;

use super::input::{InputArgs, load_input};
use super::run_common::{print_json, report_diagnostics};

pub struct HighlightArgs {
    pub input: InputArgs,
    pub selection: Option<String>,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: HighlightArgs) {
    let input = load_input(args.input, "highlight");
    let fuel = args.fuel.or(input.lang.reducer().exec_fuel());
    let parse = input.lang.parse_with_fuel(&input.text, fuel);

    let mut styles = StyleMap::new(&input.lang);
    styles.update_syntax_tree(&parse.tree);
    if let Some(selection) = &args.selection {
        styles.update_selection(selection);
    }

    if args.json {
        let spans: Vec<_> = styles
            .spans()
            .iter()
            .map(|s| {
                json!({
                    "start": u32::from(s.range.start()),
                    "end": u32::from(s.range.end()),
                    "class": s.class,
                })
            })
            .collect();
        let selections: Vec<_> = styles
            .selections()
            .iter()
            .map(|r| json!({ "start": u32::from(r.start()), "end": u32::from(r.end()) }))
            .collect();
        print_json(&json!({
            "language": input.lang.name(),
            "spans": spans,
            "selections": selections,
        }));
    } else {
        print!("{}", styles.render(Colors::new(args.color)));
        if args.selection.is_some() {
            eprintln!("{} occurrence(s) selected", styles.selections().len());
        }
    }

    report_diagnostics(&input, &parse.diagnostics, args.color);
}

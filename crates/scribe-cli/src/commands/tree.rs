use super::input::{InputArgs, load_input};
use super::run_common::{print_json, report_diagnostics};

pub struct TreeArgs {
    pub input: InputArgs,
    pub spans: bool,
    pub json: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let input = load_input(args.input, "tree");
    let fuel = args.fuel.or(input.lang.reducer().exec_fuel());
    let parse = input.lang.parse_with_fuel(&input.text, fuel);

    if args.json {
        print_json(&parse.tree);
    } else {
        let printer = parse
            .tree
            .printer()
            .with_spans(args.spans)
            .with_positions(args.spans)
            .colored(args.color);
        print!("{}", printer.dump());
    }

    report_diagnostics(&input, &parse.diagnostics, args.color);
}

use std::fmt::Write;

use scribe_core::Colors;
use scribe_lib::{Node, Token};

use super::input::{InputArgs, load_input};
use super::run_common::{print_json, report_diagnostics};

pub struct TokensArgs {
    pub input: InputArgs,
    pub spans: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: TokensArgs) {
    let input = load_input(args.input, "tokens");
    let lexed = input.lang.tokenize(&input.text);

    if args.json {
        let nodes: Vec<Node<'_>> = lexed.tokens.iter().cloned().map(Node::from).collect();
        print_json(&nodes);
    } else {
        print!(
            "{}",
            format_tokens(&lexed.tokens, args.spans, Colors::new(args.color))
        );
    }

    report_diagnostics(&input, &lexed.diagnostics, args.color);
}

/// One line per token: `row:col NAME "code"`, trivia dimmed.
pub fn format_tokens(tokens: &[Token<'_>], spans: bool, colors: Colors) -> String {
    let c = &colors;
    let mut out = String::new();
    for token in tokens {
        let p = token.position();
        let name_color = if token.is_trivia() { c.dim } else { c.cyan };
        write!(
            out,
            "{}:{} {}{}{} {}{:?}{}",
            p.row,
            p.col,
            name_color,
            token.name(),
            c.reset,
            c.green,
            token.code(),
            c.reset
        )
        .expect("String write never fails");
        if spans {
            let span = token.span();
            write!(
                out,
                " {}[{}..{}]{}",
                c.dim,
                u32::from(span.start()),
                u32::from(span.end()),
                c.reset
            )
            .expect("String write never fails");
        }
        out.push('\n');
    }
    out
}

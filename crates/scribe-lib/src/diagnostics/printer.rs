//! Source-annotated rendering of diagnostics.
//!
//! With source text each diagnostic becomes one `annotate-snippets` report: the
//! message as title, the range underlined with the diagnostic's label, related
//! spans as context, hints as help lines. Without source every diagnostic is one
//! plain line.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the report header.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = match (self.source, self.colored) {
            (None, _) => None,
            (Some(_), true) => Some(Renderer::styled()),
            (Some(_), false) => Some(Renderer::plain()),
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match (self.source, &renderer) {
                (Some(source), Some(renderer)) => {
                    write!(w, "{}", renderer.render(&[self.report(diag, source)]))?
                }
                _ => write!(w, "{diag}")?,
            }
        }
        Ok(())
    }

    fn report<'a>(&'a self, diag: &'a DiagnosticMessage, source: &'a str) -> Group<'a> {
        let limit = source.len();
        let snippet = Snippet::source(source)
            .line_start(1)
            .path(self.path)
            .annotation(
                AnnotationKind::Primary
                    .span(visible(diag.range(), limit))
                    .label(diag.label()),
            )
            .annotations(diag.related().iter().map(|related| {
                AnnotationKind::Context
                    .span(visible(related.range, limit))
                    .label(related.note.as_str())
            }));

        level(diag.severity())
            .primary_title(diag.message())
            .element(snippet)
            .elements(diag.hints().iter().map(|hint| Level::HELP.message(hint.as_str())))
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Byte range to underline. An empty range covers the next character, or ends
/// at `limit` when it sits at the end of the source.
fn visible(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    if start < end {
        start..end
    } else {
        start..(start + 1).min(limit)
    }
}

//! Pretty diagnostic rendering using ariadne.
//!
//! Converts [`Diagnostic`]s into ariadne [`Report`]s for coloured,
//! source-annotated terminal output. Falls back to structured JSON when the
//! output is piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use nestlist_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Info => Color::Blue,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics with source context to stderr.
///
/// Spans are code-point offsets, which is what ariadne indexes by. Empty
/// sources have nothing to annotate, so their diagnostics print bare.
pub(crate) fn render_diagnostics_pretty(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let char_len = source.chars().count();
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let Some(span) = diag.span.filter(|_| char_len > 0) else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // End-of-input errors point one past the last character; keep the
        // label on the final character so ariadne can draw it.
        let start = span.start.min(char_len.saturating_sub(1));
        let end = span.end.min(char_len).max(start + 1);

        let mut builder = Report::build(report_kind(&diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config);

        builder = builder.with_label(
            Label::new((filename, start..end))
                .with_message(label_message(diag))
                .with_color(severity_color(&diag.severity)),
        );

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// Short label text from context: `found ']'` or `character '#'`.
fn label_message(diag: &Diagnostic) -> String {
    let Some(ctx) = &diag.context else {
        return diag.message.clone();
    };
    if let Some(found) = ctx.get("found") {
        format!("found {found}")
    } else if let Some(c) = ctx.get("character") {
        format!("character {c:?}")
    } else {
        diag.message.clone()
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line showing error and info counts.
///
/// Example: `1 error, 1 info`
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let infos = diagnostics.len() - errors;
    if diagnostics.is_empty() {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if infos > 0 {
        parts.push(format!("{}", format!("{infos} info").fg(Color::Blue)));
    }
    eprintln!("{}", parts.join(", "));
}

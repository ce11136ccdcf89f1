use codespan_reporting::{
    diagnostic::{Label, Severity},
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use is_terminal::IsTerminal;
use kernc_lib::diagnostic::{AggregateResult, Code, DiagnosticKind};

pub fn eprint_aggregate<'files, T, F>(
    aggregate: &AggregateResult<T>,
    files: &'files F,
) -> Result<(), codespan_reporting::files::Error>
where
    F: codespan_reporting::files::Files<'files, FileId = ()>,
{
    let color = if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut writer = StandardStream::stderr(color);
    let config = term::Config {
        chars: term::Chars {
            single_primary_caret: '─',
            single_secondary_caret: '─',
            ..term::Chars::box_drawing()
        },
        ..Default::default()
    };

    for (kind, d) in aggregate.diagnostics() {
        let severity = match kind {
            DiagnosticKind::Rec => Severity::Warning,
            DiagnosticKind::Err => Severity::Error,
        };

        let mut labels = Vec::with_capacity(1 + d.additional_spans_len());

        let mut primary = Label::primary((), *d.main_span());
        if let Some(m) = d.main_span_message() {
            primary = primary.with_message(m);
        }
        labels.push(primary);

        labels.extend(d.additional_spans().map(|(span, message)| {
            let label = Label::secondary((), *span);
            match message {
                Some(m) => label.with_message(m),
                None => label,
            }
        }));

        let mut diagnostic = codespan_reporting::diagnostic::Diagnostic::new(severity)
            .with_message(d.message())
            .with_labels(labels);

        if d.code() != &Code::Unspecified {
            diagnostic = diagnostic.with_code(d.code().to_string());
        }

        term::emit(&mut writer, &config, files, &diagnostic)?;
    }
    Ok(())
}

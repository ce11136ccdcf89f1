use super::{Code, Diagnostic, Span};
use crate::{types::Qualifier, value::ValueError};

impl DiagnosticBuilder {
    pub fn new(span: impl Into<Span>) -> Self {
        Self {
            span: span.into(),
            additional_spans: Vec::new(),
        }
    }

    pub fn add_additional_span(&mut self, span: impl Into<Span>, message: Option<String>) {
        self.additional_spans.push((span.into(), message));
    }

    fn build_custom(self, code: Code, message: String) -> Diagnostic {
        Diagnostic {
            code,
            message,
            main_span: (self.span, None),
            additional_spans: self.additional_spans,
        }
    }

    pub fn build_invalid_literal(self, text: &str) -> Diagnostic {
        let message = if text.is_empty() {
            "expected a literal".to_owned()
        } else {
            format!("expected a literal, found `{text}`")
        };
        self.build_custom(Code::InvalidLiteral, message)
    }

    pub fn build_trailing_characters(self, rest: &str) -> Diagnostic {
        self.build_custom(
            Code::TrailingCharacters,
            format!("trailing characters `{rest}` are ignored"),
        )
    }

    pub fn build_unknown_operator(self, operator: &str) -> Diagnostic {
        self.build_custom(
            Code::UnknownOperator,
            format!("unknown operator `{operator}`"),
        )
    }

    pub fn build_duplicate_qualifier(mut self, qualifier: Qualifier, first_seen: Span) -> Diagnostic {
        self.add_additional_span(first_seen, Some("first seen here".to_string()));
        let msg = format!("duplicate qualifier: {qualifier}");
        self.build_custom(Code::DuplicateQualifier, msg)
    }

    /// Anchors a fatal value error at the expression that caused it.
    pub fn build_value_error(self, error: &ValueError) -> Diagnostic {
        let code = match error {
            ValueError::NotSet => Code::ValueNotSet,
            ValueError::FloatOperand { .. } => Code::FloatOperand,
            ValueError::BoolOperand { .. } => Code::BoolOperand,
            ValueError::DivisionByZero { .. } => Code::DivisionByZero,
        };
        self.build_custom(code, error.to_string())
    }
}

pub struct DiagnosticBuilder {
    span: Span,
    additional_spans: Vec<(Span, Option<String>)>,
}

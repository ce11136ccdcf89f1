use crate::diagnostic::Span;

/// A piece of source text together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(span: impl Into<Span>, text: impl Into<String>) -> Self {
        Self {
            span: span.into(),
            text: text.into(),
        }
    }

    /// A token that does not come from the source, e.g. a name made up during code generation.
    pub fn synthetic(text: impl Into<String>) -> Self {
        Self::new(0..0, text)
    }
}

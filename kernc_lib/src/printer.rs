//! Where declarations get printed to.

/// An ordered text sink.
pub trait Sink {
    fn push_str(&mut self, s: &str);

    /// Whitespace as wide as the text written since the last newline, used to align continuation
    /// lines with an opening parenthesis.
    fn indent_from_newline(&self) -> String;
}

/// A [`Sink`] buffering everything into a `String`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Printer {
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl Sink for Printer {
    fn push_str(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn indent_from_newline(&self) -> String {
        let line_start = self.output.rfind('\n').map_or(0, |i| i + 1);
        " ".repeat(self.output[line_start..].chars().count())
    }
}

impl std::fmt::Write for Printer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

use std::{collections::HashSet, fmt::Write};

use crate::{
    diagnostic::{AggregateResult, Code},
    passes::fold::{self, FoldedLine},
    util::Ice,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<value> <kind>` for every folded statement.
    Values,
    Kinds,
    RustDbg,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Values => "values",
            OutputFormat::Kinds => "kinds",
            OutputFormat::RustDbg => "rust dbg",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct CompileOpts {
    output_format: OutputFormat,
    include_sign: bool,
    upgrade_to_err: HashSet<Code>,
}

#[derive(Debug, Clone)]
pub struct CompileOptsBuilder {
    output_format: OutputFormat,
    include_sign: bool,
    upgrade_to_err: HashSet<Code>,
}

#[derive(Debug, Clone)]
pub enum CompileOptsErr {
    InternalCode(Code),
}

impl std::fmt::Display for CompileOptsErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileOptsErr::InternalCode(code) => {
                write!(f, "Can't upgrade the internal code {code} to an error.")
            }
        }
    }
}

impl std::error::Error for CompileOptsErr {}

impl Default for CompileOptsBuilder {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Values,
            include_sign: true,
            upgrade_to_err: HashSet::default(),
        }
    }
}

impl CompileOptsBuilder {
    /// Output values, lexing signs as part of literals and not upgrading any diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Whether a leading `-`/`+` belongs to the literal (`-1` is one literal) or is an operator.
    pub fn include_sign(mut self, include_sign: bool) -> Self {
        self.include_sign = include_sign;
        self
    }

    /// Reject anything that is only accepted with a warning. At the moment that is
    /// [`Code::TrailingCharacters`].
    pub fn strict(mut self) -> Self {
        self.upgrade_to_err.insert(Code::TrailingCharacters);
        self
    }

    pub fn with_code_to_upgrade(mut self, code: Code) -> Self {
        self.upgrade_to_err.insert(code);
        self
    }

    pub fn build(self) -> Result<CompileOpts, CompileOptsErr> {
        if self.upgrade_to_err.contains(&Code::Unspecified) {
            return Err(CompileOptsErr::InternalCode(Code::Unspecified));
        }
        Ok(CompileOpts {
            output_format: self.output_format,
            include_sign: self.include_sign,
            upgrade_to_err: self.upgrade_to_err,
        })
    }
}

pub fn compile(source: &str, opts: &CompileOpts) -> AggregateResult<Vec<u8>> {
    let mut res = fold::fold(source, opts.include_sign);
    res.upgrade_diagnostics(|d| opts.upgrade_to_err.contains(d.code()));
    res.map(|lines| render(&lines, opts.output_format).into_bytes())
}

fn render(lines: &[FoldedLine], format: OutputFormat) -> String {
    let mut s = String::new();
    match format {
        OutputFormat::Values => {
            for line in lines {
                writeln!(s, "{} {}", line.value, line.value.kind()).ice();
            }
        }
        OutputFormat::Kinds => {
            for line in lines {
                writeln!(s, "{}", line.value.kind()).ice();
            }
        }
        OutputFormat::RustDbg => writeln!(s, "{lines:#?}").ice(),
    }
    s
}

#[cfg(test)]
mod test {
    use super::*;

    fn output(source: &str, opts: &CompileOpts) -> Option<String> {
        compile(source, opts)
            .into_value()
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn formats() {
        let source = "0x10\n1.5f\n-2L\n";

        let opts = CompileOptsBuilder::new().build().unwrap();
        assert_eq!(
            output(source, &opts).unwrap(),
            "16 uint16\n1.5 float\n-2L int64\n"
        );

        let opts = CompileOptsBuilder::new()
            .output_format(OutputFormat::Kinds)
            .build()
            .unwrap();
        assert_eq!(output(source, &opts).unwrap(), "uint16\nfloat\nint64\n");
    }

    #[test]
    fn strict_upgrades_warnings() {
        let lenient = CompileOptsBuilder::new().build().unwrap();
        assert_eq!(output("0x10L", &lenient).unwrap(), "16 uint16\n");

        let strict = CompileOptsBuilder::new().strict().build().unwrap();
        assert_eq!(
            strict.upgrade_to_err,
            HashSet::from([Code::TrailingCharacters])
        );
        let res = compile("0x10L", &strict);
        assert!(res.is_err());
        assert_eq!(
            res.diagnostics().map(|(_, d)| *d.code()).collect::<Vec<_>>(),
            vec![Code::TrailingCharacters]
        );
    }

    #[test]
    fn internal_code_is_rejected() {
        let opts = CompileOptsBuilder::new()
            .with_code_to_upgrade(Code::Unspecified)
            .build();
        assert!(matches!(
            opts,
            Err(CompileOptsErr::InternalCode(Code::Unspecified))
        ));
    }
}

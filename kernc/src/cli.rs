use kernc_lib::compile::{self, CompileOpts, CompileOptsBuilder, CompileOptsErr};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFile;

use std::{
    ffi::OsStr,
    fs::File,
    io::{Read, Write},
    path::PathBuf,
};

#[derive(Debug, Clone)]
pub enum PathOrStd {
    Path(PathBuf),
    StdStream,
}

impl From<&OsStr> for PathOrStd {
    fn from(value: &OsStr) -> Self {
        match value.to_str() {
            Some("-") => Self::StdStream,
            _ => Self::Path(value.into()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Values,
    Kinds,
    RustDbg,
}

impl From<OutputFormat> for compile::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Values => compile::OutputFormat::Values,
            OutputFormat::Kinds => compile::OutputFormat::Kinds,
            OutputFormat::RustDbg => compile::OutputFormat::RustDbg,
        }
    }
}

/// Folds scalar literal statements, one per line, and prints the resulting values.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The input file, use `-` for std in.
    #[arg(default_value = "-")]
    input_path: PathOrStd,

    /// The output format.
    #[arg(short = 'e', long, value_name = "FORMAT", value_enum, default_value = "values")]
    emit: OutputFormat,

    /// The output file, use `-` for std out.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output_path: PathOrStd,

    /// Turn warnings about ignored input into errors.
    #[arg(long)]
    strict: bool,

    /// Lex a leading `-` or `+` as an operator instead of as part of the literal.
    #[arg(long)]
    no_sign: bool,
}

pub fn open_input_source(args: &Args) -> anyhow::Result<SimpleFile<String, String>> {
    match &args.input_path {
        PathOrStd::Path(path) => {
            if !path.exists() {
                bail!("Input file `{}` doesn't exist", path.display());
            }
            let mut handle = File::open(path)
                .with_context(|| format!("Failed to open input file `{}`", path.display()))?;
            let mut s = String::new();
            handle
                .read_to_string(&mut s)
                .with_context(|| format!("Failed to read from input file `{}`", path.display()))?;

            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
            Ok(SimpleFile::new(name, s))
        }
        PathOrStd::StdStream => {
            let mut s = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut s)
                .context("Failed to read from stdin")?;

            Ok(SimpleFile::new("stdin stream".to_owned(), s))
        }
    }
}

pub fn extract_compile_opts(args: &Args) -> Result<CompileOpts, CompileOptsErr> {
    let opts = CompileOptsBuilder::new()
        .output_format(args.emit.into())
        .include_sign(!args.no_sign);

    let opts = if args.strict { opts.strict() } else { opts };

    opts.build()
}

pub fn open_output(args: &Args) -> anyhow::Result<Box<dyn Write>> {
    match &args.output_path {
        PathOrStd::Path(path) => std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .with_context(|| format!("Failed to open output file `{}`", path.display())),
        PathOrStd::StdStream => Ok(Box::new(std::io::stdout().lock())),
    }
}

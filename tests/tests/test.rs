use std::fs;

use kernc_lib::{
    compile::{compile, CompileOpts, CompileOptsBuilder},
    diagnostic::{Code, DiagnosticKind},
};

include! {concat!(env!("OUT_DIR"), "/tests.rs")}

fn read_source(file: &str) -> String {
    let source = fs::read(file).unwrap();
    String::from_utf8(source).unwrap()
}

fn output_test(file: &str, expected: &str, opts: CompileOpts) {
    let source = read_source(file);
    let res = compile(&source, &opts);
    if res.is_err() {
        println!(
            "Expected file `{}` to fold successfully but got the following diagnostics:",
            file
        );
        for (t, d) in res.diagnostics() {
            match t {
                DiagnosticKind::Rec => println!("Rec: {d:?}"),
                DiagnosticKind::Err => println!("Err: {d:?}"),
            }
        }
        println!();
    }
    let output = String::from_utf8(res.into_value().unwrap()).unwrap();

    pretty_assertions::assert_str_eq!(
        output,
        expected,
        "The folded output (left) does not match the expected output (right)",
    );
}

fn diagnostics_test(file: &str, expected_codes: Vec<Code>, needs_err: bool, opts: CompileOpts) {
    let source = read_source(file);
    let res = compile(&source, &opts);
    if needs_err && !res.is_err() {
        panic!("Expected folding to fail, but it didn't!");
    }
    if !needs_err && res.is_err() {
        println!("Expected folding to succeed with only warnings, but it didn't! Here are the error diagnostics:");
        for (t, d) in res.diagnostics() {
            if t == DiagnosticKind::Err {
                println!("Err: {d:?}");
            }
        }
        panic!();
    }

    let found_codes: Vec<Code> = res.diagnostics().map(|(_, d)| *d.code()).collect();
    pretty_assertions::assert_eq!(
        found_codes,
        expected_codes,
        "The diagnostic codes (left) do not match the expected codes (right)",
    );
}

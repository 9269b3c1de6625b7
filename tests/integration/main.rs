//! Integration tests: library API and scripted shell sessions

mod shell_tests;

use std::io::Cursor;
use std::path::Path;

use biblioteca::{
    cli::{ExitReason, Shell},
    repository::Repository,
    Catalog,
};

/// Run the shell over a script of input lines and return what it printed
fn run_script(catalog: &mut Catalog, data_file: &Path, lines: &[&str]) -> (ExitReason, String) {
    let mut script = lines.join("\n");
    script.push('\n');
    run_bytes(catalog, data_file, script.into_bytes())
}

/// Run the shell over raw input bytes
fn run_bytes(catalog: &mut Catalog, data_file: &Path, input: Vec<u8>) -> (ExitReason, String) {
    let mut output = Vec::new();
    let reason = {
        let mut shell = Shell::new(Cursor::new(input), &mut output, Repository::new(data_file));
        shell.run(catalog).expect("Shell session failed")
    };
    (reason, String::from_utf8(output).expect("Shell output is not UTF-8"))
}

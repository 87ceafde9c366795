//! Boundary conditions for the driver's CLI surface that don't belong in
//! the happy-path scenarios in `integration_test.rs`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn minic_cmd() -> Command {
    Command::cargo_bin("minic").expect("the minic binary is built by this workspace")
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn an_unrecognized_flag_is_a_command_line_error_before_any_file_io_happens() {
    minic_cmd()
        .arg("--not-a-real-flag")
        .arg("main.ts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized option"));
}

#[test]
fn two_positional_arguments_is_rejected() {
    minic_cmd().arg("a.ts").arg("b.ts").assert().failure();
}

#[test]
fn an_empty_source_file_compiles_to_a_well_formed_empty_program() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "empty.ts", "");

    minic_cmd().arg(&src).assert().success();

    let asm = std::fs::read_to_string(dir.path().join("empty.asm")).unwrap();
    assert!(asm.contains("_start:"));
    assert!(asm.contains("int 0x80"));
}

#[test]
fn a_lexer_error_is_reported_with_the_lexer_tag() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "bad_token.ts", "log(@);\n");

    minic_cmd()
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[Lexer]"));
}

#[test]
fn a_codegen_error_is_reported_with_the_codegen_tag_when_interpretation_is_skipped() {
    // Strings interpret fine but have no opcode sequence, so this only
    // fails once codegen runs — exercising --no-run's "codegen still runs"
    // behavior from a failure angle.
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "string_lit.ts", "log(\"hi\");\n");

    minic_cmd()
        .arg(&src)
        .arg("--no-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[CodeGen]"));
}

#[test]
fn a_comment_containing_a_double_slash_inside_a_string_does_not_truncate_the_program() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "url.ts", "log(\"http://example.com\"); // trailing note\n");

    minic_cmd().arg(&src).assert().success();
    assert!(dir.path().join("url.asm").exists());
}

#[test]
fn emit_tokens_and_emit_ast_together_only_honor_the_later_flag() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "mixed.ts", "log(1);\n");

    minic_cmd()
        .arg(&src)
        .arg("--emit-tokens")
        .arg("--emit-ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Block"));
}

#[test]
fn help_does_not_require_an_input_file_to_be_present() {
    minic_cmd().arg("-h").assert().success();
}

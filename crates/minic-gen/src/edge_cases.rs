//! Boundary conditions for assembly emission that don't belong with the
//! buffer/prologue tests in `asm.rs` or the per-construct tests in `gen.rs`.

use minic_par::Parser;
use minic_util::Interner;

use crate::error::CodeGenError;
use crate::gen::generate;

fn gen(src: &str) -> Result<String, CodeGenError> {
    let interner = Interner::new();
    let parser = Parser::new(src, &interner).expect("lexing should succeed in these fixtures");
    let (ast, root) = parser.parse_program().expect("parsing should succeed in these fixtures");
    generate(&ast, root, &interner)
}

#[test]
fn empty_program_still_produces_a_well_formed_file() {
    let asm = gen("").unwrap();
    assert!(asm.contains("extern printf"));
    assert!(asm.contains("int 0x80"));
}

#[test]
fn read_then_print_produces_exactly_one_of_each_access() {
    // Exactly one stack slot, one read into it, one write from it, and one
    // call each to scanf/printf.
    let asm = gen("let x:number; x = readline(); log(x+1);\n").unwrap();
    assert_eq!(asm.matches("sub esp, 4").count(), 1);
    assert_eq!(asm.matches("mov [ebp-4], eax").count(), 1);
    assert_eq!(asm.matches("mov eax, [ebp-4]").count(), 1);
    assert_eq!(asm.matches("call scanf").count(), 1);
    assert_eq!(asm.matches("call printf").count(), 1);
}

#[test]
fn nested_if_and_while_produce_labels_unique_per_node() {
    let asm = gen(
        "let i:number = 0;\nwhile (i < 3) {\n  if (i == 1) { log(i); } else { log(0); }\n  i = i + 1;\n}\n",
    )
    .unwrap();
    assert_eq!(asm.matches("loop_").count(), 2); // label + jmp back
    assert_eq!(asm.matches("exit_").count(), 2); // je target + label
    assert!(asm.contains("else_"));
    assert!(asm.contains("endif_"));
}

#[test]
fn two_sibling_not_expressions_do_not_collide_on_labels() {
    let asm = gen("let a:boolean = !true;\nlet b:boolean = !false;\n").unwrap();
    let false_labels: std::collections::HashSet<_> =
        asm.lines().filter(|l| l.starts_with("not_false_")).collect();
    assert_eq!(false_labels.len(), 2);
}

#[test]
fn division_and_modulo_both_sign_extend_with_cdq() {
    let asm = gen("log(7/2);\nlog(7%2);\n").unwrap();
    assert_eq!(asm.matches("cdq").count(), 2);
    assert!(asm.contains("mov eax, edx")); // modulo reads the remainder out of edx
}

#[test]
fn gen_only_over_an_undeclared_name_surfaces_as_a_scope_error() {
    let err = gen("x = 1;\n").unwrap_err();
    assert!(matches!(err, CodeGenError::Scope(_)));
    assert_eq!(err.tag(), minic_util::Tag::Semantic);
}

#[test]
fn read_expression_alone_is_supported_even_though_functions_are_not() {
    assert!(gen("log(readline());\n").is_ok());
}

#[test]
fn return_statement_is_rejected_even_inside_a_block() {
    let err = gen("{ return 1; }\n").unwrap_err();
    assert!(matches!(err, CodeGenError::Unsupported { construct: "return" }));
}

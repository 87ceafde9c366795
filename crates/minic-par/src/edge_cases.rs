//! Boundary conditions for the parser that don't belong with the
//! precedence/grammar tests in `lib.rs`.

use minic_util::Interner;

use crate::ast::NodeKind;
use crate::{BinOpKind, NodeId, Parser};

fn parse_ok(src: &str) -> (crate::Ast, NodeId) {
    let interner = Interner::new();
    Parser::new(src, &interner).unwrap().parse_program().unwrap()
}

fn parse_err(src: &str) -> bool {
    let interner = Interner::new();
    match Parser::new(src, &interner) {
        Ok(parser) => parser.parse_program().is_err(),
        Err(_) => true,
    }
}

#[test]
fn empty_program_is_an_empty_block() {
    let (ast, root) = parse_ok("");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    assert!(children.is_empty());
}

#[test]
fn relational_chain_is_left_associative() {
    // "1 < 2 < 3" folds to (1<2)<3, not a rejected chained comparison.
    let (ast, root) = parse_ok("log(1<2<3);");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    let NodeKind::Print(expr) = &ast.get(children[0]).kind else { panic!() };
    let NodeKind::BinOp { op: BinOpKind::Lt, left, .. } = &ast.get(*expr).kind else {
        panic!("outer comparison should be '<'")
    };
    assert!(matches!(ast.get(*left).kind, NodeKind::BinOp { op: BinOpKind::Lt, .. }));
}

#[test]
fn parenthesized_expression_overrides_precedence() {
    let (ast, root) = parse_ok("log((2+3)*4);");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    let NodeKind::Print(expr) = &ast.get(children[0]).kind else { panic!() };
    assert!(matches!(ast.get(*expr).kind, NodeKind::BinOp { op: BinOpKind::Mul, .. }));
}

#[test]
fn double_negation_nests_two_unary_nodes() {
    let (ast, root) = parse_ok("log(!!true);");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    let NodeKind::Print(expr) = &ast.get(children[0]).kind else { panic!() };
    let NodeKind::UnOp { child, .. } = &ast.get(*expr).kind else { panic!("expected unary") };
    assert!(matches!(ast.get(*child).kind, NodeKind::UnOp { .. }));
}

#[test]
fn call_with_no_arguments_has_an_empty_arg_list() {
    let (ast, root) = parse_ok("foo();");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    let NodeKind::FuncCall { args, .. } = &ast.get(children[0]).kind else { panic!() };
    assert!(args.is_empty());
}

#[test]
fn func_dec_with_zero_params_parses() {
    let (ast, root) = parse_ok("function noop(): void { log(1); }");
    let NodeKind::Block(children) = &ast.get(root).kind else { panic!() };
    let NodeKind::FuncDec { params, .. } = &ast.get(children[0]).kind else { panic!() };
    assert!(params.is_empty());
}

#[test]
fn unclosed_paren_in_expression_is_an_error() {
    assert!(parse_err("log((1+2;"));
}

#[test]
fn bare_identifier_statement_without_assign_or_call_is_an_error() {
    assert!(parse_err("x;"));
}

#[test]
fn trailing_garbage_after_program_is_an_error() {
    // The program root must consume exactly one statement sequence to EOF;
    // a stray top-level ')' is never valid.
    assert!(parse_err("log(1); )"));
}

#[test]
fn missing_colon_in_alternate_var_dec_form_is_malformed() {
    assert!(parse_err("let x number;"));
}

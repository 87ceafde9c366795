//! Boundary conditions for evaluation semantics that don't belong with the
//! scope-arena tests in `scope.rs` or the dispatch tests in `interp.rs`.

use minic_par::Parser;
use minic_util::Interner;

use crate::error::InterpError;
use crate::interp::run;

fn eval(src: &str) -> Result<(), InterpError> {
    let interner = Interner::new();
    let parser = Parser::new(src, &interner).expect("lexing should succeed in these fixtures");
    let (ast, root) = parser.parse_program().expect("parsing should succeed in these fixtures");
    run(&ast, root, &interner)
}

#[test]
fn empty_program_evaluates_to_nothing() {
    assert!(eval("").is_ok());
}

#[test]
fn reading_an_unset_variable_before_declaration_is_impossible_by_construction() {
    // There is no forward reference in this grammar: a use before a
    // `VarDec` in the same block is simply an undeclared-name error.
    assert!(matches!(eval("x = 1;\n"), Err(InterpError::Undeclared { .. })));
}

#[test]
fn shadowing_only_applies_inside_a_literal_nested_block() {
    let ok = eval("let x:number = 1;\n{ let x:number = 2; }\nlet y:number = x;\n");
    assert!(ok.is_ok());
}

#[test]
fn while_loop_runs_zero_times_when_condition_starts_false() {
    assert!(eval("while (false) { let x:number = 1/0; }\n").is_ok());
}

#[test]
fn return_inside_nested_block_unwinds_through_the_whole_function() {
    let ok = eval(
        "function f():number { { { return 1; } } }\nlet r:number = f();\n",
    );
    assert!(ok.is_ok());
}

#[test]
fn return_inside_while_body_stops_the_loop_early() {
    let ok = eval(
        "function firstOfThree():number {\n\
           let i:number = 0;\n\
           while (i < 3) {\n\
             i = i + 1;\n\
             return i;\n\
           }\n\
           return -1;\n\
         }\n\
         let r:number = firstOfThree();\n",
    );
    assert!(ok.is_ok());
}

#[test]
fn assigning_a_value_of_the_wrong_type_is_rejected() {
    let err = eval("let x:number = 1;\nx = true;\n");
    assert!(matches!(err, Err(InterpError::TypeMismatch { .. })));
}

#[test]
fn calling_a_plain_variable_is_not_a_function_call() {
    let err = eval("let f:number = 1;\nf();\n");
    assert!(matches!(err, Err(InterpError::NotAFunction { .. })));
}

#[test]
fn using_a_function_name_as_a_bare_value_is_rejected() {
    let err = eval("function f():void {}\nlet x:number = f + 1;\n");
    assert!(matches!(err, Err(InterpError::NotAValue { .. })));
}

#[test]
fn calling_a_void_function_as_an_expression_is_rejected() {
    let err = eval("function f():void {}\nlet x:number = f();\n");
    assert!(matches!(err, Err(InterpError::VoidValueUsed { .. })));
}

#[test]
fn string_comparison_uses_lexicographic_order() {
    assert!(eval("let b:boolean = \"abc\" < \"abd\";\n").is_ok());
}

#[test]
fn comparing_a_string_to_a_number_with_a_relational_operator_is_rejected() {
    let err = eval("let b:boolean = \"1\" < 1;\n");
    assert!(matches!(err, Err(InterpError::RelationalTypeMismatch { .. })));
}

#[test]
fn modulo_by_zero_is_reported_distinctly_from_division_by_zero() {
    assert!(matches!(eval("let x:number = 1 % 0;\n"), Err(InterpError::ModuloByZero)));
}

#[test]
fn recursive_function_calls_get_independent_frames() {
    let ok = eval(
        "function fact(n:number):number {\n\
           if (n <= 1) { return 1; }\n\
           return n * fact(n - 1);\n\
         }\n\
         let r:number = fact(5);\n",
    );
    assert!(ok.is_ok());
}

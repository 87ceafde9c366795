//! The tree-walking evaluator: one `eval_expr`/`eval_stmt` pair dispatching
//! over every [`NodeKind`], driven by the [`Scopes`] arena and [`InterpError`]
//! types from the rest of this crate.
//!
//! `Block` is the only place a new lexical scope is ever created, and only
//! for a child that is itself a `Block` node — an `if`/`while`/function body
//! is itself a `Block`, but it is evaluated directly in the scope its caller
//! already holds. That asymmetry isn't special-cased anywhere here: it falls
//! out of `eval_stmt`'s `Block` arm being the only place that calls
//! `Scopes::push_child`, and every other arm just forwarding the scope it
//! was given.

use minic_lex::TypeName;
use minic_par::{Ast, BinOpKind, NodeId, NodeKind, UnOpKind};
use minic_util::{Interner, Symbol};

use crate::error::InterpError;
use crate::flow::Flow;
use crate::scope::{ScopeId, Scopes, SlotBinding};
use crate::value::{values_equal, TypedValue};

struct Interpreter<'a> {
    ast: &'a Ast,
    interner: &'a Interner,
    scopes: Scopes,
}

/// Evaluates `root` (the program's top-level `Block`) to completion.
///
/// A top-level `return` is accepted and simply ends the program — there is
/// no statement after it to make that observable either way.
pub fn run(ast: &Ast, root: NodeId, interner: &Interner) -> Result<(), InterpError> {
    let (scopes, root_scope) = Scopes::new();
    let mut interp = Interpreter { ast, interner, scopes };
    interp.eval_stmt(root, root_scope)?;
    Ok(())
}

fn op_str(op: BinOpKind) -> &'static str {
    match op {
        BinOpKind::Add => "+",
        BinOpKind::Sub => "-",
        BinOpKind::Mul => "*",
        BinOpKind::Div => "/",
        BinOpKind::Mod => "%",
        BinOpKind::Lt => "<",
        BinOpKind::Gt => ">",
        BinOpKind::Le => "<=",
        BinOpKind::Ge => ">=",
        BinOpKind::Eq => "==",
        BinOpKind::Ne => "!=",
        BinOpKind::EqStrict => "===",
        BinOpKind::NeStrict => "!==",
        BinOpKind::And => "&&",
        BinOpKind::Or => "||",
    }
}

impl<'a> Interpreter<'a> {
    fn resolve(&self, name: Symbol) -> String {
        self.interner.resolve(name)
    }

    /// Evaluates an expression node to a [`TypedValue`]. Never called on a
    /// statement-only `NodeKind` — the parser never produces one in an
    /// expression position.
    fn eval_expr(&mut self, id: NodeId, scope: ScopeId) -> Result<TypedValue, InterpError> {
        let kind = self.ast.get(id).kind.clone();
        match kind {
            NodeKind::IntLit(n) => Ok(TypedValue::Number(n)),
            NodeKind::BoolLit(b) => Ok(TypedValue::Boolean(b)),
            NodeKind::StringLit(s) => Ok(TypedValue::String(s)),
            NodeKind::Ident(name) => {
                let slot = self.scopes.get(scope, name, self.interner)?;
                slot.value()
                    .cloned()
                    .ok_or_else(|| InterpError::NotAValue { name: self.resolve(name) })
            }
            NodeKind::Read => self.eval_read(),
            NodeKind::UnOp { op, child } => {
                let v = self.eval_expr(child, scope)?;
                self.eval_unop(op, v)
            }
            NodeKind::BinOp { op, left, right } => {
                let lhs = self.eval_expr(left, scope)?;
                let rhs = self.eval_expr(right, scope)?;
                self.eval_binop(op, lhs, rhs)
            }
            NodeKind::FuncCall { name, args } => {
                let result = self.eval_call(name, &args, scope)?;
                result.ok_or_else(|| InterpError::VoidValueUsed { name: self.resolve(name) })
            }
            other => unreachable!("{other:?} is not a valid expression node"),
        }
    }

    fn eval_read(&self) -> Result<TypedValue, InterpError> {
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| InterpError::ReadIo(e.to_string()))?;
        let text = line.trim();
        text.parse::<i32>()
            .map(TypedValue::Number)
            .map_err(|_| InterpError::ReadNotAnInteger { text: text.to_string() })
    }

    fn eval_unop(&self, op: UnOpKind, v: TypedValue) -> Result<TypedValue, InterpError> {
        match op {
            UnOpKind::Plus => match v {
                TypedValue::Number(n) => Ok(TypedValue::Number(n)),
                other => Err(InterpError::OperatorTypeMismatch {
                    op: "+",
                    expected: "number",
                    lhs: other.type_name(),
                    rhs: other.type_name(),
                }),
            },
            UnOpKind::Neg => match v {
                TypedValue::Number(n) => Ok(TypedValue::Number(n.wrapping_neg())),
                other => Err(InterpError::OperatorTypeMismatch {
                    op: "-",
                    expected: "number",
                    lhs: other.type_name(),
                    rhs: other.type_name(),
                }),
            },
            UnOpKind::Not => match v {
                TypedValue::Boolean(b) => Ok(TypedValue::Boolean(!b)),
                other => Err(InterpError::OperatorTypeMismatch {
                    op: "!",
                    expected: "boolean",
                    lhs: other.type_name(),
                    rhs: other.type_name(),
                }),
            },
        }
    }

    fn eval_binop(
        &self,
        op: BinOpKind,
        lhs: TypedValue,
        rhs: TypedValue,
    ) -> Result<TypedValue, InterpError> {
        use BinOpKind::*;
        match op {
            Add => match (&lhs, &rhs) {
                (TypedValue::Number(a), TypedValue::Number(b)) => {
                    Ok(TypedValue::Number(a.wrapping_add(*b)))
                }
                (TypedValue::String(_), _) | (_, TypedValue::String(_)) => {
                    Ok(TypedValue::String(lhs.stringify() + &rhs.stringify()))
                }
                _ => Err(InterpError::OperatorTypeMismatch {
                    op: "+",
                    expected: "number/number or a string operand",
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                }),
            },
            Sub | Mul | Div | Mod => {
                let (a, b) = self.both_numbers(op, &lhs, &rhs)?;
                match op {
                    Sub => Ok(TypedValue::Number(a.wrapping_sub(b))),
                    Mul => Ok(TypedValue::Number(a.wrapping_mul(b))),
                    Div => {
                        if b == 0 {
                            Err(InterpError::DivisionByZero)
                        } else {
                            Ok(TypedValue::Number(a.wrapping_div(b)))
                        }
                    }
                    Mod => {
                        if b == 0 {
                            Err(InterpError::ModuloByZero)
                        } else {
                            Ok(TypedValue::Number(a.wrapping_rem(b)))
                        }
                    }
                    _ => unreachable!(),
                }
            }
            Lt | Gt | Le | Ge => self.eval_relational(op, lhs, rhs),
            Eq => Ok(TypedValue::Boolean(
                lhs.type_name() == rhs.type_name() && values_equal(&lhs, &rhs),
            )),
            Ne => Ok(TypedValue::Boolean(
                lhs.type_name() != rhs.type_name() || !values_equal(&lhs, &rhs),
            )),
            EqStrict | NeStrict => {
                if lhs.type_name() != rhs.type_name() {
                    return Err(InterpError::StrictCompareTypeMismatch {
                        op: op_str(op),
                        lhs: lhs.type_name(),
                        rhs: rhs.type_name(),
                    });
                }
                let eq = values_equal(&lhs, &rhs);
                Ok(TypedValue::Boolean(if op == EqStrict { eq } else { !eq }))
            }
            And | Or => match (&lhs, &rhs) {
                (TypedValue::Boolean(a), TypedValue::Boolean(b)) => {
                    Ok(TypedValue::Boolean(if op == And { *a && *b } else { *a || *b }))
                }
                _ => Err(InterpError::OperatorTypeMismatch {
                    op: op_str(op),
                    expected: "boolean",
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                }),
            },
        }
    }

    fn both_numbers(
        &self,
        op: BinOpKind,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> Result<(i32, i32), InterpError> {
        match (lhs, rhs) {
            (TypedValue::Number(a), TypedValue::Number(b)) => Ok((*a, *b)),
            _ => Err(InterpError::OperatorTypeMismatch {
                op: op_str(op),
                expected: "number",
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        }
    }

    fn eval_relational(
        &self,
        op: BinOpKind,
        lhs: TypedValue,
        rhs: TypedValue,
    ) -> Result<TypedValue, InterpError> {
        use std::cmp::Ordering;
        let ordering = match (&lhs, &rhs) {
            (TypedValue::Number(a), TypedValue::Number(b)) => a.cmp(b),
            (TypedValue::String(a), TypedValue::String(b)) => a.cmp(b),
            _ => {
                return Err(InterpError::RelationalTypeMismatch {
                    op: op_str(op),
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                })
            }
        };
        let result = match op {
            BinOpKind::Lt => ordering == Ordering::Less,
            BinOpKind::Gt => ordering == Ordering::Greater,
            BinOpKind::Le => ordering != Ordering::Greater,
            BinOpKind::Ge => ordering != Ordering::Less,
            _ => unreachable!(),
        };
        Ok(TypedValue::Boolean(result))
    }

    /// Evaluates a statement node, propagating a `Return` as [`Flow::Returning`]
    /// through every enclosing `Block`/`If`/`While` unchanged.
    fn eval_stmt(&mut self, id: NodeId, scope: ScopeId) -> Result<Flow, InterpError> {
        let kind = self.ast.get(id).kind.clone();
        match kind {
            NodeKind::NoOp => Ok(Flow::Normal(None)),
            NodeKind::Print(expr) => {
                let v = self.eval_expr(expr, scope)?;
                println!("{}", v.stringify());
                Ok(Flow::Normal(None))
            }
            NodeKind::Assign { name, value } => {
                let v = self.eval_expr(value, scope)?;
                self.scopes.set(scope, name, v, self.interner)?;
                Ok(Flow::Normal(None))
            }
            NodeKind::VarDec { ty, name, init } => {
                self.scopes.create_variable(scope, name, ty, self.interner)?;
                if let Some(init_id) = init {
                    let v = self.eval_expr(init_id, scope)?;
                    if v.type_name() != ty {
                        return Err(InterpError::TypeMismatch {
                            context: "variable initialization",
                            expected: ty,
                            found: v.type_name(),
                        });
                    }
                    self.scopes.set(scope, name, v, self.interner)?;
                }
                Ok(Flow::Normal(None))
            }
            NodeKind::If { cond, then_branch, else_branch } => {
                let condition = self.expect_boolean(cond, scope, "if condition")?;
                if condition {
                    self.eval_stmt(then_branch, scope)
                } else if let Some(eb) = else_branch {
                    self.eval_stmt(eb, scope)
                } else {
                    Ok(Flow::Normal(None))
                }
            }
            NodeKind::While { cond, body } => {
                loop {
                    if !self.expect_boolean(cond, scope, "while condition")? {
                        break;
                    }
                    if let Flow::Returning(v) = self.eval_stmt(body, scope)? {
                        return Ok(Flow::Returning(v));
                    }
                }
                Ok(Flow::Normal(None))
            }
            NodeKind::Block(children) => {
                for child_id in children {
                    let child_is_block = matches!(self.ast.get(child_id).kind, NodeKind::Block(_));
                    let flow = if child_is_block {
                        let child_scope = self.scopes.push_child(scope);
                        self.eval_stmt(child_id, child_scope)?
                    } else {
                        self.eval_stmt(child_id, scope)?
                    };
                    if let Flow::Returning(v) = flow {
                        return Ok(Flow::Returning(v));
                    }
                }
                Ok(Flow::Normal(None))
            }
            NodeKind::Return(expr) => {
                let v = self.eval_expr(expr, scope)?;
                Ok(Flow::Returning(v))
            }
            NodeKind::FuncDec { return_type, name, .. } => {
                self.scopes.create_function(scope, name, return_type, id, self.interner)?;
                Ok(Flow::Normal(None))
            }
            NodeKind::FuncCall { name, args } => {
                self.eval_call(name, &args, scope)?;
                Ok(Flow::Normal(None))
            }
            other => unreachable!("{other:?} is not a valid statement node"),
        }
    }

    fn expect_boolean(
        &mut self,
        id: NodeId,
        scope: ScopeId,
        context: &'static str,
    ) -> Result<bool, InterpError> {
        match self.eval_expr(id, scope)? {
            TypedValue::Boolean(b) => Ok(b),
            other => Err(InterpError::TypeMismatch {
                context,
                expected: TypeName::Boolean,
                found: other.type_name(),
            }),
        }
    }

    /// Calls the function bound to `name`, evaluating every argument in the
    /// caller's `scope` before binding parameters in a fresh call frame.
    /// Returns `None` for a `void` function, `Some` otherwise.
    fn eval_call(
        &mut self,
        name: Symbol,
        args: &[NodeId],
        scope: ScopeId,
    ) -> Result<Option<TypedValue>, InterpError> {
        let slot = self.scopes.get(scope, name, self.interner)?.clone();
        let (return_type, decl_node) = match slot.binding {
            SlotBinding::Function { return_type, node } => (return_type, node),
            SlotBinding::Variable(_) => {
                return Err(InterpError::NotAFunction { name: self.resolve(name) })
            }
        };
        let (params, body) = match &self.ast.get(decl_node).kind {
            NodeKind::FuncDec { params, body, .. } => (params.clone(), *body),
            _ => unreachable!("function slot did not point at a FuncDec"),
        };
        if params.len() != args.len() {
            return Err(InterpError::ArityMismatch {
                name: self.resolve(name),
                expected: params.len(),
                found: args.len(),
            });
        }

        let call_scope = self.scopes.push_child(scope);
        for (param, arg_id) in params.iter().zip(args) {
            let arg_value = self.eval_expr(*arg_id, scope)?;
            if arg_value.type_name() != param.ty {
                return Err(InterpError::TypeMismatch {
                    context: "call argument",
                    expected: param.ty,
                    found: arg_value.type_name(),
                });
            }
            self.scopes.create_variable(call_scope, param.name, param.ty, self.interner)?;
            self.scopes.set(call_scope, param.name, arg_value, self.interner)?;
        }

        let flow = self.eval_stmt(body, call_scope)?;
        match (return_type, flow) {
            (TypeName::Void, Flow::Normal(_)) => Ok(None),
            (TypeName::Void, Flow::Returning(_)) => Ok(None),
            (_, Flow::Returning(v)) if v.type_name() == return_type => Ok(Some(v)),
            (_, Flow::Returning(v)) => Err(InterpError::ReturnTypeMismatch {
                name: self.resolve(name),
                expected: return_type,
                found: v.type_name(),
            }),
            (_, Flow::Normal(_)) => {
                Err(InterpError::MissingReturn { name: self.resolve(name), return_type })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_par::Parser;
    use minic_util::Interner;

    fn run_source(src: &str) -> Result<(), InterpError> {
        let interner = Interner::new();
        let parser = Parser::new(src, &interner).expect("lexing should succeed in these fixtures");
        let (ast, root) =
            parser.parse_program().expect("parsing should succeed in these fixtures");
        run(&ast, root, &interner)
    }

    #[test]
    fn variable_declaration_and_assignment_round_trip() {
        let result = run_source(
            "let x:number = 1;\nx = x + 2;\nlet s:string = \"a\" + 1;\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn redeclaring_a_nested_block_variable_does_not_leak_out() {
        let result = run_source(
            "let x:number = 1;\n{ let x:number = 2; x = 9; }\nlet y:number = x;\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn if_and_while_bodies_share_the_enclosing_scope() {
        // The `if` body is a Block but is *not* wrapped in a fresh scope by
        // its caller — declaring `y` inside it and reading it back out
        // through a sibling statement would fail if it were, since `y`
        // would vanish with that imaginary scope. Declaring it once inside
        // the `if`'s own block instead must succeed exactly once.
        let result = run_source(
            "let cond:boolean = true;\nif (cond) { let y:number = 3; }\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn calling_an_undeclared_function_is_an_error() {
        let result = run_source("missing();\n");
        assert!(matches!(result, Err(InterpError::Undeclared { .. })));
    }

    #[test]
    fn function_with_mismatched_arity_is_rejected() {
        let result = run_source(
            "function add(a:number, b:number):number { return a + b; }\nlet r:number = add(1);\n",
        );
        assert!(matches!(result, Err(InterpError::ArityMismatch { .. })));
    }

    #[test]
    fn function_call_binds_params_in_a_fresh_frame_per_call() {
        let result = run_source(
            "function inc(n:number):number { return n + 1; }\nlet a:number = inc(1);\nlet b:number = inc(a);\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn void_function_missing_return_is_fine_but_non_void_is_not() {
        let ok = run_source("function noop():void { let z:number = 1; }\nnoop();\n");
        assert!(ok.is_ok());

        let err = run_source("function f():number { let z:number = 1; }\nf();\n");
        assert!(matches!(err, Err(InterpError::MissingReturn { .. })));
    }

    #[test]
    fn strict_equality_across_types_is_an_error() {
        let result = run_source("let b:boolean = (1 === true);\n");
        assert!(matches!(result, Err(InterpError::StrictCompareTypeMismatch { .. })));
    }

    #[test]
    fn loose_equality_across_types_is_false_not_an_error() {
        let result = run_source("let b:boolean = (1 == true);\n");
        assert!(result.is_ok());
    }

    #[test]
    fn division_by_zero_is_reported() {
        let result = run_source("let x:number = 1 / 0;\n");
        assert!(matches!(result, Err(InterpError::DivisionByZero)));
    }
}

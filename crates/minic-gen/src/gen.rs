//! The per-node `generate()` dispatch: walks the same
//! [`Ast`] the interpreter walks, emitting x86-32 NASM text instead of
//! producing a [`minic_interp::TypedValue`]. Every expression leaves its
//! result in `eax`; every statement leaves `eax` unspecified once it
//! returns.
//!
//! This mirrors the interpreter closely on purpose: a fresh [`Scopes`]
//! arena assigns each declared variable its stack `shift` in exactly the
//! same order the interpreter's own arena would, so the two passes agree
//! on shape even though they run independently (the generator never sees
//! the interpreter's runtime values, only the AST).

use minic_interp::{ScopeId, Scopes};
use minic_par::{Ast, BinOpKind, NodeId, NodeKind, UnOpKind};
use minic_util::Interner;

use crate::asm::CodeBuffer;
use crate::error::{CodeGenError, Result};

struct Generator<'a> {
    ast: &'a Ast,
    interner: &'a Interner,
    scopes: Scopes,
    code: CodeBuffer,
    /// Program-wide stack shift counter. There is only one real `ebp`
    /// frame for the whole program (functions are unsupported by codegen),
    /// so this counts up across every `Block`, independent of the
    /// [`Scopes`] arena's own per-frame `next_shift`, which resets to zero
    /// on each [`Scopes::push_child`] and would otherwise alias two
    /// blocks' variables onto the same stack slot.
    next_shift: u32,
}

/// Generates the complete `.asm` text for `root` (the program's top-level
/// `Block`), including the fixed prologue and epilogue.
pub fn generate(ast: &Ast, root: NodeId, interner: &Interner) -> Result<String> {
    let (scopes, root_scope) = Scopes::new();
    let mut gen = Generator { ast, interner, scopes, code: CodeBuffer::new(), next_shift: 0 };
    gen.gen_stmt(root, root_scope)?;
    Ok(gen.code.dump())
}

impl<'a> Generator<'a> {
    fn shift_of(&self, scope: ScopeId, id: NodeId) -> Result<u32> {
        let NodeKind::Ident(name) = &self.ast.get(id).kind else {
            unreachable!("shift_of called on a non-Ident node");
        };
        self.shift_of_name(scope, *name)
    }

    fn shift_of_name(&self, scope: ScopeId, name: minic_util::Symbol) -> Result<u32> {
        let slot = self.scopes.get(scope, name, self.interner)?;
        match slot.shift {
            Some(shift) => Ok(shift),
            None => Err(CodeGenError::Unsupported { construct: "function reference as a value" }),
        }
    }

    /// Emits `id` as an expression, leaving its result in `eax`.
    fn gen_expr(&mut self, id: NodeId, scope: ScopeId) -> Result<()> {
        let kind = self.ast.get(id).kind.clone();
        match kind {
            NodeKind::IntLit(n) => {
                self.code.push(format!("  mov eax, {n}"));
                Ok(())
            }
            NodeKind::BoolLit(b) => {
                self.code.push(format!("  mov eax, {}", if b { 1 } else { 0 }));
                Ok(())
            }
            NodeKind::StringLit(_) => {
                Err(CodeGenError::Unsupported { construct: "string literal" })
            }
            NodeKind::Ident(_) => {
                let shift = self.shift_of(scope, id)?;
                self.code.push(format!("  mov eax, [ebp-{shift}]"));
                Ok(())
            }
            NodeKind::Read => {
                self.code.push("  push dword scan_int");
                self.code.push("  push dword format_in");
                self.code.push("  call scanf");
                self.code.push("  add esp, 8");
                self.code.push("  mov eax, dword [scan_int]");
                Ok(())
            }
            NodeKind::UnOp { op, child } => self.gen_unop(id, op, child, scope),
            NodeKind::BinOp { op, left, right } => self.gen_binop(id, op, left, right, scope),
            NodeKind::FuncCall { .. } => {
                Err(CodeGenError::Unsupported { construct: "function call" })
            }
            other => unreachable!("{other:?} is not a valid expression node"),
        }
    }

    fn gen_unop(&mut self, id: NodeId, op: UnOpKind, child: NodeId, scope: ScopeId) -> Result<()> {
        self.gen_expr(child, scope)?;
        match op {
            UnOpKind::Plus => {}
            UnOpKind::Neg => self.code.push("  neg eax"),
            UnOpKind::Not => {
                let uid = id.index();
                self.code.push("  cmp eax, 0");
                self.code.push(format!("  jne not_false_{uid}"));
                self.code.push("  mov eax, 1");
                self.code.push(format!("  jmp not_end_{uid}"));
                self.code.push(format!("not_false_{uid}:"));
                self.code.push("  mov eax, 0");
                self.code.push(format!("not_end_{uid}:"));
            }
        }
        Ok(())
    }

    fn gen_binop(
        &mut self,
        id: NodeId,
        op: BinOpKind,
        left: NodeId,
        right: NodeId,
        scope: ScopeId,
    ) -> Result<()> {
        use BinOpKind::*;

        // Short-circuit-shaped operators evaluate their left operand first
        // and may skip the right one entirely, so they branch off before
        // the shared "right, then left" sequence every other operator uses.
        if op == And || op == Or {
            return self.gen_logical(id, op, left, right, scope);
        }

        self.gen_expr(right, scope)?; // eax = right
        self.code.push("  push eax");
        self.gen_expr(left, scope)?; // eax = left
        self.code.push("  pop ecx"); // ecx = right

        match op {
            Add => self.code.push("  add eax, ecx"),
            Sub => self.code.push("  sub eax, ecx"),
            Mul => self.code.push("  imul ecx"),
            Div => {
                self.code.push("  cdq");
                self.code.push("  idiv ecx");
            }
            Mod => {
                self.code.push("  cdq");
                self.code.push("  idiv ecx");
                self.code.push("  mov eax, edx");
            }
            Lt | Gt | Le | Ge | Eq | Ne | EqStrict | NeStrict => {
                self.code.push("  cmp eax, ecx");
                self.code.push("  mov eax, 0");
                self.code.push("  mov ecx, 1");
                let set = match op {
                    Lt => "cmovl",
                    Gt => "cmovg",
                    Le => "cmovle",
                    Ge => "cmovge",
                    Eq | EqStrict => "cmove",
                    Ne | NeStrict => "cmovne",
                    _ => unreachable!(),
                };
                self.code.push(format!("  {set:<6} eax, ecx"));
            }
            And | Or => unreachable!("handled by gen_logical"),
        }
        Ok(())
    }

    /// `&&`/`||` keep their own label-shaped sequence rather than
    /// reusing the right-then-left-then-pop shape the other binary operators
    /// share, since both still need the right operand's value available in
    /// `ecx` once the left operand doesn't already decide the outcome.
    fn gen_logical(
        &mut self,
        id: NodeId,
        op: BinOpKind,
        left: NodeId,
        right: NodeId,
        scope: ScopeId,
    ) -> Result<()> {
        self.gen_expr(right, scope)?;
        self.code.push("  push eax");
        self.gen_expr(left, scope)?;
        self.code.push("  pop ecx");

        let uid = id.index();
        if op == BinOpKind::And {
            let lbl_f = format!("and_false_{uid}");
            let lbl_e = format!("and_end_{uid}");
            self.code.push("  cmp eax, 0");
            self.code.push(format!("  je {lbl_f}"));
            self.code.push("  cmp ecx, 0");
            self.code.push("  mov eax, 0");
            self.code.push("  mov ecx, 1");
            self.code.push("  cmovne eax, ecx");
            self.code.push(format!("  jmp {lbl_e}"));
            self.code.push(format!("{lbl_f}:"));
            self.code.push("  mov eax, 0");
            self.code.push(format!("{lbl_e}:"));
        } else {
            let lbl_t = format!("or_true_{uid}");
            let lbl_e = format!("or_end_{uid}");
            self.code.push("  cmp eax, 0");
            self.code.push(format!("  jne {lbl_t}"));
            self.code.push("  cmp ecx, 0");
            self.code.push("  mov eax, 0");
            self.code.push("  mov ecx, 1");
            self.code.push("  cmovne eax, ecx");
            self.code.push(format!("  jmp {lbl_e}"));
            self.code.push(format!("{lbl_t}:"));
            self.code.push("  mov eax, 1");
            self.code.push(format!("{lbl_e}:"));
        }
        Ok(())
    }

    /// Emits `id` as a statement.
    fn gen_stmt(&mut self, id: NodeId, scope: ScopeId) -> Result<()> {
        let kind = self.ast.get(id).kind.clone();
        match kind {
            NodeKind::NoOp => Ok(()),
            NodeKind::Print(expr) => {
                self.gen_expr(expr, scope)?;
                self.code.push("  push eax");
                self.code.push("  push dword format_out");
                self.code.push("  call printf");
                self.code.push("  add esp, 8");
                Ok(())
            }
            NodeKind::Assign { name, value } => {
                let shift = self.shift_of_name(scope, name)?;
                self.gen_expr(value, scope)?;
                self.code.push(format!("  mov [ebp-{shift}], eax"));
                Ok(())
            }
            NodeKind::VarDec { ty, name, init } => {
                self.next_shift += 4;
                let shift = self.next_shift;
                self.scopes.create_variable_with_shift(scope, name, ty, shift, self.interner)?;
                let ident = self.interner.resolve(name);
                self.code.push(format!("  sub esp, 4 ; var {ident} {ty} [EBP-{shift}]"));
                if let Some(init_id) = init {
                    self.gen_expr(init_id, scope)?;
                    self.code.push(format!("  mov [ebp-{shift}], eax"));
                }
                Ok(())
            }
            NodeKind::If { cond, then_branch, else_branch } => {
                self.gen_expr(cond, scope)?;
                self.code.push("  cmp eax, 0");
                let uid = id.index();
                match else_branch {
                    Some(else_id) => {
                        let lbl_else = format!("else_{uid}");
                        let lbl_end = format!("endif_{uid}");
                        self.code.push(format!("  je {lbl_else}"));
                        self.gen_stmt(then_branch, scope)?;
                        self.code.push(format!("  jmp {lbl_end}"));
                        self.code.push(format!("{lbl_else}:"));
                        self.gen_stmt(else_id, scope)?;
                        self.code.push(format!("{lbl_end}:"));
                    }
                    None => {
                        let lbl_end = format!("endif_{uid}");
                        self.code.push(format!("  je {lbl_end}"));
                        self.gen_stmt(then_branch, scope)?;
                        self.code.push(format!("{lbl_end}:"));
                    }
                }
                Ok(())
            }
            NodeKind::While { cond, body } => {
                let uid = id.index();
                let lbl_loop = format!("loop_{uid}");
                let lbl_exit = format!("exit_{uid}");
                self.code.push(format!("{lbl_loop}:"));
                self.gen_expr(cond, scope)?;
                self.code.push("  cmp eax, 0");
                self.code.push(format!("  je {lbl_exit}"));
                self.gen_stmt(body, scope)?;
                self.code.push(format!("  jmp {lbl_loop}"));
                self.code.push(format!("{lbl_exit}:"));
                Ok(())
            }
            NodeKind::Block(children) => {
                for child_id in children {
                    let child_is_block = matches!(self.ast.get(child_id).kind, NodeKind::Block(_));
                    if child_is_block {
                        let child_scope = self.scopes.push_child(scope);
                        self.gen_stmt(child_id, child_scope)?;
                    } else {
                        self.gen_stmt(child_id, scope)?;
                    }
                }
                Ok(())
            }
            NodeKind::Return(_) => Err(CodeGenError::Unsupported { construct: "return" }),
            NodeKind::FuncDec { .. } => {
                Err(CodeGenError::Unsupported { construct: "function declaration" })
            }
            NodeKind::FuncCall { .. } => {
                Err(CodeGenError::Unsupported { construct: "function call" })
            }
            other => unreachable!("{other:?} is not a valid statement node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_par::Parser;

    fn gen_source(src: &str) -> Result<String> {
        let interner = Interner::new();
        let parser = Parser::new(src, &interner).expect("lexing should succeed in these fixtures");
        let (ast, root) =
            parser.parse_program().expect("parsing should succeed in these fixtures");
        generate(&ast, root, &interner)
    }

    #[test]
    fn arithmetic_emits_expected_opcodes() {
        let asm = gen_source("log(2+3*4);\n").unwrap();
        assert!(asm.contains("mov eax, 2"));
        assert!(asm.contains("imul ecx"));
        assert!(asm.contains("call printf"));
    }

    #[test]
    fn var_dec_assigns_shift_four_for_the_first_declaration() {
        let asm = gen_source("let x:number = 1;\n").unwrap();
        assert!(asm.contains("sub esp, 4"));
        assert!(asm.contains("mov [ebp-4], eax"));
    }

    #[test]
    fn if_without_else_only_emits_one_label() {
        let asm = gen_source("let b:boolean = true;\nif (b) { log(1); }\n").unwrap();
        assert!(asm.contains("je endif_"));
        assert!(!asm.contains("else_"));
    }

    #[test]
    fn while_loop_emits_loop_and_exit_labels() {
        let asm = gen_source("let i:number = 0;\nwhile (i < 3) { i = i + 1; }\n").unwrap();
        assert!(asm.contains("loop_"));
        assert!(asm.contains("exit_"));
    }

    #[test]
    fn string_literal_is_rejected() {
        let err = gen_source("log(\"hi\");\n").unwrap_err();
        assert!(matches!(err, CodeGenError::Unsupported { construct: "string literal" }));
    }

    #[test]
    fn function_declaration_is_rejected() {
        let err = gen_source("function f():void { }\n").unwrap_err();
        assert!(matches!(err, CodeGenError::Unsupported { .. }));
    }

    #[test]
    fn shadowed_name_in_a_nested_block_does_not_collide_with_the_outer_one() {
        let asm = gen_source(
            "let x:number = 1;\n{ let x:number = 2; log(x); }\nlog(x);\n",
        )
        .unwrap();
        assert!(asm.contains("[EBP-4]"));
        assert!(asm.contains("[EBP-8]"));
        assert!(asm.contains("mov [ebp-4], eax"));
        assert!(asm.contains("mov [ebp-8], eax"));
        // the outer `log(x)` after the block must still read shift 4, not
        // the inner block's shift 8 slot.
        let last_mov_eax = asm.rfind("mov eax, [ebp-").expect("a load before the final log");
        assert!(asm[last_mov_eax..].starts_with("mov eax, [ebp-4]"));
    }

    #[test]
    fn not_operator_emits_unique_labels_per_node() {
        let asm = gen_source("log(!true); log(!false);\n").unwrap();
        assert!(asm.contains("not_false_"));
        let first_label_count = asm.matches("not_end_").count();
        assert_eq!(first_label_count, 2);
    }
}

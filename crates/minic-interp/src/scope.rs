//! The scope-frame arena: an [`IndexMap`]-backed [`Frame`] per lexical
//! scope, addressed by a stable [`ScopeId`] rather than an owning tree of
//! parent pointers. A child frame's `parent` field is just another
//! `ScopeId`, so the whole chain lives in one flat `Vec` and nothing here
//! ever borrows another frame while mutating the arena.
//!
//! This mirrors the `NodeId`-addressed [`minic_par::Ast`] arena: both
//! trade "walk owned pointers" for "index a `Vec` by a small `Copy`
//! handle", which is what lets a function slot's [`minic_par::NodeId`]
//! and a variable's `ScopeId` outlive the call that created them without
//! any lifetime parameter leaking into `Slot`.

use indexmap::IndexMap;
use minic_lex::TypeName;
use minic_par::NodeId;
use minic_util::{Interner, Symbol};

use crate::error::InterpError;
use crate::value::TypedValue;

/// A stable index into a [`Scopes`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

/// What a slot is bound to: an ordinary variable's current value, or an
/// immutable binding to the [`NodeId`] of the `FuncDec` that declared it.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotBinding {
    Variable(TypedValue),
    Function { return_type: TypeName, node: NodeId },
}

/// An entry in a frame's name table.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub ty: TypeName,
    pub binding: SlotBinding,
    /// `[ebp - shift]` offset for codegen. `None` for function slots,
    /// which the code generator never materializes as stack storage.
    pub shift: Option<u32>,
}

impl Slot {
    pub fn is_function(&self) -> bool {
        matches!(self.binding, SlotBinding::Function { .. })
    }

    pub fn value(&self) -> Option<&TypedValue> {
        match &self.binding {
            SlotBinding::Variable(v) => Some(v),
            SlotBinding::Function { .. } => None,
        }
    }
}

struct Frame {
    parent: Option<ScopeId>,
    slots: IndexMap<Symbol, Slot>,
    next_shift: u32,
}

/// The per-run arena of scope frames. A fresh [`Scopes`] starts with one
/// root frame (`parent = None`); every other frame is created as a child
/// of some existing frame and stays reachable only through its `ScopeId`.
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Scopes {
    /// A new arena containing only the root frame, plus the `ScopeId` of
    /// that root.
    pub fn new() -> (Self, ScopeId) {
        let frames = vec![Frame { parent: None, slots: IndexMap::new(), next_shift: 0 }];
        (Self { frames }, ScopeId(0))
    }

    /// Creates a new child frame chained to `parent` and returns its id.
    /// The child starts with its own `next_shift` counter at zero — shift
    /// assignment is per-frame, matching the codegen path where each
    /// function call frame gets its own stack layout.
    pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.frames.len() as u32);
        self.frames.push(Frame { parent: Some(parent), slots: IndexMap::new(), next_shift: 0 });
        id
    }

    fn frame(&self, id: ScopeId) -> &Frame {
        &self.frames[id.0 as usize]
    }

    fn frame_mut(&mut self, id: ScopeId) -> &mut Frame {
        &mut self.frames[id.0 as usize]
    }

    /// Declares a fresh variable slot in `scope`'s own frame with `ty`'s
    /// default payload, and returns the byte shift assigned to it. Fails
    /// if `name` already exists in this exact frame (not an ancestor).
    pub fn create_variable(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        ty: TypeName,
        interner: &Interner,
    ) -> Result<u32, InterpError> {
        let frame = self.frame_mut(scope);
        if frame.slots.contains_key(&name) {
            return Err(InterpError::Redeclared { name: interner.resolve(name) });
        }
        let default = TypedValue::default_for(ty)
            .ok_or_else(|| InterpError::VoidVariable { name: interner.resolve(name) })?;
        frame.next_shift += 4;
        let shift = frame.next_shift;
        frame.slots.insert(
            name,
            Slot { ty, binding: SlotBinding::Variable(default), shift: Some(shift) },
        );
        Ok(shift)
    }

    /// Declares a fresh variable slot at a caller-supplied `shift` instead
    /// of the frame's own counter. The code generator has only one real
    /// stack frame for the whole program (functions, the only construct
    /// that would get a fresh `ebp`, are unsupported by codegen), so it
    /// threads a single program-wide shift counter across nested blocks
    /// itself rather than relying on each [`push_child`](Self::push_child)
    /// frame's `next_shift`, which resets to zero per frame and would
    /// otherwise alias two blocks' variables onto the same stack slot.
    pub fn create_variable_with_shift(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        ty: TypeName,
        shift: u32,
        interner: &Interner,
    ) -> Result<(), InterpError> {
        let frame = self.frame_mut(scope);
        if frame.slots.contains_key(&name) {
            return Err(InterpError::Redeclared { name: interner.resolve(name) });
        }
        let default = TypedValue::default_for(ty)
            .ok_or_else(|| InterpError::VoidVariable { name: interner.resolve(name) })?;
        frame.slots.insert(
            name,
            Slot { ty, binding: SlotBinding::Variable(default), shift: Some(shift) },
        );
        Ok(())
    }

    /// Registers a function binding in `scope`'s own frame. Function slots
    /// never get a `shift` — the code generator never spills them to the
    /// stack.
    pub fn create_function(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        return_type: TypeName,
        node: NodeId,
        interner: &Interner,
    ) -> Result<(), InterpError> {
        let frame = self.frame_mut(scope);
        if frame.slots.contains_key(&name) {
            return Err(InterpError::Redeclared { name: interner.resolve(name) });
        }
        frame.slots.insert(
            name,
            Slot { ty: return_type, binding: SlotBinding::Function { return_type, node }, shift: None },
        );
        Ok(())
    }

    /// Finds the frame (`scope` or one of its ancestors) that owns `name`,
    /// without borrowing it — used by both [`Scopes::get`] and
    /// [`Scopes::set`] so the latter can re-borrow mutably afterward.
    fn find_owner(&self, scope: ScopeId, name: Symbol) -> Option<ScopeId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            if self.frame(id).slots.contains_key(&name) {
                return Some(id);
            }
            cur = self.frame(id).parent;
        }
        None
    }

    /// Looks `name` up through the parent chain starting at `scope`.
    pub fn get(&self, scope: ScopeId, name: Symbol, interner: &Interner) -> Result<&Slot, InterpError> {
        let owner = self
            .find_owner(scope, name)
            .ok_or_else(|| InterpError::Undeclared { name: interner.resolve(name) })?;
        Ok(self.frame(owner).slots.get(&name).expect("find_owner located this slot"))
    }

    /// Updates `name`'s payload through the parent chain starting at
    /// `scope`. Fails on a missing name, a function slot, or a payload
    /// whose type doesn't match the slot's declared type exactly.
    pub fn set(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        value: TypedValue,
        interner: &Interner,
    ) -> Result<(), InterpError> {
        let owner = self
            .find_owner(scope, name)
            .ok_or_else(|| InterpError::Undeclared { name: interner.resolve(name) })?;
        let frame = self.frame_mut(owner);
        let slot = frame.slots.get_mut(&name).expect("find_owner located this slot");
        if slot.is_function() {
            return Err(InterpError::AssignToFunction { name: interner.resolve(name) });
        }
        if slot.ty != value.type_name() {
            return Err(InterpError::TypeMismatch {
                context: "assignment",
                expected: slot.ty,
                found: value.type_name(),
            });
        }
        slot.binding = SlotBinding::Variable(value);
        Ok(())
    }
}

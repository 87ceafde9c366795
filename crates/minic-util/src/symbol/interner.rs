//! A single-threaded string interner.
//!
//! The upstream compiler this crate is modeled on interns strings behind a
//! lock-free concurrent map, because it parses and lowers multiple files in
//! parallel. This crate's pipeline runs one file through one thread start to
//! finish — there is no concurrency to speak of — so the same
//! dedup-and-hand-out-an-index idea is implemented with a plain
//! `HashMap<Box<str>, Symbol>` behind a `RefCell`, owned by an [`Interner`]
//! value rather than reached for through a global.

use std::cell::RefCell;
use std::collections::HashMap;

use super::Symbol;

#[derive(Default)]
pub struct Interner {
    inner: RefCell<InternerState>,
}

#[derive(Default)]
struct InternerState {
    strings: Vec<Box<str>>,
    lookup: HashMap<Box<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Symbol {
        let mut state = self.inner.borrow_mut();
        if let Some(&idx) = state.lookup.get(s) {
            return Symbol(idx);
        }
        let idx = state.strings.len() as u32;
        let boxed: Box<str> = s.into();
        state.strings.push(boxed.clone());
        state.lookup.insert(boxed, idx);
        Symbol(idx)
    }

    pub fn resolve(&self, sym: Symbol) -> String {
        self.inner.borrow().strings[sym.0 as usize].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let i = Interner::new();
        assert_eq!(i.intern("x"), i.intern("x"));
    }

    #[test]
    fn different_strings_intern_differently() {
        let i = Interner::new();
        assert_ne!(i.intern("x"), i.intern("y"));
    }

    #[test]
    fn resolve_round_trips() {
        let i = Interner::new();
        let sym = i.intern("hello");
        assert_eq!(i.resolve(sym), "hello");
    }
}

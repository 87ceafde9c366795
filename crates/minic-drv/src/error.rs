//! Turns any phase's error into a single tagged diagnostic line,
//! and carries it across the `anyhow::Error` boundary every
//! phase funnels through.
//!
//! Each phase crate (`minic-lex`, `minic-par`, `minic-interp`, `minic-gen`)
//! owns its own `thiserror` enum. At the one call site in
//! [`crate::pipeline`] where each phase's `Result` comes back, [`tagged`]
//! immediately folds it into a [`Diagnostic`] and hands that to `anyhow` —
//! from then on every later `?` and the top-level failure handler in
//! `lib::run` only ever deal with one `anyhow::Error`, regardless of which
//! phase raised it, rather than re-matching on each phase's concrete error
//! type. `minic_interp::InterpError` and `minic_gen::CodeGenError` carry no
//! span of their own, so those call sites pass [`Span::DUMMY`].

use minic_util::{Diagnostic, Span, Tag};
use thiserror::Error;

/// The single error type that ever crosses the `anyhow` boundary: one
/// already-tagged, already-spanned diagnostic.
#[derive(Debug, Error)]
#[error("{}", self.0.render_short())]
pub struct DriverError(pub Diagnostic);

/// Folds a phase error into a [`DriverError`] carrying `tag` and `span`.
/// Called once per phase at the exact point that phase's `Result` comes
/// back, so the call site — not a match on the error's concrete type —
/// is what supplies the tag.
pub fn tagged(tag: Tag, span: Span, err: impl std::fmt::Display) -> anyhow::Error {
    DriverError(Diagnostic::new(tag, err.to_string(), span)).into()
}

/// Extracts the [`Diagnostic`] from an aggregated `anyhow::Error`, for
/// rendering at the driver's single top-level failure point. Anything
/// that didn't come from [`tagged`] (a filesystem error bubbled up via
/// `anyhow`'s blanket `From<std::io::Error>`, say) is reported under the
/// `IO` tag instead.
pub fn diagnostic_of(err: &anyhow::Error) -> Diagnostic {
    match err.downcast_ref::<DriverError>() {
        Some(DriverError(diag)) => diag.clone(),
        None => Diagnostic::new(Tag::Io, err.to_string(), Span::DUMMY),
    }
}

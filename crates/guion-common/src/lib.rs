//! Shared types for the guion compiler-free interpreter (positions, diagnostics, type tags).

mod position;
mod type_tag;

pub use position::Position;
pub use type_tag::TypeTag;

/// Anything that can describe itself as a single-line diagnostic message
/// together with the source position it occurred at.
///
/// Implemented by each stage's error kind (`LexError`, `ParseError`,
/// `EvalError`) so the top-level `guion::Error` can flatten any of them
/// into the same `{ kind, message, line, column }` shape.
pub trait Diagnostic {
    /// The source position the problem was detected at.
    fn position(&self) -> Position;

    /// A human-readable description of what went wrong.
    fn message(&self) -> String;
}

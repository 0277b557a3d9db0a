use std::fmt;

use guion_common::Diagnostic;
use guion_eval::{EvalError, Flow};
use guion_lexer::LexError;
use guion_parser::ParseError;
use serde::Serialize;

/// The error kind surfaced to external collaborators (`run`/`ast`
/// callers), matching the taxonomy every pipeline stage can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Name,
    Type,
    DivisionByZero,
    Arity,
    ReturnType,
    NotImplemented,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The structured error object returned from `run`/`ast`: a kind, a
/// human-readable message, and the source position if one is known. The
/// hosting HTTP surface (out of scope here) may additionally attach a
/// `traceback` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub traceback: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
            traceback: None,
        }
    }

    /// A `devolver` that unwinds past the program root: not an evaluator
    /// error, but invalid per the language's own rules.
    pub fn return_outside_function() -> Self {
        Self::new(
            ErrorKind::Syntax,
            "'devolver' used outside of a function",
            None,
            None,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{}: {} at {line}:{column}", self.kind, self.message)
            }
            _ => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        let pos = err.position();
        Self::new(ErrorKind::Lexical, err.message(), Some(pos.line), Some(pos.column))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        let pos = err.position();
        Self::new(ErrorKind::Syntax, err.message(), Some(pos.line), Some(pos.column))
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        let pos = err.position();
        let kind = match &err {
            EvalError::Name { .. } => ErrorKind::Name,
            EvalError::Type { .. } => ErrorKind::Type,
            EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            EvalError::Arity { .. } => ErrorKind::Arity,
            EvalError::ReturnType { .. } => ErrorKind::ReturnType,
            EvalError::NotImplemented { .. } => ErrorKind::NotImplemented,
        };
        Self::new(kind, err.message(), Some(pos.line), Some(pos.column))
    }
}

impl From<Flow> for Error {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Error(err) => err.into(),
            Flow::Return(_, _) => Error::return_outside_function(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guion_common::Position;

    #[test]
    fn eval_error_maps_to_matching_kind() {
        let err: Error = EvalError::division_by_zero(Position::new(1, 1)).into();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn escaped_return_is_syntax_error() {
        let err: Error = Flow::Return(guion_eval::Value::Null, Position::new(2, 3)).into();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}

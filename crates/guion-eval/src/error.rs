use std::fmt;

use guion_common::{Diagnostic, Position, TypeTag};

use crate::value::Value;

/// Every failure the evaluator can raise, matching the error kinds the
/// entry point is contractually required to surface (`Lexical` and
/// `Syntax` belong to earlier pipeline stages, not here).
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Name { name: String, position: Position },
    Type { message: String, position: Position },
    DivisionByZero { position: Position },
    Arity { expected: usize, found: usize, position: Position },
    ReturnType { expected: TypeTag, found: TypeTag, position: Position },
    NotImplemented { message: String, position: Position },
}

impl EvalError {
    pub fn name(name: impl Into<String>, position: Position) -> Self {
        Self::Name { name: name.into(), position }
    }

    pub fn ty(message: impl Into<String>, position: Position) -> Self {
        Self::Type { message: message.into(), position }
    }

    pub fn division_by_zero(position: Position) -> Self {
        Self::DivisionByZero { position }
    }

    pub fn arity(expected: usize, found: usize, position: Position) -> Self {
        Self::Arity { expected, found, position }
    }

    pub fn return_type(expected: TypeTag, found: TypeTag, position: Position) -> Self {
        Self::ReturnType { expected, found, position }
    }

    pub fn not_implemented(message: impl Into<String>, position: Position) -> Self {
        Self::NotImplemented { message: message.into(), position }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Name { name, position } => {
                write!(f, "'{name}' no definida at {position}")
            }
            EvalError::Type { message, position } => write!(f, "{message} at {position}"),
            EvalError::DivisionByZero { position } => {
                write!(f, "division by zero at {position}")
            }
            EvalError::Arity { expected, found, position } => write!(
                f,
                "expected {expected} argument(s), found {found} at {position}"
            ),
            EvalError::ReturnType { expected, found, position } => write!(
                f,
                "expected return type {expected}, found {found} at {position}"
            ),
            EvalError::NotImplemented { message, position } => {
                write!(f, "not implemented: {message} at {position}")
            }
        }
    }
}

impl std::error::Error for EvalError {}

impl Diagnostic for EvalError {
    fn position(&self) -> Position {
        match self {
            EvalError::Name { position, .. }
            | EvalError::Type { position, .. }
            | EvalError::DivisionByZero { position }
            | EvalError::Arity { position, .. }
            | EvalError::ReturnType { position, .. }
            | EvalError::NotImplemented { position, .. } => *position,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

/// The evaluator's control-flow channel: either a hard error, or a
/// non-local `devolver` signal unwinding toward the nearest enclosing
/// function call. Loops propagate `Return` unchanged via `?`; only `Call`
/// catches it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Error(EvalError),
    Return(Value, Position),
}

impl From<EvalError> for Flow {
    fn from(err: EvalError) -> Self {
        Flow::Error(err)
    }
}

pub type EvalResult<T> = Result<T, Flow>;

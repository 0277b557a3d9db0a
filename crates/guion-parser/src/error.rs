use std::fmt;

use guion_common::{Diagnostic, Position};
use guion_lexer::TokenKind;
use serde::Serialize;

/// A parse error: an unexpected token, or a missing expected one.
///
/// Carries the token kind the grammar expected (if the call site named
/// one), the token kind actually found, its lexeme, and the position it
/// occurred at. The parser halts at the first error -- there is no
/// recovery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    pub expected: Option<String>,
    pub found: TokenKind,
    pub found_lexeme: String,
    pub position: Position,
}

impl ParseError {
    pub fn unexpected(found: TokenKind, found_lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            expected: None,
            found,
            found_lexeme: found_lexeme.into(),
            position,
        }
    }

    pub fn expected(
        expected: impl Into<String>,
        found: TokenKind,
        found_lexeme: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            expected: Some(expected.into()),
            found,
            found_lexeme: found_lexeme.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Some(expected) => write!(
                f,
                "expected {expected} but found {:?} ('{}') at {}",
                self.found, self.found_lexeme, self.position
            ),
            None => write!(
                f,
                "unexpected token {:?} ('{}') at {}",
                self.found, self.found_lexeme, self.position
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl Diagnostic for ParseError {
    fn position(&self) -> Position {
        self.position
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_display() {
        let err = ParseError::expected("')'", TokenKind::Semi, ";", Position::new(1, 5));
        assert!(err.to_string().contains("expected ')'"));
    }

    #[test]
    fn unexpected_display() {
        let err = ParseError::unexpected(TokenKind::Eof, "", Position::new(1, 1));
        assert!(err.to_string().starts_with("unexpected token"));
    }
}

use std::fmt;

use guion_common::{Diagnostic, Position};
use serde::Serialize;

/// A lexical error: an input character that matched none of the scanner's
/// rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexError {
    pub character: char,
    pub position: Position,
}

impl LexError {
    pub fn new(character: char, position: Position) -> Self {
        Self { character, position }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized character '{}' at {}",
            self.character, self.position
        )
    }
}

impl std::error::Error for LexError {}

impl Diagnostic for LexError {
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
    fn display_includes_char_and_position() {
        let err = LexError::new('@', Position::new(2, 5));
        assert_eq!(err.to_string(), "unrecognized character '@' at 2:5");
    }
}

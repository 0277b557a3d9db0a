use std::fmt;

use serde::Serialize;

/// A 1-based (line, column) location within a source string.
///
/// Every [`crate::Diagnostic`] and every AST node carries one of these so
/// that errors and serialized ASTs can always point a caller back at the
/// exact source span responsible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position a scanner starts at: line 1, column 1.
    pub const fn start() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn start_is_one_one() {
        assert_eq!(Position::start(), Position::new(1, 1));
    }
}

use guion_common::Position;
use serde::Serialize;

/// The kind of a single token.
///
/// Multi-character operators are listed ahead of their single-character
/// prefixes in the scanner's rule order (`==` before `=`, `!=`/`>=`/`<=`
/// before `!`/`>`/`<`) -- declared order matters, see [`crate::Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Structural
    ParenL,
    ParenR,
    BraceL,
    BraceR,
    BracketL,
    BracketR,
    Semi,
    Comma,
    Colon,
    Dot,

    // Assignment
    Eq,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Comparison
    EqEq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,

    // Literal / identifier
    Int,
    Float,
    Str,
    Ident,

    // Keywords
    Var,
    If,
    Else,
    For,
    While,
    Func,
    Return,
    Show,
    True,
    False,
    Null,
    And,
    Or,
    Not,
    Each,
    In,
    Called,

    Eof,
}

/// A single scanned token: its kind, the exact source text it came from,
/// and the 1-based (line, column) it started at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }
}

/// Look up a scanned identifier in the keyword table, returning the
/// keyword's [`TokenKind`] if it matches one of the Spanish keywords.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    Some(match ident {
        "variable" => TokenKind::Var,
        "si" => TokenKind::If,
        "sino" => TokenKind::Else,
        "para" => TokenKind::For,
        "mientras" => TokenKind::While,
        "funcion" => TokenKind::Func,
        "devolver" => TokenKind::Return,
        "mostrar" => TokenKind::Show,
        "verdadero" => TokenKind::True,
        "falso" => TokenKind::False,
        "nulo" => TokenKind::Null,
        "y" => TokenKind::And,
        "o" => TokenKind::Or,
        "no" => TokenKind::Not,
        "cada" => TokenKind::Each,
        "en" => TokenKind::In,
        "llamado" => TokenKind::Called,
        _ => return None,
    })
}

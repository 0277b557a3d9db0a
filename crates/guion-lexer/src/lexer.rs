//! Single-pass scanner turning a source string into a token stream.
//!
//! Rules are tried in a fixed declared order at each cursor position: the
//! ordering matters because multi-character operators (`==`, `!=`, `>=`,
//! `<=`) must be checked before their single-character prefixes (`=`, `>`,
//! `<`) would otherwise have a chance to match.

use guion_common::Position;

use crate::error::LexError;
use crate::token::{keyword_kind, Token, TokenKind};

/// Scans guion source text into a [`Token`] stream, or the first
/// [`LexError`] encountered.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize `source`, returning the token stream ending in [`TokenKind::Eof`]
    /// or the first character that matched none of the scanner's rules.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let mut scanner = Self::new(source);
        let mut tokens = Vec::new();

        while let Some(c) = scanner.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                scanner.advance();
                continue;
            }
            if c == '\n' {
                scanner.advance();
                scanner.line += 1;
                scanner.column = 1;
                continue;
            }
            if c == '#' {
                while let Some(c) = scanner.peek() {
                    if c == '\n' {
                        break;
                    }
                    scanner.advance();
                }
                continue;
            }

            let start = scanner.position();

            if let Some(token) = scanner.scan_multi_char_operator(start) {
                tokens.push(token);
                continue;
            }
            if let Some(token) = scanner.scan_punctuation(start) {
                tokens.push(token);
                continue;
            }
            if let Some(token) = scanner.scan_string(start)? {
                tokens.push(token);
                continue;
            }
            if let Some(token) = scanner.scan_number(start) {
                tokens.push(token);
                continue;
            }
            if let Some(token) = scanner.scan_identifier(start) {
                tokens.push(token);
                continue;
            }

            return Err(LexError::new(c, start));
        }

        tokens.push(Token::new(TokenKind::Eof, "", scanner.position()));
        Ok(tokens)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        self.column += 1;
        Some(c)
    }

    /// `==`, `!=`, `>=`, `<=` -- must be tried before their single-char
    /// prefixes.
    fn scan_multi_char_operator(&mut self, start: Position) -> Option<Token> {
        let (first, second) = (self.peek()?, self.peek_at(1));
        let kind = match (first, second) {
            ('=', Some('=')) => TokenKind::EqEq,
            ('!', Some('=')) => TokenKind::Neq,
            ('>', Some('=')) => TokenKind::Gte,
            ('<', Some('=')) => TokenKind::Lte,
            _ => return None,
        };
        self.advance();
        self.advance();
        Some(Token::new(kind, format!("{first}{}", second.unwrap()), start))
    }

    fn scan_punctuation(&mut self, start: Position) -> Option<Token> {
        let c = self.peek()?;
        let kind = match c {
            '(' => TokenKind::ParenL,
            ')' => TokenKind::ParenR,
            '{' => TokenKind::BraceL,
            '}' => TokenKind::BraceR,
            '[' => TokenKind::BracketL,
            ']' => TokenKind::BracketR,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Eq,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '>' => TokenKind::Gt,
            '<' => TokenKind::Lt,
            _ => return None,
        };
        self.advance();
        Some(Token::new(kind, c.to_string(), start))
    }

    /// `"..."` or `'...'`, no escapes, no embedded same-delimiter quote.
    fn scan_string(&mut self, start: Position) -> Result<Option<Token>, LexError> {
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Ok(None),
        };

        let closing = self.chars[self.pos + 1..].iter().position(|&c| c == quote);
        let Some(rel_end) = closing else {
            return Err(LexError::new(quote, start));
        };

        self.advance(); // opening quote
        let mut text = String::new();
        for _ in 0..rel_end {
            text.push(self.advance().expect("checked by closing index"));
        }
        self.advance(); // closing quote

        Ok(Some(Token::new(TokenKind::Str, text, start)))
    }

    /// Greedy digits; `FLOAT` if followed by `.` and more digits, else `INT`.
    fn scan_number(&mut self, start: Position) -> Option<Token> {
        if !self.peek()?.is_ascii_digit() {
            return None;
        }

        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(self.advance().unwrap());
        }

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push(self.advance().unwrap()); // '.'
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                text.push(self.advance().unwrap());
            }
            return Some(Token::new(TokenKind::Float, text, start));
        }

        Some(Token::new(TokenKind::Int, text, start))
    }

    fn scan_identifier(&mut self, start: Position) -> Option<Token> {
        if !self.peek()?.is_ident_start() {
            return None;
        }

        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ident_continue() {
                break;
            }
            text.push(self.advance().unwrap());
        }

        let kind = keyword_kind(&text).unwrap_or(TokenKind::Ident);
        Some(Token::new(kind, text, start))
    }
}

trait IdentChar {
    fn is_ident_start(self) -> bool;
    fn is_ident_continue(self) -> bool;
}

const ACCENTED: &[char] = &['ñ', 'Ñ', 'á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú'];

impl IdentChar for char {
    fn is_ident_start(self) -> bool {
        self.is_ascii_alphabetic() || self == '_' || ACCENTED.contains(&self)
    }

    fn is_ident_continue(self) -> bool {
        self.is_ident_start() || self.is_ascii_digit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("variable si sino mientras"),
            vec![
                TokenKind::Var,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn accented_identifier() {
        let tokens = Scanner::tokenize("variable año = 1").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "año");
    }

    #[test]
    fn multi_char_operators_before_single_char() {
        assert_eq!(
            kinds("== != >= <= > <"),
            vec![
                TokenKind::EqEq,
                TokenKind::Neq,
                TokenKind::Gte,
                TokenKind::Lte,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn int_vs_float() {
        let tokens = Scanner::tokenize("10 2.5 3.").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].kind, TokenKind::Float);
        // "3." has no digit after the dot, so it's INT followed by DOT.
        assert_eq!(tokens[2].kind, TokenKind::Int);
        assert_eq!(tokens[3].kind, TokenKind::Dot);
    }

    #[test]
    fn string_literal_strips_delimiters() {
        let tokens = Scanner::tokenize(r#""hola""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, "hola");
    }

    #[test]
    fn single_quoted_string() {
        let tokens = Scanner::tokenize("'hola'").unwrap();
        assert_eq!(tokens[0].lexeme, "hola");
    }

    #[test]
    fn line_comment_is_skipped() {
        assert_eq!(kinds("1 # comentario\n2"), vec![
            TokenKind::Int,
            TokenKind::Int,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn newline_tracks_line_and_column() {
        let tokens = Scanner::tokenize("1\n22").unwrap();
        assert_eq!(tokens[0].position, Position::new(1, 1));
        assert_eq!(tokens[1].position, Position::new(2, 1));
    }

    #[test]
    fn unrecognized_character_errors_with_position() {
        let err = Scanner::tokenize("1 @ 2").unwrap_err();
        assert_eq!(err.character, '@');
        assert_eq!(err.position, Position::new(1, 3));
    }

    #[test]
    fn unterminated_string_errors_at_opening_quote() {
        let err = Scanner::tokenize(r#"variable x = "oops"#).unwrap_err();
        assert_eq!(err.character, '"');
    }

    #[test]
    fn ends_with_eof() {
        let tokens = Scanner::tokenize("1").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}

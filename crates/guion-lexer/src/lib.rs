//! Lexical scanner for the guion scripting language.

mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Scanner;
pub use token::{keyword_kind, Token, TokenKind};

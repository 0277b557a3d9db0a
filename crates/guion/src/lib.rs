//! Entry points for the guion interpreter: `run`, `ast`, and the pure
//! `to_html`/`to_css` renderers. Everything else (the HTTP transport, CORS,
//! static file serving, the process entrypoint) is out of scope here and
//! consumes only this contract.

mod error;

pub use error::{Error, ErrorKind};
pub use guion_eval::Value;
pub use guion_parser::Node;

use guion_eval::Environment;

/// Run a complete source string through scanner, parser, and evaluator,
/// returning the value of the last top-level statement.
pub fn run(source: &str) -> Result<Value, Error> {
    let tokens = guion_lexer::Scanner::tokenize(source)?;
    let program = guion_parser::Parser::parse(tokens)?;
    let body = match program {
        Node::Program { body, .. } => body,
        _ => unreachable!("Parser::parse always returns a Program root"),
    };
    let env = Environment::root();
    guion_eval::eval_program(&body, &env).map_err(Error::from)
}

/// Lex and parse `source`, returning the AST root without evaluating it.
pub fn ast(source: &str) -> Result<Node, Error> {
    let tokens = guion_lexer::Scanner::tokenize(source)?;
    Ok(guion_parser::Parser::parse(tokens)?)
}

/// Render an `html`-tagged value as HTML text.
pub fn to_html(value: &Value) -> String {
    guion_render::to_html(value)
}

/// Render a `css`-tagged value as a CSS rule block.
pub fn to_css(value: &Value) -> String {
    guion_render::to_css(value)
}

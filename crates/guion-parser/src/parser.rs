//! Recursive-descent parser: one token of lookahead, explicit precedence
//! ladder (`comparison < additive < multiplicative < unary < primary`),
//! `and`/`or` wired between `comparison` and the expression entry point
//! with `and` binding tighter than `or`.

use guion_common::{Position, TypeTag};
use guion_lexer::{Token, TokenKind};

use crate::ast::{BinOp, LitVal, LogicalOp, Node, Param, UnOp};
use crate::error::ParseError;

/// Parses a token stream (as produced by [`guion_lexer::Scanner`]) into a
/// `Program` AST root.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token stream into a `Node::Program`.
    pub fn parse(tokens: Vec<Token>) -> PResult<Node> {
        let start = tokens.first().map(|t| t.position).unwrap_or(Position::start());
        let mut parser = Self::new(tokens);
        let mut body = Vec::new();
        while !parser.at(TokenKind::Eof) {
            body.push(parser.statement()?);
        }
        Ok(Node::Program {
            body,
            position: start,
        })
    }

    // ── Token stream helpers ──────────────────────────────────────────

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn ahead_is(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek_ahead(offset).is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`, returning whether it did.
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is `kind`, else fail with `ParseError`.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            let found = self.current().clone();
            Err(ParseError::expected(
                expected,
                found.kind,
                found.lexeme,
                found.position,
            ))
        }
    }

    fn expect_ident(&mut self) -> PResult<Token> {
        self.expect(TokenKind::Ident, "identifier")
    }

    // ── Statements ────────────────────────────────────────────────────

    fn statement(&mut self) -> PResult<Node> {
        if self.matches(TokenKind::Var) {
            return self.var_decl();
        }
        if self.matches(TokenKind::If) {
            return self.if_stmt();
        }
        if self.matches(TokenKind::While) {
            return self.while_stmt();
        }
        if self.matches(TokenKind::For) {
            return if self.matches(TokenKind::Each) {
                self.foreach_stmt()
            } else {
                self.for_stmt()
            };
        }
        if self.matches(TokenKind::Func) {
            return self.func_decl();
        }
        if self.matches(TokenKind::Return) {
            return self.return_stmt();
        }
        self.expr_stmt()
    }

    fn block(&mut self) -> PResult<Vec<Node>> {
        self.expect(TokenKind::BraceL, "'{'")?;
        let mut body = Vec::new();
        while !self.at(TokenKind::BraceR) && !self.at(TokenKind::Eof) {
            body.push(self.statement()?);
        }
        self.expect(TokenKind::BraceR, "'}'")?;
        Ok(body)
    }

    fn type_annotation(&mut self) -> PResult<Option<String>> {
        if self.matches(TokenKind::Colon) {
            Ok(Some(self.expect_ident()?.lexeme))
        } else {
            Ok(None)
        }
    }

    fn var_decl(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        let name = self.expect_ident()?.lexeme;
        let declared_type = self.type_annotation()?;
        self.expect(TokenKind::Eq, "'='")?;
        let value = Box::new(self.expression()?);
        self.matches(TokenKind::Semi);
        Ok(Node::VarDecl {
            name,
            declared_type,
            value,
            position,
        })
    }

    fn if_stmt(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        self.expect(TokenKind::ParenL, "'('")?;
        let cond = Box::new(self.expression()?);
        self.expect(TokenKind::ParenR, "')'")?;
        let then_body = self.block()?;

        let else_body = if self.matches(TokenKind::Else) {
            if self.matches(TokenKind::If) {
                Some(vec![self.if_stmt()?])
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Node::If {
            cond,
            then_body,
            else_body,
            position,
        })
    }

    fn while_stmt(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        self.expect(TokenKind::ParenL, "'('")?;
        let cond = Box::new(self.expression()?);
        self.expect(TokenKind::ParenR, "')'")?;
        let body = self.block()?;
        Ok(Node::While {
            cond,
            body,
            position,
        })
    }

    fn for_stmt(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        self.expect(TokenKind::ParenL, "'('")?;
        let init = Box::new(self.statement()?);
        let cond = Box::new(self.expression()?);
        self.expect(TokenKind::Semi, "';'")?;
        let step = Box::new(self.expression()?);
        self.expect(TokenKind::ParenR, "')'")?;
        let body = self.block()?;
        Ok(Node::For {
            init,
            cond,
            step,
            body,
            position,
        })
    }

    fn foreach_stmt(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        let var = self.expect_ident()?.lexeme;
        self.expect(TokenKind::In, "'en'")?;
        let iterable = Box::new(self.expression()?);
        let body = self.block()?;
        Ok(Node::ForEach {
            var,
            iterable,
            body,
            position,
        })
    }

    fn func_decl(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        let name = self.expect_ident()?.lexeme;
        self.expect(TokenKind::ParenL, "'('")?;

        let mut params = Vec::new();
        if !self.at(TokenKind::ParenR) {
            params.push(self.param()?);
            while self.matches(TokenKind::Comma) {
                params.push(self.param()?);
            }
        }
        self.expect(TokenKind::ParenR, "')'")?;

        let return_type = self.type_annotation()?;
        let body = self.block()?;

        Ok(Node::FuncDecl {
            name,
            params,
            return_type,
            body,
            position,
        })
    }

    fn param(&mut self) -> PResult<Param> {
        let name = self.expect_ident()?.lexeme;
        let declared_type = self.type_annotation()?;
        Ok(Param {
            name,
            declared_type,
        })
    }

    fn return_stmt(&mut self) -> PResult<Node> {
        let position = self.tokens[self.pos - 1].position;
        let value = if self.at(TokenKind::Semi) || self.at(TokenKind::BraceR) || self.at(TokenKind::Eof) {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        self.matches(TokenKind::Semi);
        Ok(Node::Return { value, position })
    }

    fn expr_stmt(&mut self) -> PResult<Node> {
        let expr = self.expression()?;
        self.matches(TokenKind::Semi);
        Ok(expr)
    }

    // ── Expressions ───────────────────────────────────────────────────

    fn expression(&mut self) -> PResult<Node> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> PResult<Node> {
        let mut left = self.and_expr()?;
        while self.at(TokenKind::Or) {
            let position = self.advance().position;
            let right = self.and_expr()?;
            left = Node::Logical {
                left: Box::new(left),
                op: LogicalOp::Or,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> PResult<Node> {
        let mut left = self.comparison()?;
        while self.at(TokenKind::And) {
            let position = self.advance().position;
            let right = self.comparison()?;
            left = Node::Logical {
                left: Box::new(left),
                op: LogicalOp::And,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn comparison(&mut self) -> PResult<Node> {
        let mut left = self.additive()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::Neq => BinOp::Neq,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gte => BinOp::Gte,
                TokenKind::Lte => BinOp::Lte,
                _ => break,
            };
            let position = self.advance().position;
            let right = self.additive()?;
            left = Node::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn additive(&mut self) -> PResult<Node> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let position = self.advance().position;
            let right = self.multiplicative()?;
            left = Node::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> PResult<Node> {
        let mut left = self.unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let position = self.advance().position;
            let right = self.unary()?;
            left = Node::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn unary(&mut self) -> PResult<Node> {
        if self.at(TokenKind::Minus) {
            let position = self.advance().position;
            let operand = Box::new(self.unary()?);
            return Ok(Node::Unary {
                op: UnOp::Neg,
                operand,
                position,
            });
        }
        if self.at(TokenKind::Not) {
            let position = self.advance().position;
            let operand = Box::new(self.unary()?);
            return Ok(Node::Unary {
                op: UnOp::Not,
                operand,
                position,
            });
        }
        self.primary()
    }

    /// True if `kind` can begin a `primary` -- used both for implicit
    /// multiplication after a parenthesized expression and nowhere else.
    fn starts_primary(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::ParenL | TokenKind::Int | TokenKind::Float | TokenKind::Ident
        )
    }

    fn primary(&mut self) -> PResult<Node> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::ParenL => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::ParenR, "')'")?;
                // Implicit multiplication: `(expr)(expr)`, `(expr)2`, `(expr)x`.
                if Self::starts_primary(self.current().kind) {
                    let right = self.primary()?;
                    Ok(Node::Binary {
                        left: Box::new(expr),
                        op: BinOp::Mul,
                        right: Box::new(right),
                        position: token.position,
                    })
                } else {
                    Ok(expr)
                }
            }
            TokenKind::Int => {
                self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ParseError::unexpected(token.kind, token.lexeme.clone(), token.position)
                })?;
                Ok(Node::Literal {
                    value: LitVal::Int(value),
                    tag: TypeTag::Integer,
                    position: token.position,
                })
            }
            TokenKind::Float => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::unexpected(token.kind, token.lexeme.clone(), token.position)
                })?;
                Ok(Node::Literal {
                    value: LitVal::Float(value),
                    tag: TypeTag::Decimal,
                    position: token.position,
                })
            }
            TokenKind::Str => {
                if self.ahead_is(1, TokenKind::BraceL) {
                    self.css_rule()
                } else {
                    self.advance();
                    Ok(Node::Literal {
                        value: LitVal::Str(token.lexeme),
                        tag: TypeTag::String,
                        position: token.position,
                    })
                }
            }
            TokenKind::True => {
                self.advance();
                Ok(Node::Literal {
                    value: LitVal::Bool(true),
                    tag: TypeTag::Boolean,
                    position: token.position,
                })
            }
            TokenKind::False => {
                self.advance();
                Ok(Node::Literal {
                    value: LitVal::Bool(false),
                    tag: TypeTag::Boolean,
                    position: token.position,
                })
            }
            TokenKind::Null => {
                self.advance();
                Ok(Node::Literal {
                    value: LitVal::Null,
                    tag: TypeTag::Null,
                    position: token.position,
                })
            }
            TokenKind::Show => {
                self.advance();
                self.expect(TokenKind::ParenL, "'('")?;
                let expr = Box::new(self.expression()?);
                self.expect(TokenKind::ParenR, "')'")?;
                Ok(Node::Show {
                    expr,
                    position: token.position,
                })
            }
            TokenKind::Ident => {
                self.advance();
                if self.matches(TokenKind::Eq) {
                    let value = Box::new(self.expression()?);
                    Ok(Node::Assign {
                        name: token.lexeme,
                        value,
                        position: token.position,
                    })
                } else if self.matches(TokenKind::ParenL) {
                    let args = self.arg_list()?;
                    self.expect(TokenKind::ParenR, "')'")?;
                    Ok(Node::Call {
                        name: token.lexeme,
                        args,
                        position: token.position,
                    })
                } else if self.at(TokenKind::Ident) && self.ahead_is(1, TokenKind::Eq) {
                    self.html_elem(token)
                } else {
                    Ok(Node::Ident {
                        name: token.lexeme,
                        position: token.position,
                    })
                }
            }
            TokenKind::BracketL => self.list_lit(),
            TokenKind::BraceL => self.dict_lit(),
            _ => Err(ParseError::unexpected(
                token.kind,
                token.lexeme,
                token.position,
            )),
        }
    }

    fn arg_list(&mut self) -> PResult<Vec<Node>> {
        let mut args = Vec::new();
        if !self.at(TokenKind::ParenR) {
            args.push(self.expression()?);
            while self.matches(TokenKind::Comma) {
                args.push(self.expression()?);
            }
        }
        Ok(args)
    }

    fn list_lit(&mut self) -> PResult<Node> {
        let position = self.advance().position; // '['
        let mut items = Vec::new();
        if !self.at(TokenKind::BracketR) {
            items.push(self.expression()?);
            while self.matches(TokenKind::Comma) {
                items.push(self.expression()?);
            }
        }
        self.expect(TokenKind::BracketR, "']'")?;
        Ok(Node::ListLit { items, position })
    }

    fn dict_lit(&mut self) -> PResult<Node> {
        let position = self.advance().position; // '{'
        let mut pairs = Vec::new();
        if !self.at(TokenKind::BraceR) {
            pairs.push(self.dict_pair()?);
            while self.matches(TokenKind::Comma) {
                pairs.push(self.dict_pair()?);
            }
        }
        self.expect(TokenKind::BraceR, "'}'")?;
        Ok(Node::DictLit { pairs, position })
    }

    fn dict_pair(&mut self) -> PResult<(Node, Node)> {
        let key = self.expression()?;
        self.expect(TokenKind::Colon, "':'")?;
        let value = self.expression()?;
        Ok((key, value))
    }

    /// `tag attr=expr attr=expr (child, child, ...)`, triggered when an
    /// identifier is immediately followed by another identifier assigned
    /// with `=` -- the attribute pattern.
    fn html_elem(&mut self, tag_token: Token) -> PResult<Node> {
        let mut attrs = Vec::new();
        while self.at(TokenKind::Ident) && self.ahead_is(1, TokenKind::Eq) {
            let attr_name = self.advance().lexeme;
            self.advance(); // '='
            let value = self.expression()?;
            attrs.push((attr_name, value));
        }

        let mut children = Vec::new();
        if self.matches(TokenKind::ParenL) {
            if !self.at(TokenKind::ParenR) {
                children.push(self.expression()?);
                while self.matches(TokenKind::Comma) {
                    children.push(self.expression()?);
                }
            }
            self.expect(TokenKind::ParenR, "')'")?;
        }

        Ok(Node::HtmlElem {
            tag: tag_token.lexeme,
            attrs,
            children,
            position: tag_token.position,
        })
    }

    /// `"selector" { prop: "value", prop: "value" }`, triggered when a
    /// string literal is immediately followed by `{`.
    fn css_rule(&mut self) -> PResult<Node> {
        let selector_token = self.advance(); // the string
        self.expect(TokenKind::BraceL, "'{'")?;

        let mut props = Vec::new();
        if !self.at(TokenKind::BraceR) {
            props.push(self.css_prop()?);
            while self.matches(TokenKind::Comma) {
                props.push(self.css_prop()?);
            }
        }
        self.expect(TokenKind::BraceR, "'}'")?;

        Ok(Node::CssRule {
            selector: selector_token.lexeme,
            props,
            position: selector_token.position,
        })
    }

    fn css_prop(&mut self) -> PResult<(String, String)> {
        let name = if self.at(TokenKind::Str) {
            self.advance().lexeme
        } else {
            self.expect_ident()?.lexeme
        };
        self.expect(TokenKind::Colon, "':'")?;
        let value = self.expect(TokenKind::Str, "string")?.lexeme;
        Ok((name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guion_lexer::Scanner;

    fn parse(src: &str) -> Node {
        let tokens = Scanner::tokenize(src).expect("lex ok");
        Parser::parse(tokens).expect("parse ok")
    }

    fn body(src: &str) -> Vec<Node> {
        match parse(src) {
            Node::Program { body, .. } => body,
            other => panic!("expected Program, got {other:?}"),
        }
    }

    #[test]
    fn var_decl_without_type() {
        let stmts = body("variable x = 5;");
        assert!(matches!(&stmts[0], Node::VarDecl { name, declared_type: None, .. } if name == "x"));
    }

    #[test]
    fn var_decl_with_type() {
        let stmts = body("variable x: entero = 5;");
        assert!(matches!(
            &stmts[0],
            Node::VarDecl { name, declared_type: Some(t), .. } if name == "x" && t == "entero"
        ));
    }

    #[test]
    fn precedence_mul_before_add() {
        let stmts = body("1 + 2 * 3;");
        match &stmts[0] {
            Node::Binary { op: BinOp::Add, right, .. } => {
                assert!(matches!(**right, Node::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let stmts = body("verdadero o falso y verdadero;");
        match &stmts[0] {
            Node::Logical { op: LogicalOp::Or, right, .. } => {
                assert!(matches!(**right, Node::Logical { op: LogicalOp::And, .. }));
            }
            other => panic!("expected top-level Or, got {other:?}"),
        }
    }

    #[test]
    fn implicit_multiplication_after_paren() {
        let stmts = body("(1 + 2)(3);");
        assert!(matches!(&stmts[0], Node::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn sino_si_chains_as_nested_if() {
        let stmts = body("si (verdadero) { } sino si (falso) { } sino { }");
        match &stmts[0] {
            Node::If { else_body: Some(else_body), .. } => {
                assert!(matches!(else_body[0], Node::If { .. }));
            }
            other => panic!("expected If with chained else-if, got {other:?}"),
        }
    }

    #[test]
    fn func_decl_with_typed_params_and_return() {
        let stmts = body("funcion suma(a: entero, b: entero): entero { devolver a + b; }");
        match &stmts[0] {
            Node::FuncDecl { name, params, return_type, .. } => {
                assert_eq!(name, "suma");
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].declared_type.as_deref(), Some("entero"));
                assert_eq!(return_type.as_deref(), Some("entero"));
            }
            other => panic!("expected FuncDecl, got {other:?}"),
        }
    }

    #[test]
    fn call_expression() {
        let stmts = body("saludar(\"mundo\");");
        assert!(matches!(&stmts[0], Node::Call { name, args, .. } if name == "saludar" && args.len() == 1));
    }

    #[test]
    fn foreach_over_expression() {
        let stmts = body("para cada item en lista { }");
        assert!(matches!(&stmts[0], Node::ForEach { var, .. } if var == "item"));
    }

    #[test]
    fn html_elem_with_attrs_and_children() {
        let stmts = body("div clase=\"caja\" id=\"x\" (\"hola\");");
        match &stmts[0] {
            Node::HtmlElem { tag, attrs, children, .. } => {
                assert_eq!(tag, "div");
                assert_eq!(attrs.len(), 2);
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected HtmlElem, got {other:?}"),
        }
    }

    #[test]
    fn css_rule_literal() {
        let stmts = body("\".caja\" { color: \"azul\", tamano: \"10px\" };");
        match &stmts[0] {
            Node::CssRule { selector, props, .. } => {
                assert_eq!(selector, ".caja");
                assert_eq!(props.len(), 2);
                assert_eq!(props[0].0, "color");
            }
            other => panic!("expected CssRule, got {other:?}"),
        }
    }

    #[test]
    fn list_and_dict_literals() {
        let stmts = body("[1, 2, 3];");
        assert!(matches!(&stmts[0], Node::ListLit { items, .. } if items.len() == 3));

        let stmts = body("{1: \"uno\", 2: \"dos\"};");
        assert!(matches!(&stmts[0], Node::DictLit { pairs, .. } if pairs.len() == 2));
    }

    #[test]
    fn unexpected_token_is_parse_error() {
        let tokens = Scanner::tokenize(")").expect("lex ok");
        assert!(Parser::parse(tokens).is_err());
    }
}

//! The guion AST: one tagged `enum Node`, every variant carrying the
//! source [`Position`] it was parsed from.

use guion_common::{Position, TypeTag};
use serde::Serialize;

/// A function parameter: its name and optional declared type annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub declared_type: Option<String>,
}

/// A literal value as produced directly by the parser, before evaluation
/// assigns it a [`TypeTag`]-carrying runtime `Value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LitVal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// One AST node. Every variant embeds the [`Position`] it was parsed from,
/// for diagnostics and for the serializable AST form (`guion::ast`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Program {
        body: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    VarDecl {
        name: String,
        declared_type: Option<String>,
        value: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Assign {
        name: String,
        value: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Literal {
        value: LitVal,
        tag: TypeTag,
        #[serde(flatten)]
        position: Position,
    },
    Ident {
        name: String,
        #[serde(flatten)]
        position: Position,
    },
    Binary {
        left: Box<Node>,
        op: BinOp,
        right: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Unary {
        op: UnOp,
        operand: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Logical {
        left: Box<Node>,
        op: LogicalOp,
        right: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    If {
        cond: Box<Node>,
        then_body: Vec<Node>,
        else_body: Option<Vec<Node>>,
        #[serde(flatten)]
        position: Position,
    },
    While {
        cond: Box<Node>,
        body: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    For {
        init: Box<Node>,
        cond: Box<Node>,
        step: Box<Node>,
        body: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    ForEach {
        var: String,
        iterable: Box<Node>,
        body: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    FuncDecl {
        name: String,
        params: Vec<Param>,
        return_type: Option<String>,
        body: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Call {
        name: String,
        args: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    Return {
        value: Option<Box<Node>>,
        #[serde(flatten)]
        position: Position,
    },
    Show {
        expr: Box<Node>,
        #[serde(flatten)]
        position: Position,
    },
    ListLit {
        items: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    DictLit {
        pairs: Vec<(Node, Node)>,
        #[serde(flatten)]
        position: Position,
    },
    HtmlElem {
        tag: String,
        attrs: Vec<(String, Node)>,
        children: Vec<Node>,
        #[serde(flatten)]
        position: Position,
    },
    CssRule {
        selector: String,
        props: Vec<(String, String)>,
        #[serde(flatten)]
        position: Position,
    },
}

impl Node {
    /// The source position this node was parsed from.
    pub fn position(&self) -> Position {
        match self {
            Node::Program { position, .. }
            | Node::VarDecl { position, .. }
            | Node::Assign { position, .. }
            | Node::Literal { position, .. }
            | Node::Ident { position, .. }
            | Node::Binary { position, .. }
            | Node::Unary { position, .. }
            | Node::Logical { position, .. }
            | Node::If { position, .. }
            | Node::While { position, .. }
            | Node::For { position, .. }
            | Node::ForEach { position, .. }
            | Node::FuncDecl { position, .. }
            | Node::Call { position, .. }
            | Node::Return { position, .. }
            | Node::Show { position, .. }
            | Node::ListLit { position, .. }
            | Node::DictLit { position, .. }
            | Node::HtmlElem { position, .. }
            | Node::CssRule { position, .. } => *position,
        }
    }
}

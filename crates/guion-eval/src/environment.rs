//! Scope frames.
//!
//! A frame holds its own variables and its own function declarations and
//! points at a parent frame. Lookup walks the parent chain; definition is
//! always local; assignment walks the chain and writes at the first frame
//! that already holds the name, never creating a new binding.
//!
//! The abstract model calls the parent link non-owning (frames never
//! outlive the evaluation that created them). In practice an escaping
//! `FuncDecl` needs its declaring frame to stay alive for the lifetime of
//! the function value, so frames here are `Rc<RefCell<Environment>>` --
//! an owning strong reference. This is safe because the chain is a tree
//! with no back-edges: composites cannot hold an `Environment`, so no
//! cycle can form.

use std::cell::RefCell;
use std::rc::Rc;

use guion_common::Position;
use rustc_hash::FxHashMap;

use crate::error::EvalError;
use crate::value::Value;
use guion_parser::{Node, Param};

pub type EnvRef = Rc<RefCell<Environment>>;

/// A registered function: its declared shape, plus the frame that was
/// active when `FuncDecl` ran -- the call frame is parented off this, not
/// off the caller's frame, giving static rather than dynamic scoping.
#[derive(Clone)]
pub struct FunctionDef {
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub body: Rc<Vec<Node>>,
    pub closure: EnvRef,
}

#[derive(Default)]
pub struct Environment {
    variables: FxHashMap<String, Value>,
    functions: FxHashMap<String, FunctionDef>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    pub fn define_var(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn define_func(&mut self, name: impl Into<String>, def: FunctionDef) {
        self.functions.insert(name.into(), def);
    }

    pub fn lookup_var(env: &EnvRef, name: &str, position: Position) -> Result<Value, EvalError> {
        let borrowed = env.borrow();
        if let Some(value) = borrowed.variables.get(name) {
            return Ok(value.clone());
        }
        match &borrowed.parent {
            Some(parent) => {
                let parent = Rc::clone(parent);
                drop(borrowed);
                Environment::lookup_var(&parent, name, position)
            }
            None => Err(EvalError::name(name, position)),
        }
    }

    pub fn assign_var(
        env: &EnvRef,
        name: &str,
        value: Value,
        position: Position,
    ) -> Result<(), EvalError> {
        let mut borrowed = env.borrow_mut();
        if borrowed.variables.contains_key(name) {
            borrowed.variables.insert(name.to_string(), value);
            return Ok(());
        }
        match borrowed.parent.clone() {
            Some(parent) => {
                drop(borrowed);
                Environment::assign_var(&parent, name, value, position)
            }
            None => Err(EvalError::name(name, position)),
        }
    }

    pub fn lookup_func(
        env: &EnvRef,
        name: &str,
        position: Position,
    ) -> Result<FunctionDef, EvalError> {
        let borrowed = env.borrow();
        if let Some(def) = borrowed.functions.get(name) {
            return Ok(def.clone());
        }
        match &borrowed.parent {
            Some(parent) => {
                let parent = Rc::clone(parent);
                drop(borrowed);
                Environment::lookup_func(&parent, name, position)
            }
            None => Err(EvalError::name(name, position)),
        }
    }
}

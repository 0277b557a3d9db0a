//! The tree-walking evaluator: one `eval` entry point, one exhaustive
//! match over `Node` variants.

use std::rc::Rc;

use guion_common::{Position, TypeTag};
use guion_parser::{BinOp, LitVal, LogicalOp, Node, UnOp};

use crate::environment::{EnvRef, Environment, FunctionDef};
use crate::error::{EvalError, EvalResult, Flow};
use crate::value::{CssValue, DictKey, HtmlValue, Value};

/// Evaluate a whole program: each top-level statement runs in order
/// against `env`, and the value of the last one (or `Value::Null` for an
/// empty program) is the result. A `Flow::Return` that escapes this call
/// means `devolver` was used outside any function -- the caller (the
/// crate that owns the unified error type) turns that into a Syntax-class
/// error.
pub fn eval_program(body: &[Node], env: &EnvRef) -> EvalResult<Value> {
    eval_sequence(body, env)
}

fn eval_sequence(body: &[Node], env: &EnvRef) -> EvalResult<Value> {
    let mut result = Value::Null;
    for stmt in body {
        result = eval(stmt, env)?;
    }
    Ok(result)
}

/// A function body discards the value of every statement it runs; the
/// call result is `Value::Null` unless a `Return` unwinds out of it.
fn eval_call_body(body: &[Node], frame: &EnvRef) -> EvalResult<Value> {
    for stmt in body {
        eval(stmt, frame)?;
    }
    Ok(Value::Null)
}

fn require_bool(value: Value, position: Position, context: &str) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(b) => Ok(b),
        other => Err(EvalError::ty(
            format!("expected {context} to be booleano, found {}", other.tag()),
            position,
        )),
    }
}

pub fn eval(node: &Node, env: &EnvRef) -> EvalResult<Value> {
    match node {
        Node::Program { body, .. } => eval_sequence(body, env),

        Node::VarDecl { name, declared_type, value, position } => {
            let value = eval(value, env)?;
            if let Some(declared) = declared_type {
                check_tag_annotation(declared, value.tag(), *position)?;
            }
            env.borrow_mut().define_var(name.clone(), value.clone());
            Ok(value)
        }

        Node::Assign { name, value, position } => {
            let value = eval(value, env)?;
            Environment::assign_var(env, name, value.clone(), *position)?;
            Ok(value)
        }

        Node::Literal { value, tag, .. } => Ok(literal_value(value, *tag)),

        Node::Ident { name, position } => {
            Ok(Environment::lookup_var(env, name, *position)?)
        }

        Node::Binary { left, op, right, position } => {
            let left = eval(left, env)?;
            let right = eval(right, env)?;
            Ok(eval_binary(*op, left, right, *position)?)
        }

        Node::Unary { op, operand, position } => {
            let operand = eval(operand, env)?;
            Ok(eval_unary(*op, operand, *position)?)
        }

        Node::Logical { left, op, right, position } => {
            let left_val = eval(left, env)?;
            let left_bool = require_bool(left_val, *position, "left operand")?;
            match op {
                LogicalOp::And if !left_bool => Ok(Value::Boolean(false)),
                LogicalOp::Or if left_bool => Ok(Value::Boolean(true)),
                _ => {
                    let right_val = eval(right, env)?;
                    let right_bool = require_bool(right_val, *position, "right operand")?;
                    Ok(Value::Boolean(right_bool))
                }
            }
        }

        Node::If { cond, then_body, else_body, position } => {
            let cond_val = eval(cond, env)?;
            if require_bool(cond_val, *position, "condition")? {
                eval_sequence(then_body, env)
            } else if let Some(else_body) = else_body {
                eval_sequence(else_body, env)
            } else {
                Ok(Value::Null)
            }
        }

        Node::While { cond, body, position } => {
            loop {
                let cond_val = eval(cond, env)?;
                if !require_bool(cond_val, *position, "condition")? {
                    break;
                }
                eval_sequence(body, env)?;
            }
            Ok(Value::Null)
        }

        Node::For { init, cond, step, body, position } => {
            eval(init, env)?;
            loop {
                let cond_val = eval(cond, env)?;
                if !require_bool(cond_val, *position, "condition")? {
                    break;
                }
                eval_sequence(body, env)?;
                eval(step, env)?;
            }
            Ok(Value::Null)
        }

        Node::ForEach { var, iterable, body, position } => {
            let iterable = eval(iterable, env)?;
            let elements = foreach_elements(iterable, *position)?;
            for element in elements {
                let frame = Environment::child(env);
                frame.borrow_mut().define_var(var.clone(), element);
                eval_sequence(body, &frame)?;
            }
            Ok(Value::Null)
        }

        Node::FuncDecl { name, params, return_type, body, .. } => {
            let def = FunctionDef {
                params: params.clone(),
                return_type: return_type.clone(),
                body: Rc::new(body.clone()),
                closure: Rc::clone(env),
            };
            env.borrow_mut().define_func(name.clone(), def);
            Ok(Value::Function(Rc::from(name.as_str())))
        }

        Node::Call { name, args, position } => eval_call(name, args, env, *position),

        Node::Return { value, position } => {
            let value = match value {
                Some(expr) => eval(expr, env)?,
                None => Value::Null,
            };
            Err(Flow::Return(value, *position))
        }

        Node::Show { expr, .. } => {
            let value = eval(expr, env)?;
            println!("{}", value.stringify());
            Ok(value)
        }

        Node::ListLit { items, .. } => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval(item, env)?);
            }
            Ok(Value::List(Rc::new(values)))
        }

        Node::DictLit { pairs, position } => {
            let mut entries: Vec<(DictKey, Value)> = Vec::with_capacity(pairs.len());
            for (key_node, value_node) in pairs {
                let key_val = eval(key_node, env)?;
                let key = DictKey::from_value(&key_val).ok_or_else(|| {
                    EvalError::ty(
                        format!("dict key must be a primitive type, found {}", key_val.tag()),
                        *position,
                    )
                })?;
                let value = eval(value_node, env)?;
                if let Some(existing) = entries.iter_mut().find(|(k, _)| *k == key) {
                    existing.1 = value;
                } else {
                    entries.push((key, value));
                }
            }
            Ok(Value::Dict(Rc::new(entries)))
        }

        Node::HtmlElem { tag, attrs, children, .. } => {
            let mut attr_values = Vec::with_capacity(attrs.len());
            for (name, expr) in attrs {
                attr_values.push((name.clone(), eval(expr, env)?));
            }
            let mut child_values = Vec::with_capacity(children.len());
            for child in children {
                child_values.push(eval(child, env)?);
            }
            Ok(Value::Html(Rc::new(HtmlValue {
                tag: tag.clone(),
                attrs: attr_values,
                children: child_values,
            })))
        }

        Node::CssRule { selector, props, .. } => Ok(Value::Css(Rc::new(CssValue {
            selector: selector.clone(),
            props: props.clone(),
        }))),
    }
}

fn literal_value(value: &LitVal, tag: TypeTag) -> Value {
    match value {
        LitVal::Int(n) => {
            debug_assert_eq!(tag, TypeTag::Integer);
            Value::Integer(*n)
        }
        LitVal::Float(n) => {
            debug_assert_eq!(tag, TypeTag::Decimal);
            Value::Decimal(*n)
        }
        LitVal::Str(s) => {
            debug_assert_eq!(tag, TypeTag::String);
            Value::string(s.as_str())
        }
        LitVal::Bool(b) => {
            debug_assert_eq!(tag, TypeTag::Boolean);
            Value::Boolean(*b)
        }
        LitVal::Null => Value::Null,
    }
}

fn check_tag_annotation(declared: &str, actual: TypeTag, position: Position) -> Result<(), EvalError> {
    match TypeTag::from_annotation(declared) {
        Some(expected) if expected == actual => Ok(()),
        Some(expected) => Err(EvalError::ty(
            format!("declared type {expected} but value has type {actual}"),
            position,
        )),
        None => Err(EvalError::ty(
            format!("unknown declared type '{declared}'"),
            position,
        )),
    }
}

fn eval_binary(op: BinOp, left: Value, right: Value, position: Position) -> Result<Value, EvalError> {
    match op {
        BinOp::Add => {
            if left.is_numeric() && right.is_numeric() {
                Ok(promote_numeric(&left, &right, |a, b| a + b, |a, b| a.wrapping_add(b)))
            } else if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                Ok(Value::string(format!("{}{}", left.stringify(), right.stringify())))
            } else {
                Err(type_mismatch("+", &left, &right, position))
            }
        }
        BinOp::Sub => numeric_binop(left, right, position, "-", |a, b| a - b, i64::wrapping_sub),
        BinOp::Mul => numeric_binop(left, right, position, "*", |a, b| a * b, i64::wrapping_mul),
        BinOp::Mod => {
            if !(left.is_numeric() && right.is_numeric()) {
                return Err(type_mismatch("%", &left, &right, position));
            }
            if is_zero(&right) {
                return Err(EvalError::division_by_zero(position));
            }
            Ok(promote_numeric(&left, &right, |a, b| a % b, i64::wrapping_rem))
        }
        BinOp::Div => {
            if !(left.is_numeric() && right.is_numeric()) {
                return Err(type_mismatch("/", &left, &right, position));
            }
            if is_zero(&right) {
                return Err(EvalError::division_by_zero(position));
            }
            let a = left.as_decimal().expect("checked numeric");
            let b = right.as_decimal().expect("checked numeric");
            Ok(Value::Decimal(a / b))
        }
        BinOp::Lt | BinOp::Gt | BinOp::Lte | BinOp::Gte => {
            if !(left.is_numeric() && right.is_numeric()) {
                return Err(type_mismatch("comparison", &left, &right, position));
            }
            let a = left.as_decimal().expect("checked numeric");
            let b = right.as_decimal().expect("checked numeric");
            let result = match op {
                BinOp::Lt => a < b,
                BinOp::Gt => a > b,
                BinOp::Lte => a <= b,
                BinOp::Gte => a >= b,
                _ => unreachable!(),
            };
            Ok(Value::Boolean(result))
        }
        BinOp::Eq | BinOp::Neq => {
            if left.tag() != right.tag() {
                return Err(EvalError::ty(
                    format!("cannot compare {} with {}", left.tag(), right.tag()),
                    position,
                ));
            }
            let equal = left == right;
            Ok(Value::Boolean(if op == BinOp::Eq { equal } else { !equal }))
        }
    }
}

fn numeric_binop(
    left: Value,
    right: Value,
    position: Position,
    symbol: &str,
    decimal_op: fn(f64, f64) -> f64,
    int_op: fn(i64, i64) -> i64,
) -> Result<Value, EvalError> {
    if !(left.is_numeric() && right.is_numeric()) {
        return Err(type_mismatch(symbol, &left, &right, position));
    }
    Ok(promote_numeric(&left, &right, decimal_op, int_op))
}

fn promote_numeric(
    left: &Value,
    right: &Value,
    decimal_op: fn(f64, f64) -> f64,
    int_op: fn(i64, i64) -> i64,
) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(int_op(*a, *b)),
        _ => Value::Decimal(decimal_op(
            left.as_decimal().expect("checked numeric"),
            right.as_decimal().expect("checked numeric"),
        )),
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n == 0,
        Value::Decimal(n) => *n == 0.0,
        _ => false,
    }
}

fn type_mismatch(op: &str, left: &Value, right: &Value, position: Position) -> EvalError {
    EvalError::ty(
        format!("operator '{op}' does not apply to {} and {}", left.tag(), right.tag()),
        position,
    )
}

fn eval_unary(op: UnOp, operand: Value, position: Position) -> Result<Value, EvalError> {
    match op {
        UnOp::Neg => match operand {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            Value::Decimal(n) => Ok(Value::Decimal(-n)),
            other => Err(EvalError::ty(
                format!("unary '-' does not apply to {}", other.tag()),
                position,
            )),
        },
        UnOp::Not => match operand {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(EvalError::ty(
                format!("unary 'no' does not apply to {}", other.tag()),
                position,
            )),
        },
    }
}

fn foreach_elements(iterable: Value, position: Position) -> Result<Vec<Value>, EvalError> {
    match iterable {
        Value::List(items) => Ok(items.as_ref().clone()),
        Value::String(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
        Value::Dict(pairs) => Ok(pairs.iter().map(|(k, _)| Value::string(k.to_string())).collect()),
        other => Err(EvalError::ty(
            format!("cannot iterate over {}", other.tag()),
            position,
        )),
    }
}

fn eval_call(name: &str, args: &[Node], env: &EnvRef, position: Position) -> EvalResult<Value> {
    let def = Environment::lookup_func(env, name, position)?;

    if def.params.len() != args.len() {
        return Err(Flow::Error(EvalError::arity(def.params.len(), args.len(), position)));
    }

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        arg_values.push(eval(arg, env)?);
    }

    let call_frame = Environment::child(&def.closure);
    for (param, value) in def.params.iter().zip(arg_values.into_iter()) {
        if let Some(declared) = &param.declared_type {
            check_tag_annotation(declared, value.tag(), position)?;
        }
        call_frame.borrow_mut().define_var(param.name.clone(), value);
    }

    let result = match eval_call_body(&def.body, &call_frame) {
        Ok(value) => value,
        Err(Flow::Return(value, _)) => value,
        Err(err @ Flow::Error(_)) => return Err(err),
    };

    if let Some(return_type) = &def.return_type {
        if let Some(expected) = TypeTag::from_annotation(return_type) {
            if expected != result.tag() {
                return Err(Flow::Error(EvalError::return_type(expected, result.tag(), position)));
            }
        } else {
            return Err(Flow::Error(EvalError::ty(
                format!("unknown declared return type '{return_type}'"),
                position,
            )));
        }
    }

    Ok(result)
}

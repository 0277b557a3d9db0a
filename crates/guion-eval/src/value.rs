//! Runtime values: the dynamically tagged result of evaluating a node.
//!
//! Composites (`List`, `Dict`, `Html`, `Css`) are reference-counted: the
//! language has no mutation operators on them, so sharing a backing `Rc`
//! instead of cloning the payload is a pure optimization, never observable.

use std::fmt;
use std::rc::Rc;

use guion_common::TypeTag;
use serde::Serialize;

/// A dict key: restricted to the tags `TypeTag::is_valid_dict_key` allows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DictKey {
    Integer(i64),
    Decimal(f64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for DictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictKey::Integer(n) => write!(f, "{n}"),
            DictKey::Decimal(n) => write!(f, "{n}"),
            DictKey::String(s) => write!(f, "{s}"),
            DictKey::Boolean(b) => write!(f, "{}", if *b { "verdadero" } else { "falso" }),
        }
    }
}

impl DictKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Integer(n) => DictKey::Integer(*n),
            Value::Decimal(n) => DictKey::Decimal(*n),
            Value::String(s) => DictKey::String(s.to_string()),
            Value::Boolean(b) => DictKey::Boolean(*b),
            _ => return None,
        })
    }
}

/// An `html` value: a tag name, its evaluated attributes, and its children.
/// Children that are themselves `Html` nest; anything else is stringified
/// at render time.
#[derive(Debug, Clone, Serialize)]
pub struct HtmlValue {
    pub tag: String,
    pub attrs: Vec<(String, Value)>,
    pub children: Vec<Value>,
}

/// Attribute order is not observable (matching an unordered payload
/// comparison); children order is, since it is a sequence.
impl PartialEq for HtmlValue {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && unordered_eq(&self.attrs, &other.attrs)
            && self.children == other.children
    }
}

/// Compares two pairings as multisets, independent of element order.
fn unordered_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    for item in a {
        let mut found = false;
        for (i, other) in b.iter().enumerate() {
            if !matched[i] && item == other {
                matched[i] = true;
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}

/// A `css` value: a selector and its literal string-valued properties,
/// kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssValue {
    pub selector: String,
    pub props: Vec<(String, String)>,
}

/// A dynamically tagged runtime value.
///
/// `Function` carries only the declared name, never its closing frame --
/// the frame a call should run against is recovered by looking the name
/// back up through the scope chain at call time, not by escaping with the
/// value itself.
#[derive(Debug, Clone, Serialize)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    String(Rc<str>),
    Boolean(bool),
    Null,
    List(Rc<Vec<Value>>),
    Dict(Rc<Vec<(DictKey, Value)>>),
    Function(Rc<str>),
    Html(Rc<HtmlValue>),
    Css(Rc<CssValue>),
}

/// A dict's payload is a mapping, not a sequence: two dicts with the same
/// entries in different insertion order are the same value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => unordered_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Html(a), Value::Html(b)) => a == b,
            (Value::Css(a), Value::Css(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::String(_) => TypeTag::String,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Null => TypeTag::Null,
            Value::List(_) => TypeTag::List,
            Value::Dict(_) => TypeTag::Dict,
            Value::Function(_) => TypeTag::Function,
            Value::Html(_) => TypeTag::Html,
            Value::Css(_) => TypeTag::Css,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Decimal(_))
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    /// Textual rendering used by `mostrar`, string concatenation, and
    /// HTML/CSS rendering of non-composite children.
    pub fn stringify(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Decimal(n) => n.to_string(),
            Value::String(s) => s.to_string(),
            Value::Boolean(b) => if *b { "verdadero" } else { "falso" }.to_string(),
            Value::Null => "nulo".to_string(),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::stringify).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Dict(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.stringify()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Value::Function(name) => format!("<funcion {name}>"),
            Value::Html(html) => format!("<{}>", html.tag),
            Value::Css(css) => css.selector.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: Vec<(DictKey, Value)>) -> Value {
        Value::Dict(Rc::new(pairs))
    }

    #[test]
    fn dicts_with_same_entries_in_different_order_are_equal() {
        let a = dict(vec![
            (DictKey::Integer(1), Value::string("a")),
            (DictKey::Integer(2), Value::string("b")),
        ]);
        let b = dict(vec![
            (DictKey::Integer(2), Value::string("b")),
            (DictKey::Integer(1), Value::string("a")),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn dicts_with_different_entries_are_not_equal() {
        let a = dict(vec![(DictKey::Integer(1), Value::string("a"))]);
        let b = dict(vec![(DictKey::Integer(1), Value::string("b"))]);
        assert_ne!(a, b);
    }

    #[test]
    fn dicts_with_a_duplicated_key_value_pair_require_matching_multiplicity() {
        let a = dict(vec![
            (DictKey::Integer(1), Value::Integer(1)),
            (DictKey::Integer(1), Value::Integer(1)),
        ]);
        let b = dict(vec![(DictKey::Integer(1), Value::Integer(1))]);
        assert_ne!(a, b);
    }

    #[test]
    fn html_attrs_in_different_order_are_equal() {
        let a = Value::Html(Rc::new(HtmlValue {
            tag: "div".to_string(),
            attrs: vec![
                ("id".to_string(), Value::string("x")),
                ("clase".to_string(), Value::string("caja")),
            ],
            children: vec![],
        }));
        let b = Value::Html(Rc::new(HtmlValue {
            tag: "div".to_string(),
            attrs: vec![
                ("clase".to_string(), Value::string("caja")),
                ("id".to_string(), Value::string("x")),
            ],
            children: vec![],
        }));
        assert_eq!(a, b);
    }

    #[test]
    fn html_children_order_is_significant() {
        let a = Value::Html(Rc::new(HtmlValue {
            tag: "div".to_string(),
            attrs: vec![],
            children: vec![Value::string("uno"), Value::string("dos")],
        }));
        let b = Value::Html(Rc::new(HtmlValue {
            tag: "div".to_string(),
            attrs: vec![],
            children: vec![Value::string("dos"), Value::string("uno")],
        }));
        assert_ne!(a, b);
    }
}

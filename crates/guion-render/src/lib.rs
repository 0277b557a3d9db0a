//! Pure textual renderers over `Value`: no evaluation, no side effects.

use guion_eval::Value;

/// Render an `html`-tagged value as a tag tree: `<tag attr="val">children</tag>`.
/// A non-html value renders as its plain stringified payload, matching what
/// the source falls back to when asked to render something that isn't an
/// element.
pub fn to_html(value: &Value) -> String {
    match value {
        Value::Html(html) => {
            let attrs: String = html
                .attrs
                .iter()
                .map(|(name, v)| format!(" {name}=\"{}\"", v.stringify()))
                .collect();
            let children: String = html.children.iter().map(to_html).collect();
            format!("<{tag}{attrs}>{children}</{tag}>", tag = html.tag)
        }
        other => other.stringify(),
    }
}

/// Render a `css`-tagged value as one rule block. Anything else renders
/// as the empty string -- there is no meaningful CSS projection of a
/// non-css value.
pub fn to_css(value: &Value) -> String {
    match value {
        Value::Css(css) => {
            let props: String = css
                .props
                .iter()
                .map(|(name, val)| format!("  {name}: {val};\n"))
                .collect();
            format!("{} {{\n{props}}}", css.selector)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guion_eval::{CssValue, HtmlValue};
    use std::rc::Rc;

    #[test]
    fn renders_nested_html() {
        let inner = Value::Html(Rc::new(HtmlValue {
            tag: "span".to_string(),
            attrs: vec![],
            children: vec![Value::string("hola")],
        }));
        let outer = Value::Html(Rc::new(HtmlValue {
            tag: "div".to_string(),
            attrs: vec![("clase".to_string(), Value::string("caja"))],
            children: vec![inner],
        }));
        assert_eq!(
            to_html(&outer),
            r#"<div clase="caja"><span>hola</span></div>"#
        );
    }

    #[test]
    fn non_html_falls_back_to_stringify() {
        assert_eq!(to_html(&Value::Integer(42)), "42");
    }

    #[test]
    fn renders_css_rule() {
        let css = Value::Css(Rc::new(CssValue {
            selector: ".caja".to_string(),
            props: vec![
                ("color".to_string(), "azul".to_string()),
                ("tamano".to_string(), "10px".to_string()),
            ],
        }));
        assert_eq!(
            to_css(&css),
            ".caja {\n  color: azul;\n  tamano: 10px;\n}"
        );
    }

    #[test]
    fn non_css_renders_empty() {
        assert_eq!(to_css(&Value::Null), "");
    }
}

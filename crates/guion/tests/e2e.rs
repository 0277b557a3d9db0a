//! End-to-end tests for the guion interpreter.
//!
//! Each test writes a short source string, runs it through the full
//! `run`/`ast` pipeline in-process, and asserts the observable output.

use guion::{ast, run, to_css, to_html, Error, ErrorKind, Node, Value};

// ── E2E Tests ────────────────────────────────────────────────────────────

#[test]
fn e2e_arithmetic_precedence() {
    assert_eq!(run("variable x = 2 + 3 * 4"), Ok(Value::Integer(14)));
}

#[test]
fn e2e_string_plus_number_concatenates() {
    assert_eq!(run("variable s = \"hola \" + 2"), Ok(Value::string("hola 2")));
}

#[test]
fn e2e_division_is_decimal() {
    assert_eq!(run("mostrar(10 / 4)"), Ok(Value::Decimal(2.5)));
}

#[test]
fn e2e_function_call() {
    assert_eq!(
        run("funcion f(a, b) { devolver a + b } f(1, 2)"),
        Ok(Value::Integer(3))
    );
}

#[test]
fn e2e_while_loop() {
    assert_eq!(
        run("variable i = 0 mientras (i < 3) { i = i + 1 } i"),
        Ok(Value::Integer(3))
    );
}

#[test]
fn e2e_if_else() {
    assert!(run("si (1 == 1) { mostrar(\"si\") } sino { mostrar(\"no\") }").is_ok());
}

#[test]
fn e2e_foreach_over_list() {
    assert!(run("variable xs = [1,2,3] para cada v en xs { mostrar(v) }").is_ok());
}

#[test]
fn e2e_division_by_zero() {
    let err: Error = run("1 / 0").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
    assert_eq!(err.line, Some(1));
}

#[test]
fn e2e_ast_entry_point_parses_without_evaluating() {
    let node = ast("variable x = 1").expect("parse ok");
    assert!(matches!(node, Node::Program { .. }));
}

#[test]
fn e2e_lexical_error_surfaces_with_position() {
    let err = run("variable x = @").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
}

#[test]
fn e2e_return_outside_function_is_syntax_error() {
    let err = run("devolver 1").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn e2e_html_and_css_render() {
    let value = run("div clase=\"caja\" (\"hola\")").expect("eval ok");
    assert_eq!(to_html(&value), r#"<div clase="caja">hola</div>"#);

    let css = run("\".caja\" { color: \"azul\" }").expect("eval ok");
    assert_eq!(to_css(&css), ".caja {\n  color: azul;\n}");
}

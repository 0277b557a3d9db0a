//! Tree-walking evaluator for the guion AST.

mod environment;
mod error;
mod evaluator;
mod value;

pub use environment::{EnvRef, Environment, FunctionDef};
pub use error::{EvalError, EvalResult, Flow};
pub use evaluator::{eval, eval_program};
pub use value::{CssValue, DictKey, HtmlValue, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use guion_lexer::Scanner;
    use guion_parser::{Node, Parser};

    fn run(src: &str) -> EvalResult<Value> {
        let tokens = Scanner::tokenize(src).expect("lex ok");
        let program = Parser::parse(tokens).expect("parse ok");
        let body = match program {
            Node::Program { body, .. } => body,
            other => panic!("expected Program, got {other:?}"),
        };
        let env = Environment::root();
        eval_program(&body, &env)
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run("variable x = 2 + 3 * 4"), Ok(Value::Integer(14)));
    }

    #[test]
    fn string_concat_with_number() {
        assert_eq!(
            run("variable s = \"hola \" + 2"),
            Ok(Value::string("hola 2"))
        );
    }

    #[test]
    fn division_always_decimal() {
        assert_eq!(run("10 / 4"), Ok(Value::Decimal(2.5)));
    }

    #[test]
    fn function_call_returns_sum() {
        assert_eq!(
            run("funcion f(a, b) { devolver a + b } f(1, 2)"),
            Ok(Value::Integer(3))
        );
    }

    #[test]
    fn while_loop_counts_up() {
        assert_eq!(
            run("variable i = 0 mientras (i < 3) { i = i + 1 } i"),
            Ok(Value::Integer(3))
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let result = run("1 / 0");
        assert!(matches!(result, Err(Flow::Error(EvalError::DivisionByZero { .. }))));
    }

    #[test]
    fn foreach_over_dict_yields_string_keys() {
        let result = run("variable d = {1: \"uno\"} para cada k en d { mostrar(k) }");
        assert!(result.is_ok());
    }

    #[test]
    fn short_circuit_and_skips_right_side() {
        assert_eq!(run("falso y (1 / 0 == 0)"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn short_circuit_or_skips_right_side() {
        assert_eq!(run("verdadero o (1 / 0 == 0)"), Ok(Value::Boolean(true)));
    }

    #[test]
    fn calls_use_static_not_dynamic_scope() {
        // `leer` closes over the frame it was declared in (global, x = 1),
        // not whatever frame happens to be calling it (`probar`'s, x = 2).
        let result = run(
            "variable x = 1 \
             funcion leer() { devolver x } \
             funcion probar() { variable x = 2 devolver leer() } \
             probar()",
        );
        assert_eq!(result, Ok(Value::Integer(1)));
    }

    #[test]
    fn undefined_name_is_name_error() {
        let result = run("no_existe");
        assert!(matches!(result, Err(Flow::Error(EvalError::Name { .. }))));
    }

    #[test]
    fn return_inside_nested_loop_unwinds_function() {
        let result = run(
            "funcion buscar() { \
                mientras (verdadero) { \
                    para (variable i = 0; i < 10; i = i + 1) { \
                        si (i == 3) { devolver i } \
                    } \
                } \
             } \
             buscar()",
        );
        assert_eq!(result, Ok(Value::Integer(3)));
    }
}

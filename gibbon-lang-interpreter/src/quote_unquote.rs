use gc::Gc;

use gibbon_lang_core::ast::Expression;
use gibbon_lang_core::modify;

use crate::builtins::Builtins;
use crate::environment::Environment;
use crate::evaluator::eval_expression;
use crate::object::{Object, QuickReturn};

/// The `quote(expr)` special form: splice `unquote` calls, then carry
/// the resulting AST as a value instead of evaluating it.
pub fn quote(
    expression: Expression,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    let expression = eval_unquote_calls(expression, environment, builtins);
    Ok(Object::quote(expression))
}

fn eval_unquote_calls(
    expression: Expression,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Expression {
    modify::modify_expression(expression, &mut |expression| {
        if !is_unquote_call(&expression) {
            return expression;
        }
        let Expression::CallExpression { arguments, .. } = &expression else {
            return expression;
        };
        match eval_expression(&arguments[0], environment, builtins) {
            // Results with no literal form, and failing arguments, leave
            // the call in place
            Ok(object) => object_to_expression(object.as_ref()).unwrap_or(expression),
            Err(_) => expression,
        }
    })
}

/// An unquote splice point is a call to exactly `unquote` with exactly
/// one argument; anything else is left for ordinary evaluation.
fn is_unquote_call(expression: &Expression) -> bool {
    match expression {
        Expression::CallExpression {
            function,
            arguments,
        } => {
            arguments.len() == 1
                && matches!(
                    function.as_ref(),
                    Expression::Identifier(identifier) if identifier.name.as_ref() == "unquote"
                )
        }
        _ => false,
    }
}

fn object_to_expression(object: &Object) -> Option<Expression> {
    match object {
        Object::Integer(value) => Some(Expression::IntegerLiteral(*value)),
        Object::Boolean(value) => Some(Expression::BooleanLiteral(*value)),
        // Splicing a quote grafts its carried AST, enabling nesting
        Object::Quote(expression) => Some(expression.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use gibbon_lang_core::lexer::Tokenizer;
    use gibbon_lang_core::parser::Parser;

    use crate::builtins::Builtins;
    use crate::environment::Environment;
    use crate::object::Object;

    fn test_quotes(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let tokenizer = Tokenizer::new(input);
            let mut parser = Parser::new(tokenizer);
            let ast = parser.parse_program().unwrap();
            let result =
                crate::evaluator::eval_program(&ast, &mut Environment::new(), &Builtins::standard())
                    .unwrap();

            match result.as_ref() {
                Object::Quote(expression) => {
                    assert_eq!(expression.to_string(), expected, "input: {}", input)
                }
                other => panic!("expected a quote for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_quote() {
        let tests = vec![
            ("quote(5)", "5"),
            ("quote(5 + 8)", "(5 + 8)"),
            ("quote(foobar)", "foobar"),
            ("quote(foobar + barfoo)", "(foobar + barfoo)"),
        ];

        test_quotes(tests);
    }

    #[test]
    fn test_quote_unquote() {
        let tests = vec![
            ("quote(unquote(4))", "4"),
            ("quote(unquote(4 + 4))", "8"),
            ("quote(8 + unquote(4 + 4))", "(8 + 8)"),
            ("quote(unquote(4 + 4) + 8)", "(8 + 8)"),
            ("let foobar = 8; quote(foobar)", "foobar"),
            ("let foobar = 8; quote(unquote(foobar))", "8"),
            ("let x = 7; quote(unquote(x))", "7"),
            ("quote(unquote(true))", "true"),
            ("quote(unquote(true == false))", "false"),
            // Splices are reached in any expression position
            ("quote([1, unquote(1 + 1)])", "[1, 2]"),
            ("quote({unquote(1 + 1): 2})", "{2: 2}"),
            ("quote(f(unquote(1 + 1)))", "f(2)"),
        ];

        test_quotes(tests);
    }

    #[test]
    fn test_nested_quotes() {
        let tests = vec![
            ("quote(unquote(quote(4 + 4)))", "(4 + 4)"),
            (
                "let quotedInfixExpression = quote(4 + 4);
                 quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
                "(8 + (4 + 4))",
            ),
        ];

        test_quotes(tests);
    }

    #[test]
    fn test_unquote_left_in_place() {
        let tests = vec![
            // Wrong arity is not a splice point
            ("quote(unquote(1, 2))", "unquote(1, 2)"),
            ("quote(unquote())", "unquote()"),
            // A failing argument leaves the call untouched
            ("quote(unquote(missing))", "unquote(missing)"),
            // So does a result with no literal form
            ("quote(unquote(\"str\"))", "unquote(\"str\")"),
        ];

        test_quotes(tests);
    }
}

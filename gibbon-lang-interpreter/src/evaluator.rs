use std::collections::HashMap;

use gc::Gc;

use gibbon_lang_core::ast;
use gibbon_lang_core::ast::Expression;

use crate::builtins::Builtins;
use crate::environment::Environment;
use crate::object::{object_to_key, EvaluationError, MacroObject, Object, QuickReturn};
use crate::quote_unquote::quote;

pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, EvaluationError> {
    let mut output = Object::null();
    for statement in &program.statements {
        let result = eval_statement(statement, environment, builtins);

        match result {
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => return Err(error),
            Ok(object) => output = object,
        };
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => {
            eval_expression(expression, environment, builtins)
        }
        ast::Statement::Return(statement) => eval_return_statement(statement, environment, builtins),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment, builtins),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment, builtins)?;
    environment.set(&statement.identifier.name, value);
    Ok(Object::null())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment, builtins)?;
    Err(QuickReturn::Return(value))
}

pub(crate) fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(eval_expressions(
            array,
            environment,
            builtins,
        )?)),
        Expression::HashLiteral(literal) => {
            let mut hash = HashMap::new();
            for (key_expression, value_expression) in literal {
                let key = eval_expression(key_expression, environment, builtins)?;
                let hashed_key = object_to_key(&key).map_err(QuickReturn::Error)?;
                let value = eval_expression(value_expression, environment, builtins)?;
                // Duplicate keys: later pairs win
                hash.insert(hashed_key, (key, value));
            }
            Ok(Object::hash(hash))
        }
        Expression::Identifier(identifier) => environment
            .get(&identifier.name)
            .or_else(|| builtins.lookup(&identifier.name))
            .ok_or_else(|| {
                QuickReturn::Error(EvaluationError::IdentifierNotFound(identifier.name.clone()))
            }),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment, builtins)?;
            eval_prefix_operation(kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment, builtins)?;
            let right = eval_expression(right, environment, builtins)?;
            eval_infix_operation(kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment, builtins)?;
            if is_truthy(&condition) {
                eval_block_statement(consequence, environment, builtins)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment, builtins)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::MacroLiteral { parameters, body } => {
            // A macro literal that survives the pre-pass still evaluates
            // to a value; only calls to it are meaningless
            Ok(Gc::new(Object::Macro(MacroObject {
                parameters: parameters.clone(),
                body: body.clone(),
                env: environment.clone(),
            })))
        }
        Expression::CallExpression {
            function,
            arguments,
        } => {
            if let Expression::Identifier(identifier) = function.as_ref() {
                // `quote` suspends evaluation of its single argument
                if identifier.name.as_ref() == "quote" && arguments.len() == 1 {
                    return quote(arguments[0].clone(), environment, builtins);
                }
            }
            let function = eval_expression(function, environment, builtins)?;
            let arguments = eval_expressions(arguments, environment, builtins)?;
            match function.as_ref() {
                Object::Function(function) => apply_function(function, arguments, builtins),
                Object::Builtin(builtin) => (builtin.func)(arguments).map_err(QuickReturn::Error),
                _ => Err(QuickReturn::Error(EvaluationError::NotAFunction(
                    function.type_name(),
                ))),
            }
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment, builtins)?;
            let index = eval_expression(index, environment, builtins)?;
            match (left.as_ref(), index.as_ref()) {
                (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
                    .ok()
                    .and_then(|index| array.get(index))
                    .cloned()
                    .unwrap_or_else(Object::null)),
                (Object::Hash(hash), _) => {
                    let hashed_index = object_to_key(&index).map_err(QuickReturn::Error)?;
                    Ok(hash
                        .get(&hashed_index)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_else(Object::null))
                }
                _ => Err(QuickReturn::Error(EvaluationError::IndexNotSupported(
                    left.type_name(),
                ))),
            }
        }
    }
}

/// Only `true` itself is truthy. Null and `false` are falsy like
/// everywhere else, but so is every non-Boolean value, integers
/// included.
fn is_truthy(object: &Object) -> bool {
    matches!(object, Object::Boolean(true))
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Vec<Gc<Object>>, QuickReturn> {
    let mut result = Vec::new();
    for expression in expressions {
        result.push(eval_expression(expression, environment, builtins)?);
    }
    Ok(result)
}

fn apply_function(
    function: &crate::object::Function,
    arguments: Vec<Gc<Object>>,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    let mut environment = Environment::new_enclosed(function.env.clone());
    // Positional binding; surplus arguments are dropped and missing ones
    // stay unbound
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        environment.set(&parameter.name, argument);
    }
    let result = eval_block_statement(&function.body, &mut environment, builtins);
    match result {
        Ok(object) => Ok(object),
        Err(QuickReturn::Return(value)) => Ok(value),
        Err(error @ QuickReturn::Error(_)) => Err(error),
    }
}

pub(crate) fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Result<Gc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        // `?` forwards both returns and errors without unwrapping
        result = eval_statement(statement, environment, builtins)?;
    }
    Ok(result)
}

fn eval_prefix_operation(
    kind: &ast::PrefixOperationKind,
    right: Gc<Object>,
) -> Result<Gc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, Object::Boolean(value)) => Ok(Object::boolean(!value)),
        (ast::PrefixOperationKind::Bang, Object::Null) => Ok(Object::boolean(true)),
        (ast::PrefixOperationKind::Bang, _) => Ok(Object::boolean(false)),
        (ast::PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (ast::PrefixOperationKind::Minus, _) => {
            Err(QuickReturn::Error(EvaluationError::UnknownPrefixOperator {
                operator: kind.to_str(),
                right: right.type_name(),
            }))
        }
    }
}

fn eval_infix_operation(
    kind: &ast::InfixOperationKind,
    left: Gc<Object>,
    right: Gc<Object>,
) -> Result<Gc<Object>, QuickReturn> {
    use ast::InfixOperationKind;
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (Object::String(left), Object::String(right)) => match kind {
            InfixOperationKind::Plus => Ok(Object::string(format!("{}{}", left, right))),
            _ => Err(QuickReturn::Error(EvaluationError::UnknownInfixOperator {
                left: "String",
                operator: kind.to_str(),
                right: "String",
            })),
        },
        _ if left.type_name() != right.type_name() => {
            Err(QuickReturn::Error(EvaluationError::TypeMismatch {
                left: left.type_name(),
                operator: kind.to_str(),
                right: right.type_name(),
            }))
        }
        // Remaining same-type pairs compare by their printed form;
        // anything but (in)equality on them is null
        _ => match kind {
            InfixOperationKind::Equal => Ok(Object::boolean(left.to_string() == right.to_string())),
            InfixOperationKind::NotEqual => {
                Ok(Object::boolean(left.to_string() != right.to_string()))
            }
            _ => Ok(Object::null()),
        },
    }
}

fn eval_integer_infix_operation(
    kind: &ast::InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Gc<Object>, QuickReturn> {
    use ast::InfixOperationKind::*;
    // Arithmetic is modulo 2^64; overflow wraps rather than aborting
    match kind {
        Plus => Ok(Object::integer(left.wrapping_add(right))),
        Minus => Ok(Object::integer(left.wrapping_sub(right))),
        Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        Divide => {
            if right == 0 {
                return Err(QuickReturn::Error(EvaluationError::DivisionByZero));
            }
            Ok(Object::integer(left.wrapping_div(right)))
        }
        LessThan => Ok(Object::boolean(left < right)),
        GreaterThan => Ok(Object::boolean(left > right)),
        Equal => Ok(Object::boolean(left == right)),
        NotEqual => Ok(Object::boolean(left != right)),
    }
}

#[cfg(test)]
mod tests {
    use gc::Gc;

    use gibbon_lang_core::lexer::Tokenizer;
    use gibbon_lang_core::parser::Parser;

    use crate::builtins::Builtins;
    use crate::environment::Environment;
    use crate::object::{EvaluationError, HashKey, Object};

    fn evaluate(input: &str) -> Result<Gc<Object>, EvaluationError> {
        let tokenizer = Tokenizer::new(input);
        let mut parser = Parser::new(tokenizer);
        let ast = parser.parse_program().unwrap();
        super::eval_program(&ast, &mut Environment::new(), &Builtins::standard())
    }

    fn test_evaluation(inputs: Vec<(&str, Result<Gc<Object>, EvaluationError>)>) {
        for (input, output) in inputs {
            assert_eq!(evaluate(input), output, "input: {}", input);
        }
    }

    #[test]
    fn test_literals() {
        let inputs = vec![
            ("5;", Ok(Object::integer(5))),
            ("true;", Ok(Object::boolean(true))),
            ("false;", Ok(Object::boolean(false))),
            ("\"hello\";", Ok(Object::string("hello".to_owned()))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_prefix_operations() {
        let inputs = vec![
            ("-10;", Ok(Object::integer(-10))),
            ("--5;", Ok(Object::integer(5))),
            ("!false;", Ok(Object::boolean(true))),
            ("!!true;", Ok(Object::boolean(true))),
            // Bang treats every non-boolean as falsy
            ("!5;", Ok(Object::boolean(false))),
            ("!\"str\";", Ok(Object::boolean(false))),
            ("!0;", Ok(Object::boolean(false))),
            (
                "-true;",
                Err(EvaluationError::UnknownPrefixOperator {
                    operator: "-",
                    right: "Boolean",
                }),
            ),
            (
                "-\"str\";",
                Err(EvaluationError::UnknownPrefixOperator {
                    operator: "-",
                    right: "String",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_integer_arithmetic() {
        let inputs = vec![
            ("5 + 5 + 5 + 5 - 10", Ok(Object::integer(10))),
            ("2 * 2 * 2 * 2 * 2", Ok(Object::integer(32))),
            ("-50 + 100 + -50", Ok(Object::integer(0))),
            ("5 * 2 + 10", Ok(Object::integer(20))),
            ("5 + 5 * 2", Ok(Object::integer(15))),
            ("20 + 2 * -10", Ok(Object::integer(0))),
            ("50 / 2 * 2 + 10", Ok(Object::integer(60))),
            ("2 * (5 + 10)", Ok(Object::integer(30))),
            ("3 * 3 * 3 + 10", Ok(Object::integer(37))),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Ok(Object::integer(50))),
            // Division truncates toward zero
            ("7 / 2", Ok(Object::integer(3))),
            ("-7 / 2", Ok(Object::integer(-3))),
            ("5 / 0", Err(EvaluationError::DivisionByZero)),
            // Overflow wraps
            (
                "9223372036854775807 + 1",
                Ok(Object::integer(i64::MIN)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_comparisons() {
        let inputs = vec![
            ("1 < 2", Ok(Object::boolean(true))),
            ("1 > 2", Ok(Object::boolean(false))),
            ("1 == 1", Ok(Object::boolean(true))),
            ("1 != 1", Ok(Object::boolean(false))),
            ("1 != 2", Ok(Object::boolean(true))),
            ("true == true", Ok(Object::boolean(true))),
            ("false == true", Ok(Object::boolean(false))),
            ("true != false", Ok(Object::boolean(true))),
            ("(1 < 2) == true", Ok(Object::boolean(true))),
            ("(1 > 2) == true", Ok(Object::boolean(false))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_strings() {
        let inputs = vec![
            (
                "\"Hello\" + \" \" + \"World\"",
                Ok(Object::string("Hello World".to_owned())),
            ),
            // Only concatenation is defined on strings
            (
                "\"a\" - \"b\"",
                Err(EvaluationError::UnknownInfixOperator {
                    left: "String",
                    operator: "-",
                    right: "String",
                }),
            ),
            (
                "\"a\" == \"a\"",
                Err(EvaluationError::UnknownInfixOperator {
                    left: "String",
                    operator: "==",
                    right: "String",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_equal_type_fallback() {
        let inputs = vec![
            // Values without a dedicated comparison rule compare by their
            // printed form, and reject everything else with null
            ("[1, 2] == [1, 2]", Ok(Object::boolean(true))),
            ("[1, 2] == [1, 3]", Ok(Object::boolean(false))),
            ("[1, 2] != [1, 3]", Ok(Object::boolean(true))),
            ("[1] + [2]", Ok(Object::null())),
            ("[1] < [2]", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_type_mismatch() {
        let inputs = vec![
            (
                "5 + true",
                Err(EvaluationError::TypeMismatch {
                    left: "Integer",
                    operator: "+",
                    right: "Boolean",
                }),
            ),
            (
                "5 + true; 5;",
                Err(EvaluationError::TypeMismatch {
                    left: "Integer",
                    operator: "+",
                    right: "Boolean",
                }),
            ),
            (
                "\"a\" + 1",
                Err(EvaluationError::TypeMismatch {
                    left: "String",
                    operator: "+",
                    right: "Integer",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_conditionals() {
        let inputs = vec![
            ("if (true) { 10 }", Ok(Object::integer(10))),
            ("if (false) { 10 }", Ok(Object::null())),
            ("if (1 < 2) { 10 } else { 20 }", Ok(Object::integer(10))),
            ("if (1 > 2) { 10 } else { 20 }", Ok(Object::integer(20))),
            // Non-boolean conditions are falsy, integers included
            ("if (1) { 10 } else { 20 }", Ok(Object::integer(20))),
            ("if (0) { 10 } else { 20 }", Ok(Object::integer(20))),
            ("if (\"yes\") { 10 }", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_let_statements() {
        let inputs = vec![
            ("let a = 5; a;", Ok(Object::integer(5))),
            ("let a = 5 * 5; a;", Ok(Object::integer(25))),
            ("let a = 5; let b = a; b;", Ok(Object::integer(5))),
            (
                "let a = 5; let b = a; let c = a + b + 5; c;",
                Ok(Object::integer(15)),
            ),
            // A let statement itself produces no value
            ("let a = 5;", Ok(Object::null())),
            (
                "let x = 5 + true; 10;",
                Err(EvaluationError::TypeMismatch {
                    left: "Integer",
                    operator: "+",
                    right: "Boolean",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_return_statements() {
        let inputs = vec![
            ("return 10;", Ok(Object::integer(10))),
            ("return 10; 9;", Ok(Object::integer(10))),
            ("return 2 * 5; 9;", Ok(Object::integer(10))),
            ("9; return 2 * 5; 9;", Ok(Object::integer(10))),
            // Nested blocks propagate the return unopened
            (
                "if (true) { if (true) { return 10; } return 1; }",
                Ok(Object::integer(10)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_identifiers() {
        let inputs = vec![
            (
                "foobar",
                Err(EvaluationError::IdentifierNotFound("foobar".into())),
            ),
            (
                "let a = 1; b",
                Err(EvaluationError::IdentifierNotFound("b".into())),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_application() {
        let inputs = vec![
            (
                "let identity = fn(x) { x }; identity(5)",
                Ok(Object::integer(5)),
            ),
            (
                "let identity = fn(x) { return x; }; identity(5)",
                Ok(Object::integer(5)),
            ),
            (
                "let double = fn(x) { x * 2 }; double(5)",
                Ok(Object::integer(10)),
            ),
            (
                "let add = fn(x, y) { x + y }; add(5, 5)",
                Ok(Object::integer(10)),
            ),
            (
                "let add = fn(x, y) { x + y }; add(5 + 5, add(5, 5))",
                Ok(Object::integer(20)),
            ),
            ("fn(x) { x }(5)", Ok(Object::integer(5))),
            (
                "
                let factorial = fn(n) {
                    if (n < 2) { 1 }
                    else { factorial(n - 1) * n }
                };
                factorial(5)",
                Ok(Object::integer(120)),
            ),
            (
                "let counter = fn(x) { if (x > 3) { return x; } counter(x + 1); }; counter(0)",
                Ok(Object::integer(4)),
            ),
            ("5(1)", Err(EvaluationError::NotAFunction("Integer"))),
            (
                "let x = 10; x(1)",
                Err(EvaluationError::NotAFunction("Integer")),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_argument_binding() {
        let inputs = vec![
            // Surplus arguments are ignored
            ("let f = fn(x) { x }; f(1, 2, 3)", Ok(Object::integer(1))),
            // A missing argument leaves the parameter unbound
            (
                "let f = fn(x, y) { y }; f(1)",
                Err(EvaluationError::IdentifierNotFound("y".into())),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_closures() {
        let inputs = vec![
            (
                "let newAdder = fn(x) { fn(y) { x + y } }; let a = newAdder(2); a(3)",
                Ok(Object::integer(5)),
            ),
            (
                "
                let fa = fn() {
                    let x = 5;
                    let fb = fn() { x };
                    fb
                };
                let temp = fa();
                temp()",
                Ok(Object::integer(5)),
            ),
            (
                "
                let fa = fn() {
                    let is_even = fn(x) {
                        if (x == 0) { true } else { is_odd(x - 1) }
                    };
                    let is_odd = fn(x) {
                        if (x == 0) { false } else { is_even(x - 1) }
                    };
                    is_even
                };
                let temp = fa();
                temp(3)",
                Ok(Object::boolean(false)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_arrays() {
        let inputs = vec![
            (
                "[1, 2 * 2, 3 + 3]",
                Ok(Object::array(vec![
                    Object::integer(1),
                    Object::integer(4),
                    Object::integer(6),
                ])),
            ),
            ("[1, 2, 3][0]", Ok(Object::integer(1))),
            ("[1, 2, 3][2]", Ok(Object::integer(3))),
            ("let i = 0; [1][i]", Ok(Object::integer(1))),
            ("let arr = [1, 2, 3]; arr[1 + 1]", Ok(Object::integer(3))),
            // Out-of-range lookups are null, never an error
            ("[1, 2, 3][99]", Ok(Object::null())),
            ("[1, 2, 3][3]", Ok(Object::null())),
            ("[1, 2, 3][-1]", Ok(Object::null())),
            (
                "[1, 5 + true]",
                Err(EvaluationError::TypeMismatch {
                    left: "Integer",
                    operator: "+",
                    right: "Boolean",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_hashes() {
        let inputs = vec![
            (
                "let two = \"two\";
                {\"one\": 10 - 9, two: 1 + 1, \"thr\" + \"ee\": 6 / 2, 4: 4, true: 5, false: 6}[\"thr\" + \"ee\"]",
                Ok(Object::integer(3)),
            ),
            ("{\"foo\": 5}[\"foo\"]", Ok(Object::integer(5))),
            ("{\"foo\": 5}[\"bar\"]", Ok(Object::null())),
            ("let key = \"foo\"; {\"foo\": 5}[key]", Ok(Object::integer(5))),
            ("{}[\"foo\"]", Ok(Object::null())),
            ("{5: 5}[5]", Ok(Object::integer(5))),
            ("{true: 5}[true]", Ok(Object::integer(5))),
            ("{false: 5}[false]", Ok(Object::integer(5))),
            // Later duplicates win
            ("{1: \"a\", 1: \"b\"}[1]", Ok(Object::string("b".to_owned()))),
            (
                "{fn(x) { x }: 1}",
                Err(EvaluationError::UnusableHashKey("Function")),
            ),
            (
                "{1: 1}[fn(x) { x }]",
                Err(EvaluationError::UnusableHashKey("Function")),
            ),
            (
                "{[1]: 1}",
                Err(EvaluationError::UnusableHashKey("Array")),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_hash_evaluation_order() {
        // The key's hashability is checked before its value runs
        let result = evaluate("{fn(x) { x }: 5 + true}");
        assert_eq!(result, Err(EvaluationError::UnusableHashKey("Function")));

        let hash = evaluate("{\"a\": 1, \"b\": 2}").unwrap();
        match hash.as_ref() {
            Object::Hash(pairs) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(
                    pairs.get(&HashKey::String("a".to_owned())).map(|(_, v)| v),
                    Some(&Object::integer(1))
                );
            }
            other => panic!("expected a hash, got {:?}", other),
        }
    }

    #[test]
    fn test_index_errors() {
        let inputs = vec![
            ("5[0]", Err(EvaluationError::IndexNotSupported("Integer"))),
            (
                "true[0]",
                Err(EvaluationError::IndexNotSupported("Boolean")),
            ),
            (
                "[1, 2, 3][\"0\"]",
                Err(EvaluationError::IndexNotSupported("Array")),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_builtin_resolution() {
        let inputs = vec![
            ("len(\"hello\")", Ok(Object::integer(5))),
            ("len([1, 2, 3])", Ok(Object::integer(3))),
            ("first([1, 2])", Ok(Object::integer(1))),
            ("last([1, 2])", Ok(Object::integer(2))),
            (
                "push([1], 2)",
                Ok(Object::array(vec![Object::integer(1), Object::integer(2)])),
            ),
            ("to_string(12)", Ok(Object::string("12".to_owned()))),
            // Environment bindings shadow builtins
            (
                "let len = fn(x) { 99 }; len(\"abc\")",
                Ok(Object::integer(99)),
            ),
            (
                "len(1)",
                Err(EvaluationError::BuiltinFunctionError(
                    "unexpected argument type. Expected String or Array got Integer".into(),
                )),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_determinism() {
        // Same program, fresh environments, equal results
        let input = "let f = fn(x) { x * 2 }; [f(1), {\"k\": f(2)}, \"s\"]";
        assert_eq!(evaluate(input), evaluate(input));
    }

    #[test]
    fn test_empty_table() {
        let tokenizer = Tokenizer::new("len(\"abc\")");
        let mut parser = Parser::new(tokenizer);
        let ast = parser.parse_program().unwrap();
        let result = super::eval_program(&ast, &mut Environment::new(), &Builtins::empty());

        assert_eq!(
            result,
            Err(EvaluationError::IdentifierNotFound("len".into()))
        );
    }
}

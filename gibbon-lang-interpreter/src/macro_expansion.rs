use gc::Gc;

use gibbon_lang_core::ast::{Expression, Program, Statement};
use gibbon_lang_core::modify;

use crate::builtins::Builtins;
use crate::environment::Environment;
use crate::evaluator::eval_block_statement;
use crate::object::{MacroObject, Object, QuickReturn};

/// First half of the pre-pass: collect `let <name> = macro(...) {...};`
/// statements into the environment and strip them from the program.
pub fn define_macros(program: &mut Program, environment: &mut Environment) {
    let mut definitions = Vec::new();

    for (index, statement) in program.statements.iter().enumerate() {
        let Statement::Let(let_statement) = statement else {
            continue;
        };
        let Expression::MacroLiteral { parameters, body } = &let_statement.value else {
            continue;
        };

        let macro_object = MacroObject {
            parameters: parameters.clone(),
            body: body.clone(),
            env: environment.clone(),
        };
        environment.set(
            &let_statement.identifier.name,
            Gc::new(Object::Macro(macro_object)),
        );
        definitions.push(index);
    }

    // Remove definitions back to front so the indices stay valid
    for index in definitions.into_iter().rev() {
        program.statements.remove(index);
    }
}

/// Second half: rewrite every call whose callee names a defined macro.
/// The macro body runs with its parameters bound to the *unevaluated*
/// argument ASTs, each wrapped in a quote, and must itself produce a
/// quote; its carried AST replaces the call site.
pub fn expand_macros(
    program: Program,
    environment: &mut Environment,
    builtins: &Builtins,
) -> Program {
    modify::modify_program(program, &mut |expression| {
        let Some(macro_object) = macro_call(&expression, environment) else {
            return expression;
        };
        let Expression::CallExpression { arguments, .. } = &expression else {
            return expression;
        };

        let mut macro_environment = Environment::new_enclosed(macro_object.env.clone());
        for (parameter, argument) in macro_object.parameters.iter().zip(arguments.iter()) {
            macro_environment.set(&parameter.name, Object::quote(argument.clone()));
        }

        let result = eval_block_statement(&macro_object.body, &mut macro_environment, builtins);
        // A `return` unwraps at the macro boundary like at any call
        let object = match result {
            Ok(object) | Err(QuickReturn::Return(object)) => object,
            Err(QuickReturn::Error(_)) => {
                eprintln!("we only support returning AST-nodes from macros");
                return expression;
            }
        };
        match object.as_ref() {
            Object::Quote(quoted) => quoted.clone(),
            _ => {
                eprintln!("we only support returning AST-nodes from macros");
                expression
            }
        }
    })
}

fn macro_call(expression: &Expression, environment: &Environment) -> Option<MacroObject> {
    let Expression::CallExpression { function, .. } = expression else {
        return None;
    };
    let Expression::Identifier(identifier) = function.as_ref() else {
        return None;
    };
    match environment.get(&identifier.name)?.as_ref() {
        Object::Macro(macro_object) => Some(macro_object.clone()),
        _ => None,
    }
}

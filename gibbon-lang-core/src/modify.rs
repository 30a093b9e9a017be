//! Generic post-order AST rewriting. Children are transformed first and
//! replaced by the modifier's output, then the modifier runs on the
//! rebuilt node itself. Both the quote/unquote machinery and the macro
//! expander are built on top of this single recursion.

use crate::ast::{BlockStatement, Expression, LetStatement, Program, ReturnStatement, Statement};

pub fn modify_program<F>(program: Program, modifier: &mut F) -> Program
where
    F: FnMut(Expression) -> Expression,
{
    Program {
        statements: program
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, modifier))
            .collect(),
    }
}

pub fn modify_statement<F>(statement: Statement, modifier: &mut F) -> Statement
where
    F: FnMut(Expression) -> Expression,
{
    match statement {
        Statement::Let(LetStatement { identifier, value }) => Statement::Let(LetStatement {
            identifier,
            value: modify_expression(value, modifier),
        }),
        Statement::Return(ReturnStatement { value }) => Statement::Return(ReturnStatement {
            value: modify_expression(value, modifier),
        }),
        Statement::Expression(expression) => {
            Statement::Expression(modify_expression(expression, modifier))
        }
    }
}

pub fn modify_block_statement<F>(block: BlockStatement, modifier: &mut F) -> BlockStatement
where
    F: FnMut(Expression) -> Expression,
{
    BlockStatement {
        statements: block
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, modifier))
            .collect(),
    }
}

pub fn modify_expression<F>(expression: Expression, modifier: &mut F) -> Expression
where
    F: FnMut(Expression) -> Expression,
{
    let expression = match expression {
        Expression::PrefixOperation(kind, right) => {
            Expression::PrefixOperation(kind, Box::new(modify_expression(*right, modifier)))
        }
        Expression::InfixOperation(kind, left, right) => Expression::InfixOperation(
            kind,
            Box::new(modify_expression(*left, modifier)),
            Box::new(modify_expression(*right, modifier)),
        ),
        Expression::IndexExpression { left, index } => Expression::IndexExpression {
            left: Box::new(modify_expression(*left, modifier)),
            index: Box::new(modify_expression(*index, modifier)),
        },
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => Expression::IfExpression {
            condition: Box::new(modify_expression(*condition, modifier)),
            consequence: modify_block_statement(consequence, modifier),
            alternative: alternative.map(|block| modify_block_statement(block, modifier)),
        },
        Expression::ArrayLiteral(elements) => Expression::ArrayLiteral(
            elements
                .into_iter()
                .map(|element| modify_expression(element, modifier))
                .collect(),
        ),
        Expression::HashLiteral(pairs) => Expression::HashLiteral(
            pairs
                .into_iter()
                .map(|(key, value)| {
                    (
                        modify_expression(key, modifier),
                        modify_expression(value, modifier),
                    )
                })
                .collect(),
        ),
        Expression::FunctionLiteral { parameters, body } => Expression::FunctionLiteral {
            parameters,
            body: modify_block_statement(body, modifier),
        },
        Expression::MacroLiteral { parameters, body } => Expression::MacroLiteral {
            parameters,
            body: modify_block_statement(body, modifier),
        },
        Expression::CallExpression {
            function,
            arguments,
        } => Expression::CallExpression {
            function: Box::new(modify_expression(*function, modifier)),
            arguments: arguments
                .into_iter()
                .map(|argument| modify_expression(argument, modifier))
                .collect(),
        },
        // Identifiers and literals have no children
        other => other,
    };
    modifier(expression)
}

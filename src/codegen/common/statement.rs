use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
};

use super::{expression, subroutine_call, variable};

pub fn construct_statements(
    statements: &ast::JackStatements,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    statements
        .0
        .iter()
        .flat_map(|statement| construct(statement, class_context))
        .collect()
}

pub fn construct(
    statement: &ast::JackStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    match statement {
        ast::JackStatement::Let(statement) => construct_let(statement, class_context),
        ast::JackStatement::If(statement) => construct_if(statement, class_context),
        ast::JackStatement::While(statement) => construct_while(statement, class_context),
        ast::JackStatement::Do(statement) => construct_do(statement, class_context),
        ast::JackStatement::Return(statement) => construct_return(statement, class_context),
    }
}

fn construct_let(
    statement: &ast::JackLetStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    match &statement.index {
        Some(index) => variable::construct_array_write(
            &statement.target,
            index,
            &statement.value,
            class_context,
        ),
        None => [
            expression::construct(&statement.value, class_context),
            variable::construct_pop(&statement.target, class_context),
        ]
        .concat(),
    }
}

fn construct_if(
    statement: &ast::JackIfStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    let else_label = class_context.create_label("IF_ELSE");
    let end_label = class_context.create_label("IF_END");

    let condition = expression::construct(&statement.condition, class_context);
    let then_branch = construct_statements(&statement.then_branch, class_context);
    let else_branch = statement
        .else_branch
        .as_ref()
        .map(|statements| construct_statements(statements, class_context))
        .unwrap_or_default();

    [
        condition,
        vec![
            vm::command(vm::VMCommand::Not),
            vm::label(vm::LabelAction::IfGoto, else_label.clone()),
        ],
        then_branch,
        vec![
            vm::label(vm::LabelAction::Goto, end_label.clone()),
            vm::label(vm::LabelAction::Label, else_label),
        ],
        else_branch,
        vec![vm::label(vm::LabelAction::Label, end_label)],
    ]
    .concat()
}

fn construct_while(
    statement: &ast::JackWhileStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    let loop_label = class_context.create_label("WHILE_LOOP");
    let end_label = class_context.create_label("WHILE_END");

    [
        vec![vm::label(vm::LabelAction::Label, loop_label.clone())],
        expression::construct(&statement.condition, class_context),
        vec![
            vm::command(vm::VMCommand::Not),
            vm::label(vm::LabelAction::IfGoto, end_label.clone()),
        ],
        construct_statements(&statement.body, class_context),
        vec![
            vm::label(vm::LabelAction::Goto, loop_label),
            vm::label(vm::LabelAction::Label, end_label),
        ],
    ]
    .concat()
}

fn construct_do(
    statement: &ast::JackDoStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    [
        subroutine_call::construct(&statement.call, class_context),
        // every call returns a value, `do` ignores it
        vec![vm::pop(vm::Segment::Temp, 0)],
    ]
    .concat()
}

fn construct_return(
    statement: &ast::JackReturnStatement,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    let value = match &statement.value {
        Some(value) => expression::construct(value, class_context),
        None => vec![vm::push(vm::Segment::Constant, 0)],
    };

    [value, vec![vm::vm_return()]].concat()
}

#[cfg(test)]
mod tests {
    use crate::symbol_table::SymbolKind;

    use super::*;

    fn context() -> ClassContext {
        let mut class_context = ClassContext::new(String::from("Test"));
        class_context
            .subroutine_symbols
            .define("x", "boolean", SymbolKind::Argument);
        class_context
            .subroutine_symbols
            .define("y", "int", SymbolKind::Local);
        class_context
    }

    fn variable(name: &str) -> ast::JackExpression {
        ast::JackExpression::term(ast::JackTerm::Variable(ast::JackIdentifier::internal(name)))
    }

    fn integer(value: usize) -> ast::JackExpression {
        ast::JackExpression::term(ast::JackTerm::IntegerConstant(value.into()))
    }

    fn assign(target: &str, value: ast::JackExpression) -> ast::JackStatement {
        ast::JackStatement::Let(ast::JackLetStatement {
            target: ast::JackIdentifier::internal(target),
            index: None,
            value,
        })
    }

    fn compile(statements: Vec<ast::JackStatement>, class_context: &mut ClassContext) -> String {
        vm::VMInstructionBlock::from(construct_statements(
            &ast::JackStatements(statements),
            class_context,
        ))
        .compile()
    }

    #[test]
    fn test_let() {
        let mut class_context = context();

        assert_eq!(
            compile(vec![assign("y", integer(3))], &mut class_context),
            ["push constant 3", "pop local 0"].join("\n")
        );
    }

    #[test]
    fn test_if_without_else() {
        let mut class_context = context();

        // if (x) { let y = 1; }
        let statement = ast::JackStatement::If(ast::JackIfStatement {
            condition: variable("x"),
            then_branch: ast::JackStatements(vec![assign("y", integer(1))]),
            else_branch: None,
        });

        let expected = [
            "push argument 0",
            "not",
            "if-goto IF_ELSE_1",
            "push constant 1",
            "pop local 0",
            "goto IF_END_2",
            "label IF_ELSE_1",
            "label IF_END_2",
        ]
        .join("\n");

        assert_eq!(compile(vec![statement], &mut class_context), expected);
    }

    #[test]
    fn test_if_with_else() {
        let mut class_context = context();

        let statement = ast::JackStatement::If(ast::JackIfStatement {
            condition: variable("x"),
            then_branch: ast::JackStatements(vec![assign("y", integer(1))]),
            else_branch: Some(ast::JackStatements(vec![assign("y", integer(2))])),
        });

        let expected = [
            "push argument 0",
            "not",
            "if-goto IF_ELSE_1",
            "push constant 1",
            "pop local 0",
            "goto IF_END_2",
            "label IF_ELSE_1",
            "push constant 2",
            "pop local 0",
            "label IF_END_2",
        ]
        .join("\n");

        assert_eq!(compile(vec![statement], &mut class_context), expected);
    }

    #[test]
    fn test_while() {
        let mut class_context = context();

        // while (x) { let y = y + 1; }
        let statement = ast::JackStatement::While(ast::JackWhileStatement {
            condition: variable("x"),
            body: ast::JackStatements(vec![assign(
                "y",
                ast::JackExpression {
                    first: ast::JackTerm::Variable(ast::JackIdentifier::internal("y")),
                    rest: vec![(
                        ast::JackBinaryOperator::Add,
                        ast::JackTerm::IntegerConstant(1.into()),
                    )],
                },
            )]),
        });

        let expected = [
            "label WHILE_LOOP_1",
            "push argument 0",
            "not",
            "if-goto WHILE_END_2",
            "push local 0",
            "push constant 1",
            "add",
            "pop local 0",
            "goto WHILE_LOOP_1",
            "label WHILE_END_2",
        ]
        .join("\n");

        assert_eq!(compile(vec![statement], &mut class_context), expected);
    }

    #[test]
    fn test_nested_labels_are_unique() {
        let mut class_context = context();

        let inner_if = |else_branch| {
            ast::JackStatement::If(ast::JackIfStatement {
                condition: variable("x"),
                then_branch: ast::JackStatements(vec![]),
                else_branch,
            })
        };

        let statements = vec![
            ast::JackStatement::While(ast::JackWhileStatement {
                condition: variable("x"),
                body: ast::JackStatements(vec![
                    inner_if(None),
                    inner_if(Some(ast::JackStatements(vec![inner_if(None)]))),
                ]),
            }),
            inner_if(None),
        ];

        let output = compile(statements, &mut class_context);
        let labels: Vec<_> = output
            .lines()
            .filter(|line| line.starts_with("label "))
            .collect();

        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();

        assert_eq!(labels.len(), 10);
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn test_do_discards_return_value() {
        let mut class_context = context();

        let statement = ast::JackStatement::Do(ast::JackDoStatement {
            call: ast::JackSubroutineCall {
                receiver: Some(ast::JackIdentifier::internal("Output")),
                name: ast::JackIdentifier::internal("printInt"),
                arguments: ast::JackExpressionList(vec![variable("y")]),
            },
        });

        let expected = ["push local 0", "call Output.printInt 1", "pop temp 0"].join("\n");

        assert_eq!(compile(vec![statement], &mut class_context), expected);
    }

    #[test]
    fn test_return() {
        let mut class_context = context();

        let statements = vec![
            ast::JackStatement::Return(ast::JackReturnStatement { value: None }),
            ast::JackStatement::Return(ast::JackReturnStatement {
                value: Some(variable("y")),
            }),
        ];

        let expected = ["push constant 0", "return", "push local 0", "return"].join("\n");

        assert_eq!(compile(statements, &mut class_context), expected);
    }
}

use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
};

use super::term;

/// Lower an expression in post-order: operands left to right,
/// each operator right after its right-hand operand.
pub fn construct(
    expression: &ast::JackExpression,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    let mut instructions = term::construct(&expression.first, class_context);

    for (operator, operand) in &expression.rest {
        instructions.extend(term::construct(operand, class_context));
        instructions.push(binary_operator(*operator));
    }

    instructions
}

/// Lower every expression of a list, returning the instructions
/// and the number of values they leave on the stack.
pub fn construct_list(
    expressions: &ast::JackExpressionList,
    class_context: &mut ClassContext,
) -> (Vec<vm::VMInstruction>, usize) {
    let instructions = expressions
        .0
        .iter()
        .flat_map(|expression| construct(expression, class_context))
        .collect();

    (instructions, expressions.0.len())
}

fn binary_operator(operator: ast::JackBinaryOperator) -> vm::VMInstruction {
    use ast::JackBinaryOperator as Op;

    match operator {
        Op::Add => vm::command(vm::VMCommand::Add),
        Op::Sub => vm::command(vm::VMCommand::Sub),
        // no VM instruction for these, the OS provides them
        Op::Mult => vm::call("Math.multiply", 2),
        Op::Div => vm::call("Math.divide", 2),
        Op::And => vm::command(vm::VMCommand::And),
        Op::Or => vm::command(vm::VMCommand::Or),
        Op::Lt => vm::command(vm::VMCommand::Lt),
        Op::Gt => vm::command(vm::VMCommand::Gt),
        Op::Eq => vm::command(vm::VMCommand::Eq),
    }
}

pub const fn unary_operator(operator: ast::JackUnaryOperator) -> vm::VMInstruction {
    match operator {
        ast::JackUnaryOperator::Neg => vm::command(vm::VMCommand::Neg),
        ast::JackUnaryOperator::Not => vm::command(vm::VMCommand::Not),
    }
}

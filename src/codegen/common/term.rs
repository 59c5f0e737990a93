use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
};

use super::{expression, literal, subroutine_call, variable};

pub fn construct(term: &ast::JackTerm, class_context: &mut ClassContext) -> Vec<vm::VMInstruction> {
    match term {
        ast::JackTerm::IntegerConstant(integer) => literal::construct_integer(integer.0),
        ast::JackTerm::StringConstant(s) => literal::construct_string(s),
        ast::JackTerm::KeywordConstant(keyword) => literal::construct_keyword(*keyword),
        ast::JackTerm::Variable(name) => variable::construct_push(name, class_context),
        ast::JackTerm::ArrayAccess(name, index) => {
            variable::construct_array_read(name, index, class_context)
        }
        ast::JackTerm::SubroutineCall(call) => subroutine_call::construct(call, class_context),
        ast::JackTerm::Parenthesized(inner) => expression::construct(inner, class_context),
        ast::JackTerm::Unary(operator, operand) => [
            construct(operand, class_context),
            vec![expression::unary_operator(*operator)],
        ]
        .concat(),
    }
}

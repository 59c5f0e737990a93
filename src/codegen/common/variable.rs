use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
};

use super::expression;

/// Push the value of a named variable.
///
/// Names are not checked: an unknown name is reported
/// and read as `0` so compilation can carry on.
pub fn construct_push(
    variable: &ast::JackIdentifier,
    class_context: &ClassContext,
) -> Vec<vm::VMInstruction> {
    match class_context.resolve(&variable.0) {
        Some(entry) => vec![vm::push(entry.kind.into(), entry.index)],
        None => {
            log::warn!(
                "`{variable}` is not declared in `{}`, reading it as 0",
                class_context.class_name
            );
            vec![vm::push(vm::Segment::Constant, 0)]
        }
    }
}

/// Pop the top of the stack into a named variable.
///
/// Assigning to an unknown name discards the value.
pub fn construct_pop(
    variable: &ast::JackIdentifier,
    class_context: &ClassContext,
) -> Vec<vm::VMInstruction> {
    match class_context.resolve(&variable.0) {
        Some(entry) => vec![vm::pop(entry.kind.into(), entry.index)],
        None => {
            log::warn!(
                "`{variable}` is not declared in `{}`, discarding the assigned value",
                class_context.class_name
            );
            vec![vm::pop(vm::Segment::Temp, 0)]
        }
    }
}

/// `array[index]` as a value.
pub fn construct_array_read(
    array: &ast::JackIdentifier,
    index: &ast::JackExpression,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    [
        construct_push(array, class_context),
        expression::construct(index, class_context),
        vec![
            vm::command(vm::VMCommand::Add),
            vm::pop(vm::Segment::Pointer, 1),
            vm::push(vm::Segment::That, 0),
        ],
    ]
    .concat()
}

/// `let array[index] = value;`
///
/// The element address stays on the stack while `value` is evaluated,
/// since `value` may itself move `pointer 1` (e.g. by reading another array).
pub fn construct_array_write(
    array: &ast::JackIdentifier,
    index: &ast::JackExpression,
    value: &ast::JackExpression,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    [
        construct_push(array, class_context),
        expression::construct(index, class_context),
        vec![vm::command(vm::VMCommand::Add)],
        expression::construct(value, class_context),
        vec![
            vm::pop(vm::Segment::Temp, 0),
            vm::pop(vm::Segment::Pointer, 1),
            vm::push(vm::Segment::Temp, 0),
            vm::pop(vm::Segment::That, 0),
        ],
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use crate::symbol_table::SymbolKind;

    use super::*;

    fn context() -> ClassContext {
        let mut class_context = ClassContext::new(String::from("Test"));
        class_context
            .class_symbols
            .define("a", "Array", SymbolKind::Static);
        class_context
            .subroutine_symbols
            .define("b", "Array", SymbolKind::Local);
        class_context
            .subroutine_symbols
            .define("i", "int", SymbolKind::Argument);
        class_context
    }

    fn variable(name: &str) -> ast::JackExpression {
        ast::JackExpression::term(ast::JackTerm::Variable(ast::JackIdentifier::internal(name)))
    }

    #[test]
    fn test_push_and_pop() {
        let class_context = context();
        let a = ast::JackIdentifier::internal("a");

        assert_eq!(construct_push(&a, &class_context), vec![vm::push(vm::Segment::Static, 0)]);
        assert_eq!(construct_pop(&a, &class_context), vec![vm::pop(vm::Segment::Static, 0)]);
    }

    #[test]
    fn test_unknown_variable_fallback() {
        let class_context = context();
        let unknown = ast::JackIdentifier::internal("nope");

        assert_eq!(
            construct_push(&unknown, &class_context),
            vec![vm::push(vm::Segment::Constant, 0)]
        );
        assert_eq!(
            construct_pop(&unknown, &class_context),
            vec![vm::pop(vm::Segment::Temp, 0)]
        );
    }

    #[test]
    fn test_array_read() {
        let mut class_context = context();

        let expected = [
            "push static 0",
            "push argument 0",
            "add",
            "pop pointer 1",
            "push that 0",
        ]
        .join("\n");

        let instructions = construct_array_read(
            &ast::JackIdentifier::internal("a"),
            &variable("i"),
            &mut class_context,
        );

        assert_eq!(vm::VMInstructionBlock::from(instructions).compile(), expected);
    }

    #[test]
    fn test_array_write_evaluates_value_after_address() {
        let mut class_context = context();

        // let a[i] = b[i];
        let value = ast::JackExpression::term(ast::JackTerm::ArrayAccess(
            ast::JackIdentifier::internal("b"),
            Box::new(variable("i")),
        ));

        let expected = [
            // target address
            "push static 0",
            "push argument 0",
            "add",
            // value, which moves `that`
            "push local 0",
            "push argument 0",
            "add",
            "pop pointer 1",
            "push that 0",
            // store
            "pop temp 0",
            "pop pointer 1",
            "push temp 0",
            "pop that 0",
        ]
        .join("\n");

        let instructions = construct_array_write(
            &ast::JackIdentifier::internal("a"),
            &variable("i"),
            &value,
            &mut class_context,
        );

        assert_eq!(vm::VMInstructionBlock::from(instructions).compile(), expected);
    }
}

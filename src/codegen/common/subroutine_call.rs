use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
    symbol_table::SymbolEntry,
};

use super::expression;

#[derive(Debug, PartialEq, Eq)]
enum CallKind {
    /// `variable.name(...)`: method of the variable's declared class,
    /// with the variable's value as the receiver.
    VariableMethod(SymbolEntry),
    /// `ClassName.name(...)`: function or constructor, no receiver.
    Function(String),
    /// `name(...)`: method of the current object.
    OwnMethod,
}

fn determine_call_kind(call: &ast::JackSubroutineCall, class_context: &ClassContext) -> CallKind {
    match &call.receiver {
        // a receiver that is not a known variable is taken to be a class name
        Some(receiver) => class_context.resolve(&receiver.0).cloned().map_or_else(
            || CallKind::Function(receiver.0.clone()),
            CallKind::VariableMethod,
        ),
        None => CallKind::OwnMethod,
    }
}

/// Lower a call, leaving the callee's return value on the stack.
///
/// The callee is not checked to exist; that is left to the VM.
pub fn construct(
    call: &ast::JackSubroutineCall,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    let (receiver_instructions, class_name) = match determine_call_kind(call, class_context) {
        CallKind::VariableMethod(entry) => (
            vec![vm::push(entry.kind.into(), entry.index)],
            entry.symbol_type,
        ),
        CallKind::Function(class_name) => (Vec::new(), class_name),
        CallKind::OwnMethod => (
            vec![vm::push(vm::Segment::Pointer, 0)],
            class_context.class_name.clone(),
        ),
    };

    let (argument_instructions, argument_count) =
        expression::construct_list(&call.arguments, class_context);

    let receiver_count = receiver_instructions.len();

    [
        receiver_instructions,
        argument_instructions,
        vec![vm::call(
            format!("{class_name}.{}", call.name),
            receiver_count + argument_count,
        )],
    ]
    .concat()
}

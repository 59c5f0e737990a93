use crate::{
    codegen::{context::ClassContext, vm},
    common::ast,
    symbol_table::SymbolKind,
};

use super::common::statement;

pub fn construct(
    subroutine: &ast::JackSubroutineDec,
    class_context: &mut ClassContext,
) -> Vec<vm::VMInstruction> {
    class_context.enter_subroutine();

    if subroutine.kind == ast::JackSubroutineKind::Method {
        // the receiver comes before the declared parameters
        let class_name = class_context.class_name.clone();
        class_context
            .subroutine_symbols
            .define("this", &class_name, SymbolKind::Argument);
    }

    for parameter in &subroutine.parameters.0 {
        class_context.subroutine_symbols.define(
            &parameter.name.0,
            &parameter.var_type.to_string(),
            SymbolKind::Argument,
        );
    }

    for declaration in &subroutine.body.variables {
        let var_type = declaration.var_type.to_string();

        for name in &declaration.names {
            class_context
                .subroutine_symbols
                .define(&name.0, &var_type, SymbolKind::Local);
        }
    }

    let function_name = format!("{}.{}", class_context.class_name, subroutine.name);
    let local_count = class_context.subroutine_symbols.var_count(SymbolKind::Local);

    log::debug!(
        "Compiling {} `{function_name}` with {local_count} local(s)",
        subroutine.kind
    );

    [
        vec![vm::function(function_name, local_count)],
        construct_prologue(subroutine.kind, class_context),
        statement::construct_statements(&subroutine.body.statements, class_context),
    ]
    .concat()
}

/// Set up `pointer 0` for subroutines that work on an object.
fn construct_prologue(
    kind: ast::JackSubroutineKind,
    class_context: &ClassContext,
) -> Vec<vm::VMInstruction> {
    match kind {
        ast::JackSubroutineKind::Constructor => {
            let field_count = class_context.class_symbols.var_count(SymbolKind::Field);

            vec![
                vm::push(vm::Segment::Constant, field_count),
                vm::call("Memory.alloc", 1),
                vm::pop(vm::Segment::Pointer, 0),
            ]
        }
        ast::JackSubroutineKind::Method => vec![
            vm::push(vm::Segment::Argument, 0),
            vm::pop(vm::Segment::Pointer, 0),
        ],
        ast::JackSubroutineKind::Function => Vec::new(),
    }
}

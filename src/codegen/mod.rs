//! Logic for converting a parsed Jack class (_AST_)
//! to Hack VM instructions.

use context::ClassContext;

use crate::common::ast;

mod class_variables;
mod common;
pub mod context;
mod subroutines;
pub mod vm;

/// Compile one class into a VM module.
///
/// Members are handled in source order, so a field declared
/// after a constructor is not counted in its allocation.
pub fn construct_class(class: &ast::JackClass) -> vm::VMModule {
    let mut class_context = ClassContext::new(class.name.0.clone());

    for member in &class.members {
        match member {
            ast::JackClassMember::Variable(declaration) => {
                class_variables::construct(declaration, &mut class_context);
            }
            ast::JackClassMember::Subroutine(subroutine) => {
                let instructions = subroutines::construct(subroutine, &mut class_context);
                class_context.output.add_subroutine(instructions.into());
            }
        }
    }

    log::trace!("Generated code for class `{}`", class_context.class_name);

    class_context.output
}

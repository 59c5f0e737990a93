use crate::{codegen::context::ClassContext, common::ast, symbol_table::SymbolKind};

/// Register `static` and `field` declarations in the class scope.
///
/// Declarations emit no code: statics live in the `static` segment
/// of the class and fields are laid out by the constructor.
pub fn construct(declaration: &ast::JackClassVarDec, class_context: &mut ClassContext) {
    let kind = match declaration.kind {
        ast::JackClassVarKind::Static => SymbolKind::Static,
        ast::JackClassVarKind::Field => SymbolKind::Field,
    };
    let var_type = declaration.var_type.to_string();

    for name in &declaration.names {
        class_context.class_symbols.define(&name.0, &var_type, kind);
    }
}

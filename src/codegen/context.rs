use crate::symbol_table::{SymbolEntry, SymbolTable};

use super::vm;

/// Context information regarding the class currently being compiled.
#[derive(Debug)]
pub struct ClassContext {
    pub class_name: String,
    /// `static` and `field` variables, kept for the whole class.
    pub class_symbols: SymbolTable,
    /// Arguments and locals, reset for every subroutine.
    pub subroutine_symbols: SymbolTable,
    pub output: vm::VMModule,
    label_counter: usize,
}

impl ClassContext {
    pub fn new(class_name: String) -> Self {
        Self {
            class_name,
            class_symbols: SymbolTable::new(),
            subroutine_symbols: SymbolTable::new(),
            output: vm::VMModule::new(),
            label_counter: 0,
        }
    }

    /// Start a new subroutine scope.
    pub fn enter_subroutine(&mut self) {
        self.subroutine_symbols.reset();
    }

    /// Look a variable up in the subroutine scope first, then in the class scope,
    /// so arguments and locals shadow fields and statics of the same name.
    pub fn resolve(&self, name: &str) -> Option<&SymbolEntry> {
        self.subroutine_symbols
            .get(name)
            .or_else(|| self.class_symbols.get(name))
    }

    /// Create a label that is unique within the class.
    pub fn create_label(&mut self, prefix: &str) -> String {
        self.label_counter += 1;

        let label = format!("{prefix}_{}", self.label_counter);
        log::debug!("Created label `{label}` in class `{}`", self.class_name);

        label
    }
}

//! Name resolution tables.
//!
//! A class is compiled with two independent tables: one for the class
//! scope (`static` and `field` variables) which lives for the whole class,
//! and one for the subroutine scope (arguments and locals) which is reset
//! at the start of every subroutine.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    Static,
    Field,
    Argument,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol_type: String,
    pub kind: SymbolKind,
    pub index: usize,
}

type Name = String;

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<Name, SymbolEntry>,
    counts: HashMap<SymbolKind, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all entries and per-kind counters.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.counts.clear();
    }

    /// Define a new name, giving it the next free index of its kind.
    ///
    /// Redefining an existing name replaces its entry.
    pub fn define(&mut self, name: &str, symbol_type: &str, kind: SymbolKind) -> SymbolEntry {
        let index = self.next_index(kind);

        let entry = SymbolEntry {
            symbol_type: symbol_type.to_owned(),
            kind,
            index,
        };

        if let Some(previous) = self.entries.insert(name.to_owned(), entry.clone()) {
            log::warn!(
                "`{name}` redeclared as {kind} {index}, replacing {} {}",
                previous.kind,
                previous.index
            );
        }

        entry
    }

    /// Gets current index of a kind and increases it for future definitions.
    fn next_index(&mut self, kind: SymbolKind) -> usize {
        let count = self.counts.entry(kind).or_default();
        let index = *count;
        *count += 1;

        index
    }

    /// Number of definitions of the given kind since the last reset.
    pub fn var_count(&self, kind: SymbolKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        self.get(name).map(|entry| entry.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.symbol_type.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|entry| entry.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_assigned_per_kind() {
        let mut table = SymbolTable::new();

        assert_eq!(table.define("x", "int", SymbolKind::Field).index, 0);
        assert_eq!(table.define("count", "int", SymbolKind::Static).index, 0);
        assert_eq!(table.define("y", "int", SymbolKind::Field).index, 1);
        assert_eq!(table.define("next", "Node", SymbolKind::Field).index, 2);

        assert_eq!(table.var_count(SymbolKind::Field), 3);
        assert_eq!(table.var_count(SymbolKind::Static), 1);
        assert_eq!(table.var_count(SymbolKind::Local), 0);

        assert_eq!(table.kind_of("next"), Some(SymbolKind::Field));
        assert_eq!(table.type_of("next"), Some("Node"));
        assert_eq!(table.index_of("next"), Some(2));
    }

    #[test]
    fn test_absent_name() {
        let table = SymbolTable::new();

        assert!(table.get("missing").is_none());
        assert_eq!(table.kind_of("missing"), None);
        assert_eq!(table.type_of("missing"), None);
        assert_eq!(table.index_of("missing"), None);
    }

    #[test]
    fn test_redefinition_overwrites() {
        let mut table = SymbolTable::new();

        table.define("a", "int", SymbolKind::Local);
        table.define("a", "boolean", SymbolKind::Local);

        assert_eq!(
            table.get("a"),
            Some(&SymbolEntry {
                symbol_type: String::from("boolean"),
                kind: SymbolKind::Local,
                index: 1,
            })
        );
        // every definition counts
        assert_eq!(table.var_count(SymbolKind::Local), 2);
    }

    #[test]
    fn test_reset() {
        let mut table = SymbolTable::new();

        table.define("a", "int", SymbolKind::Argument);
        table.define("b", "int", SymbolKind::Local);
        table.reset();

        assert!(table.get("a").is_none());
        assert_eq!(table.var_count(SymbolKind::Argument), 0);
        assert_eq!(table.var_count(SymbolKind::Local), 0);

        // counters start over after a reset
        assert_eq!(table.define("c", "int", SymbolKind::Argument).index, 0);
    }
}

//! Lookup of reusable symbols by identity

use std::collections::HashMap;

use crate::document::RawNode;

/// Every symbol, symbol descendant and state variant, keyed by identity
///
/// Built once per artboard from the resource dictionary and read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, RawNode>,
}

impl SymbolTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the resource dictionary's symbols
    pub fn from_symbols(symbols: &[RawNode]) -> Self {
        let mut table = Self::new();
        for symbol in symbols {
            table.register(symbol);
        }
        table
    }

    /// Register a node, its children and its state variants
    ///
    /// A later registration under the same identity replaces the earlier one.
    /// Nodes without an identity cannot be referenced and are not stored,
    /// though their descendants are.
    pub fn register(&mut self, node: &RawNode) {
        if node.has_identity() {
            self.symbols.insert(node.key().to_string(), node.clone());
        }
        for child in node.children() {
            self.register(child);
        }
        for state in node.states() {
            self.register(state);
        }
    }

    /// Get a symbol by identity
    pub fn get(&self, id: &str) -> Option<&RawNode> {
        self.symbols.get(id)
    }

    /// Check if a symbol exists
    pub fn contains(&self, id: &str) -> bool {
        self.symbols.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

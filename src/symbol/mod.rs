//! Symbol system for reusable subtrees
//!
//! Symbols are collected into a [`SymbolTable`] once per artboard; the
//! [`SymbolResolver`] then replaces every symbol reference with a merged
//! concrete node and runs the caller's [`RewriteHook`]s over the result.

mod resolver;
mod table;

pub use resolver::{resolve_symbols, ResolveError, RewriteHook, SymbolResolver};
pub use table::SymbolTable;

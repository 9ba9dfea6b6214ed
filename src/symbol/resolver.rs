//! Symbol resolution - rewrites symbol references into concrete nodes

use thiserror::Error;

use crate::document::{NodeKind, RawNode, ResolvedNode};

use super::table::SymbolTable;

/// Errors that can occur during symbol resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The referenced symbol is not in the table
    #[error("unresolved symbol reference '{source_id}' on node '{name}' (id: {id})")]
    UnresolvedReference {
        name: String,
        id: String,
        source_id: String,
    },

    /// A chain of symbols that reference each other
    #[error("circular symbol reference detected: {chain}")]
    CircularReference { chain: String },
}

/// A caller-supplied rewrite applied to every node during resolution
///
/// Returning `None` drops the node and its whole subtree.
pub trait RewriteHook: Send + Sync {
    fn rewrite(&self, node: RawNode) -> Option<RawNode>;
}

impl<F> RewriteHook for F
where
    F: Fn(RawNode) -> Option<RawNode> + Send + Sync,
{
    fn rewrite(&self, node: RawNode) -> Option<RawNode> {
        self(node)
    }
}

/// Resolves one artboard's node tree against a symbol table
pub struct SymbolResolver<'a> {
    table: &'a SymbolTable,
    hooks: &'a [Box<dyn RewriteHook>],
    /// Counter for synthetic identities of nodes that carry none
    anonymous: usize,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(table: &'a SymbolTable, hooks: &'a [Box<dyn RewriteHook>]) -> Self {
        Self {
            table,
            hooks,
            anonymous: 0,
        }
    }

    /// Resolve sibling nodes, omitting dropped ones and keeping order
    pub fn resolve_all(&mut self, nodes: &[RawNode]) -> Result<Vec<ResolvedNode>, ResolveError> {
        let mut resolved = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(node) = self.resolve(node)? {
                resolved.push(node);
            }
        }
        Ok(resolved)
    }

    /// Resolve one node and its subtree; `None` when a hook dropped it
    pub fn resolve(&mut self, node: &RawNode) -> Result<Option<ResolvedNode>, ResolveError> {
        let mut resolved = self.dereference(node)?;

        if !resolved.has_identity() {
            resolved.guid = Some(format!("anon-{}", self.anonymous));
            self.anonymous += 1;
        }

        for hook in self.hooks {
            match hook.rewrite(resolved) {
                Some(next) => resolved = next,
                None => {
                    log::debug!(
                        "rewrite hook dropped '{}' (id: {})",
                        node.simple_name(),
                        node.key()
                    );
                    return Ok(None);
                }
            }
        }

        if resolved.is_group() {
            let children = self.resolve_all(resolved.children())?;
            resolved.set_children(children);
        }

        Ok(Some(resolved))
    }

    /// Follow symbol references until a concrete kind is reached
    fn dereference(&self, node: &RawNode) -> Result<RawNode, ResolveError> {
        let mut merged = node.clone();
        let mut source = node.sync_source_guid.clone();
        let mut chain: Vec<String> = Vec::new();

        while merged.kind == NodeKind::SymbolReference {
            let source_id = source.take().unwrap_or_default();
            if source_id.is_empty() {
                return Err(ResolveError::UnresolvedReference {
                    name: node.simple_name().to_string(),
                    id: node.key().to_string(),
                    source_id,
                });
            }
            if chain.contains(&source_id) {
                chain.push(source_id);
                return Err(ResolveError::CircularReference {
                    chain: chain.join(" -> "),
                });
            }

            let symbol =
                self.table
                    .get(&source_id)
                    .ok_or_else(|| ResolveError::UnresolvedReference {
                        name: node.simple_name().to_string(),
                        id: node.key().to_string(),
                        source_id: source_id.clone(),
                    })?;

            merged = RawNode::merge_over(&merged, symbol);
            source = symbol.sync_source_guid.clone();
            chain.push(source_id);
        }

        Ok(merged)
    }
}

/// Resolve an artboard's top-level nodes against `table`
pub fn resolve_symbols(
    nodes: &[RawNode],
    table: &SymbolTable,
    hooks: &[Box<dyn RewriteHook>],
) -> Result<Vec<ResolvedNode>, ResolveError> {
    SymbolResolver::new(table, hooks).resolve_all(nodes)
}

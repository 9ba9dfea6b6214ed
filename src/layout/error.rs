//! Error types for the size and emission passes

use std::fmt;

use thiserror::Error;

use crate::document::{NodeKind, RawNode};

/// Which tree pass raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Size,
    Emission,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Size => write!(f, "size"),
            Pass::Emission => write!(f, "emission"),
        }
    }
}

/// Errors that can occur while sizing or emitting a resolved tree
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No object rule matched and the node is not a group
    #[error("unknown node kind {kind:?} for '{name}' (id: {id}) during {pass} pass")]
    UnknownNodeKind {
        name: String,
        id: String,
        kind: NodeKind,
        pass: Pass,
    },

    /// A node reached emission without a computed rect
    #[error("no size computed for '{name}' (id: {id})")]
    MissingSize { name: String, id: String },

    /// A repeat grid without a template cell and item
    #[error("repeat grid '{name}' (id: {id}) has no template item")]
    MalformedRepeatGrid { name: String, id: String },

    /// More than one child of a scroll container is tagged as spacer
    #[error("scroll container '{name}' (id: {id}) has {spacers} spacer children")]
    MultipleSpacers {
        name: String,
        id: String,
        spacers: usize,
    },
}

impl LayoutError {
    pub fn unknown_kind(node: &RawNode, pass: Pass) -> Self {
        Self::UnknownNodeKind {
            name: node.simple_name().to_string(),
            id: node.key().to_string(),
            kind: node.kind,
            pass,
        }
    }

    pub fn missing_size(node: &RawNode) -> Self {
        Self::MissingSize {
            name: node.simple_name().to_string(),
            id: node.key().to_string(),
        }
    }

    pub fn malformed_grid(node: &RawNode) -> Self {
        Self::MalformedRepeatGrid {
            name: node.simple_name().to_string(),
            id: node.key().to_string(),
        }
    }

    pub fn multiple_spacers(node: &RawNode, spacers: usize) -> Self {
        Self::MultipleSpacers {
            name: node.simple_name().to_string(),
            id: node.key().to_string(),
            spacers,
        }
    }
}

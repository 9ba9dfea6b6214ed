//! XD Layout - converts design-tool artboards into normalized layout documents
//!
//! An artboard's node tree goes through three passes: symbol references are
//! resolved into concrete nodes, every node is sized bottom-up, and the tree
//! is emitted top-down as a flat map of [`Element`]s plus the sprite
//! [`Asset`]s they reference. Both passes are driven by ordered rule chains
//! that callers can extend through [`RuleSet::builder`].
//!
//! # Example
//!
//! ```rust
//! use xd_layout::{import_file, DesignFile, ImportConfig, RuleSet};
//!
//! let file = DesignFile::from_json_str(r#"{
//!     "artboards": [{
//!         "name": "Home",
//!         "geometry": { "width": 100, "height": 100 },
//!         "children": [{
//!             "id": "bg", "name": "Background", "type": "rect",
//!             "shape": { "type": "rect", "width": 100, "height": 100 }
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let config = ImportConfig::default();
//! let docs = import_file(&file, &RuleSet::builtin(&config), &config).unwrap();
//! assert_eq!(docs[0].elements.len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod output;
pub mod rules;
pub mod symbol;

pub use config::{ImportConfig, SpacerPolicy, SpacingPolicy, TextMetrics};
pub use document::{Artboard, DesignFile, RawNode, ResolvedNode, Resources};
pub use error::{ConfigError, DocumentError};
pub use layout::{LayoutError, Point, Size};
pub use output::{
    Asset, AssetLoader, Component, Element, ElementId, LayoutDocument, SCHEMA_VERSION,
};
pub use rules::{GroupRule, ObjectRule, RuleSet, RuleSetBuilder};
pub use symbol::{ResolveError, RewriteHook, SymbolTable};

use thiserror::Error;

use output::DocumentMeta;

/// Errors that can occur during the import pipeline
#[derive(Debug, Error)]
pub enum ImportError {
    /// Error during symbol resolution
    #[error("symbol resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Error during the size or emission pass
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// The raw artboard could not be serialized for hashing
    #[error("failed to hash artboard: {0}")]
    Hash(#[from] serde_json::Error),

    /// Any of the above, tagged with the artboard it came from
    #[error("artboard '{artboard}': {source}")]
    Artboard {
        artboard: String,
        #[source]
        source: Box<ImportError>,
    },
}

impl ImportError {
    fn in_artboard(self, artboard: &str) -> Self {
        ImportError::Artboard {
            artboard: artboard.to_string(),
            source: Box::new(self),
        }
    }
}

/// Import one artboard
///
/// Returns `Ok(None)` when the artboard has nothing to export: no children,
/// every child dropped by a rewrite hook, or not marked for export while
/// the config requires it.
pub fn import_artboard(
    artboard: &Artboard,
    resources: &Resources,
    rules: &RuleSet,
    config: &ImportConfig,
) -> Result<Option<LayoutDocument>, ImportError> {
    if config.require_marked_for_export && !artboard.is_marked_for_export() {
        log::info!("skipping artboard '{}': not marked for export", artboard.name);
        return Ok(None);
    }
    if artboard.children.is_empty() {
        log::info!("skipping artboard '{}': no children", artboard.name);
        return Ok(None);
    }

    log::info!("importing artboard '{}'", artboard.name);

    let table = SymbolTable::from_symbols(&resources.symbols);
    let resolved = symbol::resolve_symbols(&artboard.children, &table, rules.hooks())?;
    if resolved.is_empty() {
        log::info!(
            "skipping artboard '{}': every child was dropped",
            artboard.name
        );
        return Ok(None);
    }

    let geometry = artboard.geometry;
    let sizes = layout::compute_sizes(&resolved, geometry.recenter_offset(), rules)?;
    let emission = layout::emit_artboard(&artboard.name, geometry.size(), &resolved, &sizes, rules)?;
    let hash = output::content_hash(artboard)?;

    log::info!(
        "imported artboard '{}': {} elements, {} assets",
        artboard.name,
        emission.elements.len(),
        emission.assets.len()
    );

    Ok(Some(LayoutDocument {
        meta: DocumentMeta {
            version: SCHEMA_VERSION.to_string(),
            source: config.source_tag.clone(),
        },
        name: artboard.name.clone(),
        hash,
        root: layout::ROOT_ID,
        elements: emission.elements,
        assets: emission.assets,
    }))
}

/// Import every artboard of a design file, in file order
///
/// Each artboard gets its own symbol table, size table and identity
/// counter; skipped artboards produce no document. The first failure stops
/// the batch and names the artboard it came from.
pub fn import_file(
    file: &DesignFile,
    rules: &RuleSet,
    config: &ImportConfig,
) -> Result<Vec<LayoutDocument>, ImportError> {
    let mut documents = Vec::new();
    for artboard in &file.artboards {
        let document = import_artboard(artboard, &file.resources, rules, config)
            .map_err(|e| e.in_artboard(&artboard.name))?;
        documents.extend(document);
    }
    Ok(documents)
}

//! Typed model of the design tool's export
//!
//! A [`DesignFile`] holds the artboards to import and the symbol registry
//! they reference. Nodes keep every field optional so that symbol
//! references can carry sparse overrides; see [`RawNode::merge_over`].

mod artboard;
pub mod name;
mod node;

pub use artboard::{Artboard, ArtboardGeometry, DesignFile, Resources};
pub use node::{
    ColorValue, Constraints, Font, GroupContent, Meta, NodeKind, Paint, RawNode, RepeatGrid,
    ResolvedNode, Rgb, ScrollAxis, ScrollDescriptor, ShapeGeometry, ShapePrimitive, Stroke, Style,
    TextAttributes, TextContent, TextFrame, Transform, UxMeta,
};

//! Design files, artboards and the symbol resource dictionary

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::layout::{Point, Size};

use super::node::RawNode;

/// Absolute placement of an artboard on the design canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtboardGeometry {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl ArtboardGeometry {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset that moves the artboard's top-left-origin space onto its center
    pub fn recenter_offset(&self) -> Point {
        Point::new(-self.width / 2.0 - self.x, -self.height / 2.0 - self.y)
    }
}

/// One canvas being imported
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artboard {
    pub name: String,
    #[serde(default)]
    pub geometry: ArtboardGeometry,
    #[serde(default)]
    pub marked_for_export: bool,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl Artboard {
    /// Marked either on the artboard itself or on its first child's metadata
    pub fn is_marked_for_export(&self) -> bool {
        self.marked_for_export
            || self
                .children
                .first()
                .is_some_and(RawNode::is_marked_for_export)
    }
}

/// Reusable symbols shared by every artboard of a file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub symbols: Vec<RawNode>,
}

/// A whole design document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(default)]
    pub artboards: Vec<Artboard>,
    #[serde(default)]
    pub resources: Resources,
}

impl DesignFile {
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeKind;

    #[test]
    fn test_recenter_offset() {
        let geometry = ArtboardGeometry {
            x: 100.0,
            y: 50.0,
            width: 375.0,
            height: 667.0,
        };
        assert_eq!(geometry.recenter_offset(), Point::new(-287.5, -383.5));
    }

    #[test]
    fn test_parse_design_file() {
        let file = DesignFile::from_json_str(
            r#"{
                "artboards": [{"name": "Home", "geometry": {"width": 320, "height": 480}, "children": []}],
                "resources": {"symbols": [{"id": "sym", "type": "group"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(file.artboards.len(), 1);
        assert_eq!(file.artboards[0].geometry.size(), Size::new(320.0, 480.0));
        assert_eq!(file.resources.symbols.len(), 1);
    }

    #[test]
    fn test_export_mark_on_first_child() {
        let file = DesignFile::from_json_str(
            r#"{ "artboards": [
                {"name": "Own", "markedForExport": true},
                {"name": "Child", "children": [
                    {"id": "a", "type": "group", "meta": {"ux": {"markedForExport": true}}}
                ]},
                {"name": "Second", "children": [
                    {"id": "a", "type": "group"},
                    {"id": "b", "type": "group", "meta": {"ux": {"markedForExport": true}}}
                ]}
            ] }"#,
        )
        .unwrap();
        let marks: Vec<bool> = file.artboards.iter().map(Artboard::is_marked_for_export).collect();
        assert_eq!(marks, vec![true, true, false]);
    }

    #[test]
    fn test_unknown_node_type_still_parses() {
        let file = DesignFile::from_json_str(
            r#"{ "artboards": [{"name": "Photo", "children": [{"id": "img", "type": "image"}]}] }"#,
        )
        .unwrap();
        assert_eq!(file.artboards[0].children[0].kind, NodeKind::Unknown);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            DesignFile::from_json_str("{"),
            Err(DocumentError::Json(_))
        ));
    }
}

//! The normalized layout document handed to a renderer generator

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::document::Rgb;
use crate::layout::{Point, Size};

/// Schema version of the emitted layout document
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Integer element identity; the artboard root is always `0`
pub type ElementId = u32;

/// RGBA color, alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub fn from_rgb(rgb: Rgb, alpha: f64) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a: alpha,
        }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    UpperLeft,
    UpperCenter,
    UpperRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

/// Typed payload of an element
///
/// Unset fields mean "leave the generator's default alone".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        sprite: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(skip_serializing_if = "Option::is_none")]
        align: Option<TextAlign>,
        #[serde(skip_serializing_if = "Option::is_none")]
        font: Option<String>,
    },
    Button,
    HorizontalList {
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<f64>,
    },
    VerticalList {
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<f64>,
    },
    /// Vertical list inside a scroll viewport
    ScrollList {
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        padding_top: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        padding_bottom: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorX {
    Left,
    Center,
    Right,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorY {
    Top,
    Middle,
    Bottom,
    Stretch,
}

/// One node of the output layout
///
/// Position is relative to the parent's center with `y` growing upward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub position: Point,
    pub size: Size,
    pub anchor_x: AnchorX,
    pub anchor_y: AnchorY,
    pub visible: bool,
    pub components: Vec<Component>,
    pub children: Vec<ElementId>,
}

/// A binary file referenced by components through its file name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    #[serde(rename = "file")]
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Sprite,
}

impl Asset {
    pub fn sprite(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: AssetKind::Sprite,
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Assets in first-seen order, unique by file name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetList {
    assets: Vec<Asset>,
}

impl AssetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `asset` unless one with the same file name is already present
    pub fn add(&mut self, asset: Asset) -> bool {
        if self.contains(&asset.file_name) {
            return false;
        }
        self.assets.push(asset);
        true
    }

    pub fn extend(&mut self, assets: impl IntoIterator<Item = Asset>) {
        for asset in assets {
            self.add(asset);
        }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.assets.iter().any(|a| a.file_name == file_name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn into_vec(self) -> Vec<Asset> {
        self.assets
    }
}

/// Provides asset bytes to a generator on demand
pub trait AssetLoader {
    fn load(&self, file_name: &str) -> Option<&[u8]>;
}

/// Schema version and producer of a layout document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMeta {
    pub version: String,
    pub source: String,
}

/// Everything the generator needs to build one artboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDocument {
    pub meta: DocumentMeta,
    pub name: String,
    /// Content hash of the raw artboard, for stale-reference detection
    pub hash: String,
    pub root: ElementId,
    pub elements: BTreeMap<ElementId, Element>,
    pub assets: Vec<Asset>,
}

impl LayoutDocument {
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn root_element(&self) -> Option<&Element> {
        self.element(self.root)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl AssetLoader for LayoutDocument {
    fn load(&self, file_name: &str) -> Option<&[u8]> {
        self.assets
            .iter()
            .find(|a| a.file_name == file_name)
            .map(|a| a.bytes.as_slice())
    }
}

/// Hex SHA-256 of the compact JSON form of `value`
pub fn content_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&json)))
}

//! Raw design nodes as exported by the design tool

use serde::{Deserialize, Serialize};

use super::name;

/// The kind of a design node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    #[default]
    Group,
    Path,
    Rect,
    Ellipse,
    Line,
    Text,
    /// Stand-in for a symbol instance, carrying only overrides
    #[serde(rename = "syncRef", alias = "symbolReference")]
    SymbolReference,
    /// Any type the importer has no support for
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// Vector shape kinds
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            NodeKind::Path | NodeKind::Rect | NodeKind::Ellipse | NodeKind::Line
        )
    }
}

/// Local translation relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub tx: f64,
    #[serde(default)]
    pub ty: f64,
}

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    #[serde(default)]
    pub r: u8,
    #[serde(default)]
    pub g: u8,
    #[serde(default)]
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorValue {
    #[serde(default)]
    pub value: Rgb,
}

/// A fill paint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
}

impl Paint {
    /// A paint of type `none` draws nothing
    pub fn is_visible(&self) -> bool {
        self.kind != "none"
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Stroke {
    pub fn is_visible(&self) -> bool {
        self.kind != "none"
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postscript_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_align: Option<String>,
}

/// Fill, stroke and typography of a node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_attributes: Option<TextAttributes>,
}

impl Style {
    /// Fill color, if the fill is visible and carries one
    pub fn fill_color(&self) -> Option<Rgb> {
        self.fill
            .as_ref()
            .filter(|fill| fill.is_visible())
            .and_then(|fill| fill.color)
            .map(|c| c.value)
    }
}

/// Repeat-grid descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGrid {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default)]
    pub padding_x: f64,
    #[serde(default)]
    pub padding_y: f64,
}

fn default_columns() -> u32 {
    1
}

impl Default for RepeatGrid {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            padding_x: 0.0,
            padding_y: 0.0,
        }
    }
}

impl RepeatGrid {
    /// Spacing between repeated items along a scroll axis
    pub fn spacing(&self, axis: ScrollAxis) -> f64 {
        match axis {
            ScrollAxis::Vertical => self.padding_y,
            ScrollAxis::Horizontal => self.padding_x,
        }
    }
}

/// Axis a scroll container scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

/// Viewport of a scroll container along its scroll axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDescriptor {
    pub axis: ScrollAxis,
    pub offset: f64,
    pub viewport: f64,
}

/// Edges of a node that track the parent's edges on resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Constraints {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// Design-tool metadata attached to a node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UxMeta {
    pub constraint_left: bool,
    pub constraint_right: bool,
    pub constraint_top: bool,
    pub constraint_bottom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrolling_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_grid: Option<RepeatGrid>,
    /// State variants of a symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<RawNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_for_export: Option<bool>,
}

impl UxMeta {
    pub fn constraints(&self) -> Constraints {
        Constraints {
            left: self.constraint_left,
            right: self.constraint_right,
            top: self.constraint_top,
            bottom: self.constraint_bottom,
        }
    }

    /// Scroll viewport, if the scrolling type is set
    ///
    /// Any non-blank type other than `vertical` scrolls horizontally.
    pub fn scroll(&self) -> Option<ScrollDescriptor> {
        let kind = self.scrolling_type.as_deref()?.trim();
        if kind.is_empty() {
            return None;
        }
        Some(if kind == "vertical" {
            ScrollDescriptor {
                axis: ScrollAxis::Vertical,
                offset: self.offset_y.unwrap_or(0.0),
                viewport: self.viewport_height.unwrap_or(0.0),
            }
        } else {
            ScrollDescriptor {
                axis: ScrollAxis::Horizontal,
                offset: self.offset_x.unwrap_or(0.0),
                viewport: self.viewport_width.unwrap_or(0.0),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ux: Option<UxMeta>,
}

/// Geometry of a vector shape, in the node's local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapePrimitive {
    Rect {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },
    Ellipse {
        #[serde(default)]
        cx: f64,
        #[serde(default)]
        cy: f64,
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        ry: f64,
    },
    Line {
        #[serde(default)]
        x1: f64,
        #[serde(default)]
        y1: f64,
        #[serde(default)]
        x2: f64,
        #[serde(default)]
        y2: f64,
    },
    Path {
        #[serde(default)]
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeGeometry {
    #[serde(flatten)]
    pub primitive: ShapePrimitive,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winding: Option<String>,
}

/// Text frame: `positioned` (auto-sized) or `area` (fixed box)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFrame {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl TextFrame {
    pub fn is_area(&self) -> bool {
        self.kind == "area"
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<TextFrame>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupContent {
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// One node of the source design tree
///
/// Every field except the kind is optional so that a symbol reference can
/// carry only the fields it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeGeometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupContent>,
    /// Identity of the referenced symbol (symbol references only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_source_guid: Option<String>,
}

/// A node after symbol resolution: same shape, no symbol references left
pub type ResolvedNode = RawNode;

impl RawNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Identity used for lookups: `id`, falling back to `guid`
    pub fn key(&self) -> &str {
        self.id
            .as_deref()
            .or(self.guid.as_deref())
            .unwrap_or_default()
    }

    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.guid.is_some()
    }

    /// Display name without tags
    pub fn simple_name(&self) -> &str {
        self.name.as_deref().map(name::simple_name).unwrap_or_default()
    }

    /// Tags encoded in the display name
    pub fn parameters(&self) -> Vec<String> {
        self.name.as_deref().map(name::parameters).unwrap_or_default()
    }

    pub fn has_parameter(&self, tag: &str) -> bool {
        self.parameters().iter().any(|p| p == tag)
    }

    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn translation(&self) -> (f64, f64) {
        self.transform.map(|t| (t.tx, t.ty)).unwrap_or((0.0, 0.0))
    }

    /// Children of a group; every other kind has none
    pub fn children(&self) -> &[RawNode] {
        match (&self.group, self.is_group()) {
            (Some(group), true) => &group.children,
            _ => &[],
        }
    }

    pub fn set_children(&mut self, children: Vec<RawNode>) {
        self.group = Some(GroupContent { children });
    }

    pub fn ux(&self) -> Option<&UxMeta> {
        self.meta.as_ref().and_then(|m| m.ux.as_ref())
    }

    pub fn constraints(&self) -> Constraints {
        self.ux().map(UxMeta::constraints).unwrap_or_default()
    }

    /// Clear all four constraint flags
    pub fn clear_constraints(&mut self) {
        if let Some(ux) = self.meta.as_mut().and_then(|m| m.ux.as_mut()) {
            ux.constraint_left = false;
            ux.constraint_right = false;
            ux.constraint_top = false;
            ux.constraint_bottom = false;
        }
    }

    pub fn repeat_grid(&self) -> Option<&RepeatGrid> {
        self.ux().and_then(|ux| ux.repeat_grid.as_ref())
    }

    pub fn scroll(&self) -> Option<ScrollDescriptor> {
        self.ux().and_then(UxMeta::scroll)
    }

    pub fn states(&self) -> &[RawNode] {
        self.ux().and_then(|ux| ux.states.as_deref()).unwrap_or_default()
    }

    pub fn is_marked_for_export(&self) -> bool {
        self.ux().and_then(|ux| ux.marked_for_export).unwrap_or(false)
    }

    /// Merge a symbol reference with the symbol it points at
    ///
    /// Each field comes from `local` when set, otherwise from `symbol`;
    /// name and kind always come from `symbol`.
    pub fn merge_over(local: &RawNode, symbol: &RawNode) -> RawNode {
        RawNode {
            id: local.id.clone().or_else(|| symbol.id.clone()),
            guid: local.guid.clone().or_else(|| symbol.guid.clone()),
            name: symbol.name.clone(),
            kind: symbol.kind,
            transform: local.transform.or(symbol.transform),
            style: local.style.clone().or_else(|| symbol.style.clone()),
            visible: local.visible.or(symbol.visible),
            meta: local.meta.clone().or_else(|| symbol.meta.clone()),
            shape: local.shape.clone().or_else(|| symbol.shape.clone()),
            text: local.text.clone().or_else(|| symbol.text.clone()),
            group: local.group.clone().or_else(|| symbol.group.clone()),
            sync_source_guid: local
                .sync_source_guid
                .clone()
                .or_else(|| symbol.sync_source_guid.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(kind: NodeKind, id: &str) -> RawNode {
        RawNode {
            id: Some(id.to_string()),
            ..RawNode::new(kind)
        }
    }

    #[test]
    fn test_key_falls_back_to_guid() {
        let mut n = RawNode::new(NodeKind::Rect);
        n.guid = Some("g-1".to_string());
        assert_eq!(n.key(), "g-1");
        n.id = Some("i-1".to_string());
        assert_eq!(n.key(), "i-1");
    }

    #[test]
    fn test_children_depend_on_kind() {
        let mut text = node(NodeKind::Text, "t");
        text.set_children(vec![node(NodeKind::Rect, "r")]);
        assert!(text.children().is_empty());

        let mut group = node(NodeKind::Group, "g");
        group.set_children(vec![node(NodeKind::Rect, "r")]);
        assert_eq!(group.children().len(), 1);
    }

    #[test]
    fn test_merge_prefers_local_except_name_and_kind() {
        let mut local = node(NodeKind::SymbolReference, "ref");
        local.name = Some("Instance".to_string());
        local.transform = Some(Transform { tx: 5.0, ty: 6.0 });
        local.sync_source_guid = Some("sym".to_string());

        let mut symbol = node(NodeKind::Group, "sym");
        symbol.name = Some("Card@button".to_string());
        symbol.transform = Some(Transform { tx: 1.0, ty: 1.0 });
        symbol.visible = Some(false);
        symbol.set_children(vec![node(NodeKind::Rect, "bg")]);

        let merged = RawNode::merge_over(&local, &symbol);
        assert_eq!(merged.id.as_deref(), Some("ref"));
        assert_eq!(merged.name.as_deref(), Some("Card@button"));
        assert_eq!(merged.kind, NodeKind::Group);
        assert_eq!(merged.transform, Some(Transform { tx: 5.0, ty: 6.0 }));
        assert_eq!(merged.visible, Some(false));
        assert_eq!(merged.children().len(), 1);
    }

    #[test]
    fn test_scroll_descriptor() {
        let ux = UxMeta {
            scrolling_type: Some("vertical".to_string()),
            offset_y: Some(12.0),
            viewport_height: Some(300.0),
            ..UxMeta::default()
        };
        assert_eq!(
            ux.scroll(),
            Some(ScrollDescriptor {
                axis: ScrollAxis::Vertical,
                offset: 12.0,
                viewport: 300.0,
            })
        );

        let blank = UxMeta {
            scrolling_type: Some("  ".to_string()),
            ..UxMeta::default()
        };
        assert_eq!(blank.scroll(), None);
    }

    #[test]
    fn test_clear_constraints() {
        let mut n = node(NodeKind::Rect, "r");
        n.meta = Some(Meta {
            ux: Some(UxMeta {
                constraint_left: true,
                constraint_bottom: true,
                ..UxMeta::default()
            }),
        });
        n.clear_constraints();
        assert_eq!(n.constraints(), Constraints::default());
    }

    #[test]
    fn test_deserialize_design_tool_json() {
        let json = r#"{
            "id": "a1",
            "name": "Title",
            "type": "text",
            "transform": {"tx": 10, "ty": 20},
            "style": {"fill": {"type": "solid", "color": {"value": {"r": 255, "g": 0, "b": 0}}},
                      "font": {"postscriptName": "Roboto-Bold", "size": 18}},
            "meta": {"ux": {"constraintLeft": true}},
            "text": {"rawText": "Hello", "frame": {"type": "positioned"}}
        }"#;
        let n: RawNode = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NodeKind::Text);
        assert_eq!(n.translation(), (10.0, 20.0));
        assert!(n.constraints().left);
        assert_eq!(
            n.style.as_ref().and_then(Style::fill_color),
            Some(Rgb { r: 255, g: 0, b: 0 })
        );
    }

    #[test]
    fn test_deserialize_shape_and_reference() {
        let json = r#"{"id": "s", "type": "rect", "shape": {"type": "rect", "width": 4, "height": 2}}"#;
        let n: RawNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            n.shape.map(|s| s.primitive),
            Some(ShapePrimitive::Rect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 2.0
            })
        );

        let json = r#"{"id": "r", "type": "syncRef", "syncSourceGuid": "sym"}"#;
        let n: RawNode = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NodeKind::SymbolReference);
    }
}

//! Vector shapes: rect, ellipse, line and path
//!
//! Each shape becomes an `Image` component backed by an SVG sprite named
//! after the node's identity.

use kurbo::BezPath;

use crate::document::{ResolvedNode, ShapePrimitive};
use crate::layout::{BoundingBox, LayoutError, Pass, Point, Size};
use crate::output::{Asset, Color, Component};

use super::svg::shape_markup;
use super::{ObjectRule, RuleOutput};

pub struct ShapeRule;

impl ShapeRule {
    pub fn sprite_name(node: &ResolvedNode) -> String {
        format!("{}.svg", node.key())
    }
}

impl ObjectRule for ShapeRule {
    fn name(&self) -> &str {
        "shape"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        node.kind.is_shape() && node.shape.is_some()
    }

    fn size(&self, node: &ResolvedNode, position: Point) -> BoundingBox {
        let local = node
            .shape
            .as_ref()
            .map(|shape| local_bounds(&shape.primitive))
            .unwrap_or_default();
        BoundingBox::new(
            position.x + local.x,
            position.y + local.y,
            local.width,
            local.height,
        )
    }

    fn emit(&self, node: &ResolvedNode, _size: Size) -> Result<RuleOutput, LayoutError> {
        let Some(shape) = node.shape.as_ref() else {
            return Err(LayoutError::unknown_kind(node, Pass::Emission));
        };
        let style = node.style.as_ref();
        let color = style.and_then(|style| {
            style
                .fill_color()
                .map(|rgb| Color::from_rgb(rgb, style.opacity.unwrap_or(1.0)))
        });

        let sprite = Self::sprite_name(node);
        let markup = shape_markup(shape, &local_bounds(&shape.primitive), style);

        Ok(RuleOutput {
            components: vec![Component::Image {
                sprite: Some(sprite.clone()),
                color,
            }],
            assets: vec![Asset::sprite(sprite, markup.into_bytes())],
        })
    }
}

/// Bounds of a shape in its own local space
pub fn local_bounds(primitive: &ShapePrimitive) -> BoundingBox {
    match primitive {
        ShapePrimitive::Rect {
            x,
            y,
            width,
            height,
        } => BoundingBox::new(*x, *y, *width, *height),
        ShapePrimitive::Ellipse { cx, cy, rx, ry } => {
            BoundingBox::from_min_max(cx - rx, cy - ry, cx + rx, cy + ry)
        }
        ShapePrimitive::Line { x1, y1, x2, y2 } => {
            BoundingBox::from_min_max(x1.min(*x2), y1.min(*y2), x1.max(*x2), y1.max(*y2))
        }
        ShapePrimitive::Path { path } => path_bounds(path).unwrap_or_default(),
    }
}

/// Envelope of every point and control point in SVG path data
///
/// Arcs are approximated by cubic segments first, so their control points
/// count too. Returns `None` for data that does not parse or draws nothing.
pub fn path_bounds(d: &str) -> Option<BoundingBox> {
    let path = BezPath::from_svg(d).ok()?;
    if path.elements().is_empty() {
        return None;
    }
    let rect = path.control_box();
    Some(BoundingBox::from_min_max(rect.x0, rect.y0, rect.x1, rect.y1))
}

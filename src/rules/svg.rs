//! SVG sprite markup for vector shapes

use crate::document::{ShapeGeometry, ShapePrimitive, Style};
use crate::layout::BoundingBox;
use crate::output::Color;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Standalone `<svg>` document drawing `shape` inside `bounds`
pub fn shape_markup(shape: &ShapeGeometry, bounds: &BoundingBox, style: Option<&Style>) -> String {
    let attrs = paint_attributes(shape, style);
    let element = match &shape.primitive {
        ShapePrimitive::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            x, y, width, height, attrs
        ),
        ShapePrimitive::Ellipse { cx, cy, rx, ry } => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            cx, cy, rx, ry, attrs
        ),
        ShapePrimitive::Line { x1, y1, x2, y2 } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            x1, y1, x2, y2, attrs
        ),
        ShapePrimitive::Path { path } => {
            format!(r#"<path d="{}"{}/>"#, escape_attr(path), attrs)
        }
    };

    format!(
        r#"<svg xmlns="{}" viewBox="{} {} {} {}" width="{}" height="{}">{}</svg>"#,
        SVG_NS,
        bounds.x,
        bounds.y,
        bounds.width,
        bounds.height,
        bounds.width,
        bounds.height,
        element
    )
}

fn paint_attributes(shape: &ShapeGeometry, style: Option<&Style>) -> String {
    let mut attrs = String::new();

    let fill = style
        .and_then(Style::fill_color)
        .map(|rgb| Color::from_rgb(rgb, 1.0).to_hex())
        .unwrap_or_else(|| "none".to_string());
    attrs.push_str(&format!(r#" fill="{}""#, fill));

    if let Some(winding) = shape.winding.as_deref() {
        attrs.push_str(&format!(r#" fill-rule="{}""#, escape_attr(winding)));
    }

    let stroke = style
        .and_then(|s| s.stroke.as_ref())
        .filter(|stroke| stroke.is_visible());
    if let Some(stroke) = stroke {
        if let Some(color) = stroke.color {
            attrs.push_str(&format!(
                r#" stroke="{}""#,
                Color::from_rgb(color.value, 1.0).to_hex()
            ));
        }
        if let Some(width) = stroke.width {
            attrs.push_str(&format!(r#" stroke-width="{}""#, width));
        }
    }

    attrs
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

//! Text nodes
//!
//! Area text keeps its frame. Positioned text is auto-sized by the design
//! tool, so its box is estimated from the font size: the node's position is
//! the first line's baseline and the paragraph alignment picks which edge
//! of the box sits on it.

use crate::config::TextMetrics;
use crate::document::{NodeKind, ResolvedNode};
use crate::layout::{BoundingBox, LayoutError, Point, Size};
use crate::output::{Color, Component, TextAlign};

use super::{ObjectRule, RuleOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paragraph {
    Left,
    Center,
    Right,
}

impl Paragraph {
    fn of(node: &ResolvedNode) -> Self {
        let align = node
            .style
            .as_ref()
            .and_then(|s| s.text_attributes.as_ref())
            .and_then(|a| a.paragraph_align.as_deref());
        match align {
            Some("center") => Paragraph::Center,
            Some("right") => Paragraph::Right,
            _ => Paragraph::Left,
        }
    }
}

pub struct TextRule {
    metrics: TextMetrics,
}

impl TextRule {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }

    fn font_size(&self, node: &ResolvedNode) -> f64 {
        node.style
            .as_ref()
            .and_then(|s| s.font.as_ref())
            .and_then(|f| f.size)
            .unwrap_or(self.metrics.default_font_size)
    }

    fn is_area(node: &ResolvedNode) -> bool {
        node.text
            .as_ref()
            .and_then(|t| t.frame.as_ref())
            .is_some_and(|f| f.is_area())
    }

    fn raw_text(node: &ResolvedNode) -> &str {
        node.text.as_ref().map(|t| t.raw_text.as_str()).unwrap_or_default()
    }
}

impl ObjectRule for TextRule {
    fn name(&self) -> &str {
        "text"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        node.kind == NodeKind::Text
    }

    fn size(&self, node: &ResolvedNode, position: Point) -> BoundingBox {
        let frame = node.text.as_ref().and_then(|t| t.frame.as_ref());
        if let Some(frame) = frame.filter(|f| f.is_area()) {
            return BoundingBox::new(
                position.x,
                position.y,
                frame.width.unwrap_or(0.0),
                frame.height.unwrap_or(0.0),
            );
        }

        let font_size = self.font_size(node);
        let text = Self::raw_text(node);
        let lines = text.split('\n').count().max(1);
        let longest = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').chars().count())
            .max()
            .unwrap_or(0);

        let width = longest as f64 * font_size * self.metrics.char_width_ratio;
        let height = lines as f64 * font_size * self.metrics.line_height_ratio;
        let x = match Paragraph::of(node) {
            Paragraph::Left => position.x,
            Paragraph::Center => position.x - width / 2.0,
            Paragraph::Right => position.x - width,
        };
        BoundingBox::new(x, position.y - font_size, width, height)
    }

    fn emit(&self, node: &ResolvedNode, _size: Size) -> Result<RuleOutput, LayoutError> {
        let style = node.style.as_ref();
        let color = style.and_then(|style| {
            style
                .fill_color()
                .map(|rgb| Color::from_rgb(rgb, style.opacity.unwrap_or(1.0)))
        });
        let font = style
            .and_then(|s| s.font.as_ref())
            .and_then(|f| f.postscript_name.clone());

        let align = match (Self::is_area(node), Paragraph::of(node)) {
            (true, Paragraph::Left) => TextAlign::UpperLeft,
            (true, Paragraph::Center) => TextAlign::UpperCenter,
            (true, Paragraph::Right) => TextAlign::UpperRight,
            (false, Paragraph::Left) => TextAlign::MiddleLeft,
            (false, Paragraph::Center) => TextAlign::MiddleCenter,
            (false, Paragraph::Right) => TextAlign::MiddleRight,
        };

        Ok(RuleOutput::component(Component::Text {
            text: Some(Self::raw_text(node).to_string()),
            size: Some(self.font_size(node)),
            color,
            align: Some(align),
            font,
        }))
    }
}

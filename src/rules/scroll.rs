//! Scroll containers
//!
//! A scroll group is clipped to its viewport along the scroll axis and emits
//! a `ScrollList`. When one of its direct children is a repeat grid, the
//! grid is replaced by its template item, so the list holds a single
//! prototype row. With the `multiitems` tag the template item is opened up
//! one more level and any nested grid contributes its own template cell's
//! items.

use crate::config::{SpacerPolicy, SpacingPolicy};
use crate::document::{ResolvedNode, ScrollAxis};
use crate::layout::{BoundingBox, LayoutError, Point, SizeTable};
use crate::output::Component;

use super::repeat_grid::RepeatGridRule;
use super::{GroupRule, GroupRuleOutput};

/// Name tag of the child whose height becomes the bottom padding
pub const SPACER_TAG: &str = "spacer";
/// Name tag of a scroll container whose list rows mix several item kinds
pub const MULTI_ITEMS_TAG: &str = "multiitems";

/// Top padding of a scroll list
///
/// How far the highest child sits above the container's top edge; both
/// edges are in the container's local space, `y` growing downward. Zero
/// when there are no children.
pub fn top_padding(container_top: f64, child_tops: impl IntoIterator<Item = f64>) -> f64 {
    child_tops
        .into_iter()
        .map(|top| container_top - top)
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))))
        .unwrap_or(0.0)
}

pub struct ScrollRule {
    spacer_policy: SpacerPolicy,
    spacing_policy: SpacingPolicy,
}

impl ScrollRule {
    pub fn new(spacer_policy: SpacerPolicy, spacing_policy: SpacingPolicy) -> Self {
        Self {
            spacer_policy,
            spacing_policy,
        }
    }

    fn bottom_padding(
        &self,
        node: &ResolvedNode,
        children: &[ResolvedNode],
        sizes: &SizeTable,
    ) -> Result<f64, LayoutError> {
        let spacers: Vec<&ResolvedNode> = children
            .iter()
            .filter(|child| child.has_parameter(SPACER_TAG))
            .collect();
        if spacers.len() > 1 && self.spacer_policy == SpacerPolicy::Reject {
            return Err(LayoutError::multiple_spacers(node, spacers.len()));
        }
        match spacers.last() {
            Some(spacer) => Ok(sizes.get(spacer)?.height),
            None => Ok(0.0),
        }
    }

    /// List items and spacing for a grid found directly under `node`
    fn expand_grid(
        &self,
        node: &ResolvedNode,
        grid: &ResolvedNode,
        axis: ScrollAxis,
    ) -> Result<(Vec<ResolvedNode>, f64), LayoutError> {
        let outer = grid.repeat_grid().map_or(0.0, |g| g.spacing(axis));
        let item = RepeatGridRule::template_item(grid.children())
            .ok_or_else(|| LayoutError::malformed_grid(grid))?;

        let (mut items, spacing) = if node.has_parameter(MULTI_ITEMS_TAG) {
            let mut items = Vec::new();
            let mut inner = None;
            for child in item.children() {
                if RepeatGridRule::is(child) {
                    inner = child.repeat_grid().map(|g| g.spacing(axis));
                    let cell = RepeatGridRule::template_cell(child.children())
                        .ok_or_else(|| LayoutError::malformed_grid(child))?;
                    items.extend(cell.children().iter().cloned());
                } else {
                    items.push(child.clone());
                }
            }
            let spacing = match inner {
                Some(inner) => self.spacing_policy.merge(outer, inner),
                None => outer,
            };
            (items, spacing)
        } else {
            (vec![item.clone()], outer)
        };

        for item in &mut items {
            item.clear_constraints();
        }
        Ok((items, spacing))
    }
}

impl GroupRule for ScrollRule {
    fn name(&self) -> &str {
        "scroll"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        node.is_group() && node.scroll().is_some()
    }

    fn size(&self, node: &ResolvedNode, position: Point, envelope: BoundingBox) -> BoundingBox {
        let Some(scroll) = node.scroll() else {
            return envelope;
        };
        match scroll.axis {
            ScrollAxis::Vertical => BoundingBox::new(
                envelope.x,
                position.y + scroll.offset,
                envelope.width,
                scroll.viewport,
            ),
            ScrollAxis::Horizontal => BoundingBox::new(
                position.x + scroll.offset,
                envelope.y,
                scroll.viewport,
                envelope.height,
            ),
        }
    }

    fn emit(
        &self,
        node: &ResolvedNode,
        children: Vec<ResolvedNode>,
        sizes: &SizeTable,
    ) -> Result<GroupRuleOutput, LayoutError> {
        let Some(scroll) = node.scroll() else {
            return Ok(GroupRuleOutput::unchanged(children));
        };

        let container = sizes.get(node)?;
        let child_tops = children
            .iter()
            .map(|child| sizes.get(child).map(|rect| rect.top()))
            .collect::<Result<Vec<_>, _>>()?;
        let padding_top = top_padding(-container.height / 2.0, child_tops);
        let padding_bottom = self.bottom_padding(node, &children, sizes)?;

        let expanded = match children.iter().find(|child| RepeatGridRule::is(child)) {
            Some(grid) => Some(self.expand_grid(node, grid, scroll.axis)?),
            None => None,
        };
        let (children, spacing) = expanded.unwrap_or((children, 0.0));

        Ok(
            GroupRuleOutput::unchanged(children).with_component(Component::ScrollList {
                spacing: Some(spacing),
                padding_top: Some(padding_top),
                padding_bottom: Some(padding_bottom),
            }),
        )
    }
}

//! Repeat grids
//!
//! A grid exports every replicated cell, but only the template survives:
//! the first item of the first cell. The generator re-creates copies from
//! it at runtime through the emitted list component.

use crate::document::ResolvedNode;
use crate::layout::{LayoutError, SizeTable};
use crate::output::Component;

use super::{GroupRule, GroupRuleOutput};

pub struct RepeatGridRule;

impl RepeatGridRule {
    /// Whether `node` carries repeat-grid metadata
    pub fn is(node: &ResolvedNode) -> bool {
        node.is_group() && node.repeat_grid().is_some()
    }

    /// The grid's template cell (its first child)
    pub fn template_cell(children: &[ResolvedNode]) -> Option<&ResolvedNode> {
        children.first()
    }

    /// The first item of the template cell
    pub fn template_item(children: &[ResolvedNode]) -> Option<&ResolvedNode> {
        Self::template_cell(children).and_then(|cell| cell.children().first())
    }
}

impl GroupRule for RepeatGridRule {
    fn name(&self) -> &str {
        "repeat_grid"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        Self::is(node)
    }

    fn emit(
        &self,
        node: &ResolvedNode,
        children: Vec<ResolvedNode>,
        _sizes: &SizeTable,
    ) -> Result<GroupRuleOutput, LayoutError> {
        let item = Self::template_item(&children)
            .cloned()
            .ok_or_else(|| LayoutError::malformed_grid(node))?;
        let grid = node.repeat_grid().copied().unwrap_or_default();

        let component = if grid.columns > 1 {
            Component::HorizontalList {
                spacing: Some(0.0),
                padding: Some(grid.padding_x),
            }
        } else {
            Component::VerticalList {
                spacing: Some(0.0),
                padding: Some(grid.padding_y),
            }
        };

        Ok(GroupRuleOutput::unchanged(vec![item]).with_component(component))
    }
}

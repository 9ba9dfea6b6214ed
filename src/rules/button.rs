//! Groups tagged `@button` become buttons

use crate::document::ResolvedNode;
use crate::layout::{LayoutError, SizeTable};
use crate::output::Component;

use super::{GroupRule, GroupRuleOutput};

/// Name tag that turns a group into a button
pub const BUTTON_TAG: &str = "button";

/// Marks a `@button` group as pressable; layout and children are untouched
pub struct ButtonRule;

impl GroupRule for ButtonRule {
    fn name(&self) -> &str {
        "button"
    }

    fn matches(&self, node: &ResolvedNode) -> bool {
        node.is_group() && node.has_parameter(BUTTON_TAG)
    }

    fn emit(
        &self,
        _node: &ResolvedNode,
        children: Vec<ResolvedNode>,
        _sizes: &SizeTable,
    ) -> Result<GroupRuleOutput, LayoutError> {
        Ok(GroupRuleOutput::unchanged(children).with_component(Component::Button))
    }
}

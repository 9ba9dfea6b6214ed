//! Pluggable per-node rules for the size and emission passes
//!
//! Object rules turn a leaf-like node into components; the first matching
//! object rule owns the node. Group rules decorate untyped groups: every
//! matching group rule runs, in order, and each may append components and
//! replace the working children list seen by the next one.
//!
//! Custom rules registered through [`RuleSetBuilder`] always run before the
//! built-in ones.

mod button;
mod repeat_grid;
mod scroll;
mod shape;
pub mod svg;
mod text;

pub use button::ButtonRule;
pub use repeat_grid::RepeatGridRule;
pub use scroll::{top_padding, ScrollRule};
pub use shape::{path_bounds, ShapeRule};
pub use text::TextRule;

use crate::config::ImportConfig;
use crate::document::ResolvedNode;
use crate::layout::{BoundingBox, LayoutError, Point, Size, SizeTable};
use crate::output::{Asset, Component};
use crate::symbol::RewriteHook;

/// Components and assets produced for one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutput {
    pub components: Vec<Component>,
    pub assets: Vec<Asset>,
}

impl RuleOutput {
    pub fn component(component: Component) -> Self {
        Self {
            components: vec![component],
            assets: Vec::new(),
        }
    }
}

/// Result of one group rule: appended components plus the working children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRuleOutput {
    pub components: Vec<Component>,
    pub assets: Vec<Asset>,
    /// Replacement (or the unchanged) working children list
    pub children: Vec<ResolvedNode>,
}

impl GroupRuleOutput {
    /// Pass the children through untouched
    pub fn unchanged(children: Vec<ResolvedNode>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}

/// A rule that owns a node outright
pub trait ObjectRule: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, node: &ResolvedNode) -> bool;

    /// Rect of the node whose absolute, recentered position is `position`
    fn size(&self, node: &ResolvedNode, position: Point) -> BoundingBox;

    fn emit(&self, node: &ResolvedNode, size: Size) -> Result<RuleOutput, LayoutError>;
}

/// A rule that decorates an untyped group
pub trait GroupRule: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, node: &ResolvedNode) -> bool;

    /// Adjust the children's envelope; passes it through by default
    fn size(&self, _node: &ResolvedNode, _position: Point, envelope: BoundingBox) -> BoundingBox {
        envelope
    }

    fn emit(
        &self,
        node: &ResolvedNode,
        children: Vec<ResolvedNode>,
        sizes: &SizeTable,
    ) -> Result<GroupRuleOutput, LayoutError>;
}

/// Ordered rule chains and rewrite hooks for one import
pub struct RuleSet {
    object_rules: Vec<Box<dyn ObjectRule>>,
    group_rules: Vec<Box<dyn GroupRule>>,
    hooks: Vec<Box<dyn RewriteHook>>,
}

impl RuleSet {
    /// Only the built-in rules
    pub fn builtin(config: &ImportConfig) -> Self {
        Self::builder().build(config)
    }

    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn object_rules(&self) -> &[Box<dyn ObjectRule>] {
        &self.object_rules
    }

    pub fn group_rules(&self) -> &[Box<dyn GroupRule>] {
        &self.group_rules
    }

    pub fn hooks(&self) -> &[Box<dyn RewriteHook>] {
        &self.hooks
    }

    /// First object rule accepting `node`
    pub fn object_rule_for(&self, node: &ResolvedNode) -> Option<&dyn ObjectRule> {
        self.object_rules
            .iter()
            .find(|rule| rule.matches(node))
            .map(|rule| &**rule)
    }

    /// Every group rule accepting `node`, in registration order
    pub fn group_rules_for<'a>(
        &'a self,
        node: &'a ResolvedNode,
    ) -> impl Iterator<Item = &'a dyn GroupRule> + 'a {
        self.group_rules
            .iter()
            .filter(move |rule| rule.matches(node))
            .map(|rule| &**rule)
    }
}

/// Collects custom rules ahead of the built-ins
#[derive(Default)]
pub struct RuleSetBuilder {
    object_rules: Vec<Box<dyn ObjectRule>>,
    group_rules: Vec<Box<dyn GroupRule>>,
    hooks: Vec<Box<dyn RewriteHook>>,
}

impl RuleSetBuilder {
    pub fn object_rule(mut self, rule: impl ObjectRule + 'static) -> Self {
        self.object_rules.push(Box::new(rule));
        self
    }

    pub fn group_rule(mut self, rule: impl GroupRule + 'static) -> Self {
        self.group_rules.push(Box::new(rule));
        self
    }

    pub fn hook(mut self, hook: impl RewriteHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Append the built-in rules after the custom ones
    pub fn build(mut self, config: &ImportConfig) -> RuleSet {
        self.object_rules.push(Box::new(ShapeRule));
        self.object_rules.push(Box::new(TextRule::new(config.text)));

        self.group_rules.push(Box::new(ButtonRule));
        self.group_rules.push(Box::new(RepeatGridRule));
        self.group_rules.push(Box::new(ScrollRule::new(
            config.spacer_policy,
            config.spacing_policy,
        )));

        RuleSet {
            object_rules: self.object_rules,
            group_rules: self.group_rules,
            hooks: self.hooks,
        }
    }
}

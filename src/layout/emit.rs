//! Emission pass - top-down element and asset emission
//!
//! Elements receive identities in pre-order from a counter starting at 1;
//! the artboard root is always element 0. Group rules thread the working
//! children list through in registration order, and only the final list is
//! emitted.

use std::collections::BTreeMap;

use crate::document::ResolvedNode;
use crate::output::{Asset, AssetList, AnchorX, AnchorY, Component, Element, ElementId};
use crate::rules::RuleSet;

use super::anchor::{anchor_x, anchor_y};
use super::error::{LayoutError, Pass};
use super::size::SizeTable;
use super::types::{Point, Size};

/// Identity of the artboard root element
pub const ROOT_ID: ElementId = 0;

/// Flat element map and deduplicated assets of one artboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emission {
    pub elements: BTreeMap<ElementId, Element>,
    pub assets: Vec<Asset>,
}

/// State of one artboard's emission pass
pub struct Emitter<'a> {
    rules: &'a RuleSet,
    sizes: &'a SizeTable,
    next_id: ElementId,
    elements: BTreeMap<ElementId, Element>,
    assets: AssetList,
}

impl<'a> Emitter<'a> {
    pub fn new(rules: &'a RuleSet, sizes: &'a SizeTable) -> Self {
        Self {
            rules,
            sizes,
            next_id: ROOT_ID + 1,
            elements: BTreeMap::new(),
            assets: AssetList::new(),
        }
    }

    /// Emit sibling nodes, returning their identities in order
    pub fn emit_all(&mut self, nodes: &[ResolvedNode]) -> Result<Vec<ElementId>, LayoutError> {
        let mut ids = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = self.emit_node(node).inspect_err(|_| {
                log::error!(
                    "failed to emit '{}' (id: {:?}, guid: {:?})",
                    node.simple_name(),
                    node.id,
                    node.guid
                );
            })?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Emit one node and its subtree, returning the node's identity
    pub fn emit_node(&mut self, node: &ResolvedNode) -> Result<ElementId, LayoutError> {
        let id = self.next_id;
        self.next_id += 1;

        let rect = self.sizes.get(node)?;
        let center = rect.center();
        let position = Point::new(center.x, -center.y);
        let size = rect.size();

        let (components, children) = if let Some(rule) = self.rules.object_rule_for(node) {
            let output = rule.emit(node, size)?;
            self.assets.extend(output.assets);
            let children = self.emit_all(node.children())?;
            (output.components, children)
        } else if node.is_group() {
            let mut components = Vec::new();
            let mut working = node.children().to_vec();
            for rule in self.rules.group_rules_for(node) {
                let output = rule.emit(node, working, self.sizes)?;
                components.extend(output.components);
                self.assets.extend(output.assets);
                working = output.children;
            }
            let children = self.emit_all(&working)?;
            (components, children)
        } else {
            return Err(LayoutError::unknown_kind(node, Pass::Emission));
        };

        let constraints = node.constraints();
        self.record(Element {
            id,
            name: node.simple_name().to_string(),
            position,
            size,
            anchor_x: anchor_x(constraints),
            anchor_y: anchor_y(constraints),
            visible: node.is_visible(),
            components,
            children,
        });
        Ok(id)
    }

    /// Emit the artboard root (element 0) above `children`
    pub fn emit_root(&mut self, name: &str, size: Size, children: Vec<ElementId>) -> ElementId {
        self.record(Element {
            id: ROOT_ID,
            name: name.to_string(),
            position: Point::zero(),
            size,
            anchor_x: AnchorX::Center,
            anchor_y: AnchorY::Middle,
            visible: true,
            components: Vec::<Component>::new(),
            children,
        });
        ROOT_ID
    }

    fn record(&mut self, element: Element) {
        self.elements.insert(element.id, element);
    }

    pub fn finish(self) -> Emission {
        Emission {
            elements: self.elements,
            assets: self.assets.into_vec(),
        }
    }
}

/// Emit an artboard's resolved top-level nodes beneath a root element
pub fn emit_artboard(
    name: &str,
    size: Size,
    nodes: &[ResolvedNode],
    sizes: &SizeTable,
    rules: &RuleSet,
) -> Result<Emission, LayoutError> {
    let mut emitter = Emitter::new(rules, sizes);
    let children = emitter.emit_all(nodes)?;
    emitter.emit_root(name, size, children);
    Ok(emitter.finish())
}

//! Size pass - bottom-up rect computation
//!
//! Children are sized before their parent. Each node's absolute position is
//! its translation plus the parent's accumulated position; the artboard
//! recentering offset is added to the node's own position only after its
//! children have been visited. Once a group's rect is known, its children's
//! rects are re-expressed relative to the group's center.

use std::collections::HashMap;

use crate::document::ResolvedNode;
use crate::rules::RuleSet;

use super::error::{LayoutError, Pass};
use super::types::{BoundingBox, Point};

/// Rect of every resolved node, keyed by node identity
#[derive(Debug, Clone, Default)]
pub struct SizeTable {
    rects: HashMap<String, BoundingBox>,
}

impl SizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &ResolvedNode) -> Result<BoundingBox, LayoutError> {
        self.rects
            .get(node.key())
            .copied()
            .ok_or_else(|| LayoutError::missing_size(node))
    }

    pub fn set(&mut self, node: &ResolvedNode, rect: BoundingBox) {
        self.rects.insert(node.key().to_string(), rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// State of one artboard's size pass
pub struct SizePass<'a> {
    rules: &'a RuleSet,
    /// Moves top-left-origin artboard coordinates onto the artboard center
    offset: Point,
    table: SizeTable,
}

impl<'a> SizePass<'a> {
    pub fn new(rules: &'a RuleSet, offset: Point) -> Self {
        Self {
            rules,
            offset,
            table: SizeTable::new(),
        }
    }

    /// Size sibling nodes under a parent at `parent`
    pub fn size_all(
        &mut self,
        nodes: &[ResolvedNode],
        parent: Point,
    ) -> Result<Vec<BoundingBox>, LayoutError> {
        nodes.iter().map(|node| self.size_node(node, parent)).collect()
    }

    /// Size one node and its subtree, returning the node's rect
    pub fn size_node(
        &mut self,
        node: &ResolvedNode,
        parent: Point,
    ) -> Result<BoundingBox, LayoutError> {
        let (tx, ty) = node.translation();
        let absolute = Point::new(parent.x + tx, parent.y + ty);

        let child_rects = if node.is_group() {
            self.size_all(node.children(), absolute)?
        } else {
            Vec::new()
        };

        let position = absolute.offset(self.offset);

        if let Some(rule) = self.rules.object_rule_for(node) {
            let rect = rule.size(node, position);
            self.table.set(node, rect);
            return Ok(rect);
        }

        if !node.is_group() {
            return Err(LayoutError::unknown_kind(node, Pass::Size));
        }

        let mut rect = BoundingBox::envelope(&child_rects).unwrap_or_else(|| BoundingBox::at(position));
        for rule in self.rules.group_rules_for(node) {
            rect = rule.size(node, position, rect);
        }
        self.table.set(node, rect);

        let center = rect.center();
        for (child, child_rect) in node.children().iter().zip(&child_rects) {
            self.table.set(child, child_rect.relative_to(center));
        }

        Ok(rect)
    }

    pub fn into_table(self) -> SizeTable {
        self.table
    }
}

/// Compute the size table for an artboard's resolved top-level nodes
pub fn compute_sizes(
    nodes: &[ResolvedNode],
    offset: Point,
    rules: &RuleSet,
) -> Result<SizeTable, LayoutError> {
    let mut pass = SizePass::new(rules, offset);
    pass.size_all(nodes, Point::zero())?;
    Ok(pass.into_table())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportConfig;
    use crate::document::{NodeKind, RawNode, ShapeGeometry, ShapePrimitive, Transform};

    fn rect(id: &str, tx: f64, ty: f64, width: f64, height: f64) -> RawNode {
        RawNode {
            id: Some(id.to_string()),
            transform: Some(Transform { tx, ty }),
            shape: Some(ShapeGeometry {
                primitive: ShapePrimitive::Rect {
                    x: 0.0,
                    y: 0.0,
                    width,
                    height,
                },
                winding: None,
            }),
            ..RawNode::new(NodeKind::Rect)
        }
    }

    fn group(id: &str, tx: f64, ty: f64, children: Vec<RawNode>) -> RawNode {
        let mut node = RawNode {
            id: Some(id.to_string()),
            transform: Some(Transform { tx, ty }),
            ..RawNode::new(NodeKind::Group)
        };
        node.set_children(children);
        node
    }

    fn table_for(nodes: &[RawNode], offset: Point) -> SizeTable {
        let rules = RuleSet::builtin(&ImportConfig::default());
        compute_sizes(nodes, offset, &rules).unwrap()
    }

    #[test]
    fn test_leaf_gets_recentered_position() {
        let nodes = [rect("a", 10.0, 20.0, 30.0, 40.0)];
        let table = table_for(&nodes, Point::new(-50.0, -50.0));
        assert_eq!(
            table.get(&nodes[0]).unwrap(),
            BoundingBox::new(-40.0, -30.0, 30.0, 40.0)
        );
    }

    #[test]
    fn test_group_is_envelope_of_children() {
        let nodes = [group(
            "g",
            100.0,
            100.0,
            vec![rect("a", 0.0, 0.0, 10.0, 10.0), rect("b", 20.0, 30.0, 10.0, 10.0)],
        )];
        let table = table_for(&nodes, Point::zero());

        assert_eq!(
            table.get(&nodes[0]).unwrap(),
            BoundingBox::from_min_max(100.0, 100.0, 130.0, 140.0)
        );
        // children are stored relative to the group's center (115, 120)
        let children = nodes[0].children();
        assert_eq!(
            table.get(&children[0]).unwrap(),
            BoundingBox::new(-15.0, -20.0, 10.0, 10.0)
        );
        assert_eq!(
            table.get(&children[1]).unwrap(),
            BoundingBox::new(5.0, 10.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_offset_applies_once_through_nesting() {
        let nodes = [group(
            "outer",
            0.0,
            0.0,
            vec![group("inner", 10.0, 0.0, vec![rect("a", 5.0, 0.0, 2.0, 2.0)])],
        )];
        let table = table_for(&nodes, Point::new(-100.0, 0.0));
        assert_eq!(
            table.get(&nodes[0]).unwrap(),
            BoundingBox::new(-85.0, 0.0, 2.0, 2.0)
        );
    }

    #[test]
    fn test_empty_group_is_zero_sized_at_position() {
        let nodes = [group("g", 7.0, 9.0, vec![])];
        let table = table_for(&nodes, Point::zero());
        assert_eq!(table.get(&nodes[0]).unwrap(), BoundingBox::new(7.0, 9.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_kind_fails() {
        let rules = RuleSet::builtin(&ImportConfig::default());
        let node = RawNode {
            id: Some("orphan".to_string()),
            ..RawNode::new(NodeKind::SymbolReference)
        };
        let err = compute_sizes(&[node], Point::zero(), &rules).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::UnknownNodeKind {
                pass: Pass::Size,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_size_lookup() {
        let table = SizeTable::new();
        assert!(table.is_empty());
        assert!(matches!(
            table.get(&RawNode::new(NodeKind::Rect)),
            Err(LayoutError::MissingSize { .. })
        ));
    }
}

//! Constraint flags to anchor behavior

use crate::document::Constraints;
use crate::output::{AnchorX, AnchorY};

/// Horizontal anchor from a node's own left/right constraints
pub fn anchor_x(constraints: Constraints) -> AnchorX {
    match (constraints.left, constraints.right) {
        (true, true) => AnchorX::Stretch,
        (false, true) => AnchorX::Right,
        (true, false) => AnchorX::Left,
        (false, false) => AnchorX::Center,
    }
}

/// Vertical anchor from a node's own top/bottom constraints
pub fn anchor_y(constraints: Constraints) -> AnchorY {
    match (constraints.top, constraints.bottom) {
        (true, true) => AnchorY::Stretch,
        (true, false) => AnchorY::Top,
        (false, true) => AnchorY::Bottom,
        (false, false) => AnchorY::Middle,
    }
}

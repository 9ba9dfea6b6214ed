//! Size and emission passes over a resolved node tree
//!
//! The size pass walks the tree bottom-up and records one rect per node,
//! relative to its parent's center. The emission pass walks top-down and
//! turns each node into an [`Element`](crate::output::Element).

pub mod anchor;
pub mod emit;
pub mod error;
pub mod size;
pub mod types;

pub use anchor::{anchor_x, anchor_y};
pub use emit::{emit_artboard, Emission, Emitter, ROOT_ID};
pub use error::{LayoutError, Pass};
pub use size::{compute_sizes, SizePass, SizeTable};
pub use types::*;

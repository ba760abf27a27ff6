//! Binary Space Partitioning tree for painter's-algorithm ordering.
//!
//! The tree is built once from a polygon list: the first polygon becomes the
//! root and every following polygon is pushed down from the root, split by any
//! node plane it straddles. Traversal from a viewer position yields the
//! polygons back to front.
//!
//! # Example
//!
//! ```ignore
//! use bsp_painter::{BspTree, CollectingVisitor};
//! use nalgebra::Point3;
//!
//! let tree = BspTree::build(&polygons, &mut vertices);
//!
//! let viewer = Point3::new(0.0, 0.0, -5.0);
//! let ordered = tree.traverse(viewer, &vertices);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: arena of nodes plus the root handle
//! - [`BspNode`]: one splitting polygon and up to two child handles
//! - [`BspVisitor`]: visitor trait for custom traversal behavior
//!
//! Node planes are never cached. They are derived from the node's polygon on
//! every descent, from whatever the shared vertex buffer currently holds.

mod node;
mod tree;
mod visitor;

pub use node::{BspNode, NodeId};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};

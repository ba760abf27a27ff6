//! BSP tree node implementation.

use crate::{Plane, Polygon, VertexBuffer};

/// Handle to a node stored in a [`BspTree`](super::BspTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A node in the BSP tree.
///
/// Each node owns exactly one polygon whose plane partitions the space of its
/// subtree. Children are referenced by handle into the owning tree's arena and
/// are never shared between parents.
#[derive(Debug, Clone)]
pub struct BspNode {
    polygon: Polygon,

    /// Subtree of polygons in FRONT of this node's plane.
    front: Option<NodeId>,

    /// Subtree of polygons BEHIND this node's plane.
    back: Option<NodeId>,
}

impl BspNode {
    /// Creates a leaf node for `polygon`.
    pub fn new(polygon: Polygon) -> Self {
        Self {
            polygon,
            front: None,
            back: None,
        }
    }

    /// Returns the splitting polygon.
    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Derives the splitting plane from the polygon's current vertices.
    #[inline]
    pub fn plane(&self, buffer: &VertexBuffer) -> Plane {
        self.polygon.plane(buffer)
    }

    #[inline]
    pub fn front(&self) -> Option<NodeId> {
        self.front
    }

    #[inline]
    pub fn back(&self) -> Option<NodeId> {
        self.back
    }

    #[inline]
    pub(crate) fn set_front(&mut self, node: NodeId) {
        self.front = Some(node);
    }

    #[inline]
    pub(crate) fn set_back(&mut self, node: NodeId) {
        self.back = Some(node);
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn new_node_is_leaf() {
        let node = BspNode::new(Polygon::new(vec![]));
        assert!(node.is_leaf());
        assert!(node.front().is_none());
        assert!(node.back().is_none());
    }

    #[test]
    fn set_children_updates_leaf_status() {
        let mut node = BspNode::new(Polygon::new(vec![]));

        node.set_front(NodeId(1));
        assert!(!node.is_leaf());
        assert_eq!(node.front(), Some(NodeId(1)));

        node.set_back(NodeId(2));
        assert_eq!(node.back(), Some(NodeId(2)));
    }

    #[test]
    fn plane_tracks_moved_vertices() {
        let mut buffer = VertexBuffer::new();
        let ids = vec![
            buffer.push(Point3::new(0.0, 0.0, 0.0)),
            buffer.push(Point3::new(1.0, 0.0, 0.0)),
            buffer.push(Point3::new(0.0, 1.0, 0.0)),
        ];
        let node = BspNode::new(Polygon::new(ids));

        assert_eq!(node.plane(&buffer).point(), Point3::new(0.0, 0.0, 0.0));
        buffer.translate(Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(node.plane(&buffer).point(), Point3::new(0.0, 0.0, 2.0));
    }
}

//! BSP tree container, construction and traversal.

use log::debug;
use nalgebra::Point3;

use crate::{Polygon, VertexBuffer};

use super::node::{BspNode, NodeId};
use super::visitor::{BspVisitor, CollectingVisitor};

/// A Binary Space Partitioning tree of convex polygons.
///
/// Nodes are stored in an arena and linked by [`NodeId`], so neither building
/// nor traversing recurses and deep trees cannot exhaust the stack.
///
/// # Construction
///
/// The first polygon becomes the root. Each later polygon descends from the
/// root: wholly in front of a node's plane goes to the front subtree, wholly
/// behind goes to the back subtree, and anything else is split by that plane
/// with each part continuing down its own side. No splitter heuristic is
/// applied, so the worst case is quadratic in the number of polygons.
///
/// The tree is built once. Its topology is never revised when the shared
/// vertex buffer is later moved or rotated; only the node planes follow the
/// vertices, because they are re-derived on every descent.
///
/// # Traversal
///
/// ```ignore
/// let ordered = tree.traverse(viewer, &vertices);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    root: Option<NodeId>,
}

/// One unit of pending work during traversal.
enum Step {
    Enter(NodeId),
    Emit(NodeId),
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a BSP tree by inserting `polygons` in order.
    ///
    /// Intersection vertices created by splits are appended to `buffer`.
    /// Returns an empty tree if the input is empty.
    pub fn build(polygons: &[Polygon], buffer: &mut VertexBuffer) -> Self {
        let mut tree = Self::new();
        for polygon in polygons {
            tree.insert(polygon.clone(), buffer);
        }
        debug!(
            "built BSP tree: {} input polygons, {} nodes, depth {}",
            polygons.len(),
            tree.len(),
            tree.depth()
        );
        tree
    }

    /// Inserts one polygon, splitting it as it descends.
    pub fn insert(&mut self, polygon: Polygon, buffer: &mut VertexBuffer) {
        let Some(root) = self.root else {
            self.root = Some(self.push_node(polygon));
            return;
        };

        let mut pending = vec![(root, polygon)];
        while let Some((start, polygon)) = pending.pop() {
            self.descend(start, polygon, buffer, &mut pending);
        }
    }

    /// Pushes `polygon` down from `start` until it lands in an empty slot or
    /// straddles a plane. Split parts that still have to descend are queued.
    fn descend(
        &mut self,
        start: NodeId,
        polygon: Polygon,
        buffer: &mut VertexBuffer,
        pending: &mut Vec<(NodeId, Polygon)>,
    ) {
        let mut current = start;
        loop {
            let node = &self.nodes[current.0];
            let plane = node.plane(buffer);

            if polygon.is_wholly_in_front(&plane, buffer) {
                match node.front() {
                    Some(next) => current = next,
                    None => {
                        let id = self.push_node(polygon);
                        self.nodes[current.0].set_front(id);
                        return;
                    }
                }
            } else if polygon.is_wholly_behind(&plane, buffer) {
                match node.back() {
                    Some(next) => current = next,
                    None => {
                        let id = self.push_node(polygon);
                        self.nodes[current.0].set_back(id);
                        return;
                    }
                }
            } else {
                let (front_part, back_part) = polygon.split(&plane, buffer);
                match self.nodes[current.0].back() {
                    Some(next) => pending.push((next, back_part)),
                    None => {
                        let id = self.push_node(back_part);
                        self.nodes[current.0].set_back(id);
                    }
                }
                match self.nodes[current.0].front() {
                    Some(next) => pending.push((next, front_part)),
                    None => {
                        let id = self.push_node(front_part);
                        self.nodes[current.0].set_front(id);
                    }
                }
                return;
            }
        }
    }

    fn push_node(&mut self, polygon: Polygon) -> NodeId {
        self.nodes.push(BspNode::new(polygon));
        NodeId(self.nodes.len() - 1)
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes, which equals the number of stored polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the root handle, if any.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node for a handle.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &BspNode {
        &self.nodes[id.0]
    }

    /// Iterates over every stored polygon in insertion order.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.nodes.iter().map(BspNode::polygon)
    }

    /// Returns the maximum depth of the tree (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node(id);
            stack.extend(node.front().map(|n| (n, depth + 1)));
            stack.extend(node.back().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// Returns the polygons ordered back to front as seen from `viewer`.
    pub fn traverse(&self, viewer: Point3<f32>, buffer: &VertexBuffer) -> Vec<&Polygon> {
        let mut visitor = CollectingVisitor::new();
        self.traverse_with(viewer, buffer, &mut visitor);
        visitor.into_polygons()
    }

    /// Visits every polygon once, back to front as seen from `viewer`.
    ///
    /// At each node `d = (plane.point - viewer) · plane.normal`. When `d > 0`
    /// the viewer is behind the plane, so the front subtree is emitted first,
    /// then the node's polygon, then the back subtree. Otherwise (viewer in
    /// front or on the plane) the order is back, node, front.
    pub fn traverse_with<'a, V: BspVisitor<'a>>(
        &'a self,
        viewer: Point3<f32>,
        buffer: &VertexBuffer,
        visitor: &mut V,
    ) {
        let mut stack: Vec<Step> = self.root.map(Step::Enter).into_iter().collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(id) => visitor.visit(self.node(id).polygon()),
                Step::Enter(id) => {
                    let node = self.node(id);
                    let plane = node.plane(buffer);
                    let d = (plane.point() - viewer).dot(&plane.normal());

                    let (first, second) = if d > 0.0 {
                        (node.front(), node.back())
                    } else {
                        (node.back(), node.front())
                    };

                    // Pushed in reverse so `first` is processed first.
                    stack.extend(second.map(Step::Enter));
                    stack.push(Step::Emit(id));
                    stack.extend(first.map(Step::Enter));
                }
            }
        }
    }
}

//! Visitor pattern for BSP tree traversal.
//!
//! Visitors allow custom processing of polygons during tree traversal
//! without coupling traversal logic to specific use cases.

use crate::Polygon;

/// Visitor for processing polygons during BSP tree traversal.
///
/// Common uses include:
/// - Rendering (painter's algorithm)
/// - Collecting polygons in sorted order
pub trait BspVisitor<'a> {
    /// Called once per node, in traversal order.
    fn visit(&mut self, polygon: &'a Polygon);
}

/// A simple visitor that collects references to all visited polygons.
#[derive(Debug, Default)]
pub struct CollectingVisitor<'a> {
    collected: Vec<&'a Polygon>,
}

impl<'a> CollectingVisitor<'a> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected polygons.
    pub fn into_polygons(self) -> Vec<&'a Polygon> {
        self.collected
    }

    /// Returns a reference to the collected polygons.
    pub fn polygons(&self) -> &[&'a Polygon] {
        &self.collected
    }
}

impl<'a> BspVisitor<'a> for CollectingVisitor<'a> {
    fn visit(&mut self, polygon: &'a Polygon) {
        self.collected.push(polygon);
    }
}

/// A visitor that calls a closure for each polygon.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<'a, F> BspVisitor<'a> for FnVisitor<F>
where
    F: FnMut(&'a Polygon),
{
    fn visit(&mut self, polygon: &'a Polygon) {
        (self.func)(polygon);
    }
}

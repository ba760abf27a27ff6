//! Shared vertex storage.
//!
//! Every polygon in a scene refers to its corners by [`VertexId`] into a single
//! [`VertexBuffer`]. Moving or rotating the buffer therefore moves every polygon
//! that shares a vertex, the same way a scene file's `v` lines are shared by
//! its `p` lines.

use nalgebra::{Matrix4, Point3, Vector3};

/// Handle to a vertex stored in a [`VertexBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Returns the zero-based position of the vertex in its buffer.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Indexed store of scene vertices.
///
/// Vertices are kept as `Point3<f32>`; the homogeneous coordinate `w` is
/// implicitly 1 and is only materialized while a 4x4 transform is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    points: Vec<Point3<f32>>,
}

impl VertexBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its handle.
    pub fn push(&mut self, point: Point3<f32>) -> VertexId {
        self.points.push(point);
        VertexId(self.points.len() - 1)
    }

    /// Returns the handle for a zero-based index if it is in range.
    pub fn id(&self, index: usize) -> Option<VertexId> {
        (index < self.points.len()).then_some(VertexId(index))
    }

    /// Returns the position of a vertex.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this buffer.
    #[inline]
    pub fn get(&self, id: VertexId) -> Point3<f32> {
        self.points[id.0]
    }

    /// Returns the positions of several vertices, in order.
    pub fn positions(&self, ids: &[VertexId]) -> Vec<Point3<f32>> {
        ids.iter().map(|&id| self.get(id)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f32>> {
        self.points.iter()
    }

    /// Adds `offset` to every vertex.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for point in &mut self.points {
            *point += offset;
        }
    }

    /// Multiplies every vertex, as a homogeneous vector, by `matrix`.
    ///
    /// The result is divided by its `w` component before being stored so the
    /// buffer only ever holds points with `w = 1`.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for point in &mut self.points {
            *point = apply_homogeneous(matrix, *point);
        }
    }
}

/// Multiplies `point` (with `w = 1`) by `matrix` and re-normalizes to `w = 1`.
///
/// A zero `w` yields non-finite coordinates; nothing here clamps them.
pub fn apply_homogeneous(matrix: &Matrix4<f32>, point: Point3<f32>) -> Point3<f32> {
    let v = matrix * point.to_homogeneous();
    Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
}

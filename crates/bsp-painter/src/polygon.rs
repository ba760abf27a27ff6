//! Convex planar polygons over a shared vertex buffer.

use nalgebra::{Point3, Vector3};

use crate::{Plane, VertexBuffer, VertexId};

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A convex polygon in 3D space, defined by an ordered list of vertex handles.
///
/// The last edge wraps from the final vertex back to the first. Vertices are
/// assumed coplanar; the winding of the first three decides the normal
/// direction. Polygons produced by [`Polygon::split`] may have fewer than three
/// vertices, so nothing here assumes a minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<VertexId>,
    color: Color,
}

impl Polygon {
    /// Creates a white polygon from vertex handles.
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self {
            vertices,
            color: Color::default(),
        }
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the current positions of the polygon's vertices.
    pub fn points(&self, buffer: &VertexBuffer) -> Vec<Point3<f32>> {
        buffer.positions(&self.vertices)
    }

    /// Returns the plane through the first three vertices.
    ///
    /// The plane point is the first vertex and the normal is
    /// `(v1 - v0) × (v2 - v0)`. Polygons with fewer than three vertices, like
    /// collinear ones, yield a zero normal.
    pub fn plane(&self, buffer: &VertexBuffer) -> Plane {
        match self.vertices[..] {
            [a, b, c, ..] => Plane::from_three_points(buffer.get(a), buffer.get(b), buffer.get(c)),
            [a, ..] => Plane::new(buffer.get(a), Vector3::zeros()),
            [] => Plane::new(Point3::origin(), Vector3::zeros()),
        }
    }

    /// Computes the average of the vertices.
    pub fn centroid(&self, buffer: &VertexBuffer) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|&id| buffer.get(id).coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Returns `(min_x, min_y, max_x, max_y)` over the vertices.
    pub fn bounding_rect(&self, buffer: &VertexBuffer) -> (f32, f32, f32, f32) {
        self.vertices.iter().map(|&id| buffer.get(id)).fold(
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    /// Returns `true` if no vertex has a negative signed distance to `plane`.
    pub fn is_wholly_in_front(&self, plane: &Plane, buffer: &VertexBuffer) -> bool {
        self.vertices
            .iter()
            .all(|&id| plane.signed_distance(buffer.get(id)) >= 0.0)
    }

    /// Returns `true` if no vertex has a positive signed distance to `plane`.
    ///
    /// Not the complement of [`Polygon::is_wholly_in_front`]: a polygon lying in
    /// the plane satisfies both.
    pub fn is_wholly_behind(&self, plane: &Plane, buffer: &VertexBuffer) -> bool {
        self.vertices
            .iter()
            .all(|&id| plane.signed_distance(buffer.get(id)) <= 0.0)
    }

    /// Splits the polygon by `plane` into `(front, back)`.
    ///
    /// Walks the edges starting from the wrap-around edge (last vertex to
    /// first). When an edge crosses the plane the intersection is appended to
    /// the buffer and shared by both halves; vertices exactly on the plane go
    /// to both halves. Both halves keep this polygon's color.
    pub fn split(&self, plane: &Plane, buffer: &mut VertexBuffer) -> (Polygon, Polygon) {
        let n = self.vertices.len();
        let mut front = Vec::with_capacity(n + 1);
        let mut back = Vec::with_capacity(n + 1);

        let Some(&last_id) = self.vertices.last() else {
            return (self.with_vertices(front), self.with_vertices(back));
        };
        let mut last = buffer.get(last_id);
        let mut last_dot = plane.signed_distance(last);

        for &id in &self.vertices {
            let current = buffer.get(id);
            let dot = plane.signed_distance(current);

            if last_dot * dot < 0.0 {
                let t = -last_dot / (dot - last_dot);
                let intersection = buffer.push(last + (current - last) * t);
                front.push(intersection);
                back.push(intersection);
            }
            if dot >= 0.0 {
                front.push(id);
            }
            if dot <= 0.0 {
                back.push(id);
            }

            last = current;
            last_dot = dot;
        }

        (self.with_vertices(front), self.with_vertices(back))
    }

    fn with_vertices(&self, vertices: Vec<VertexId>) -> Polygon {
        Polygon {
            vertices,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad(buffer: &mut VertexBuffer, corners: [[f32; 3]; 4]) -> Polygon {
        let ids = corners
            .iter()
            .map(|c| buffer.push(Point3::new(c[0], c[1], c[2])))
            .collect();
        Polygon::new(ids)
    }

    fn x_plane(x: f32) -> Plane {
        Plane::new(Point3::new(x, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn default_color_is_white() {
        let poly = Polygon::new(vec![]);
        assert_eq!(poly.color(), Color::WHITE);
    }

    #[test]
    fn plane_from_first_three_vertices() {
        let mut buffer = VertexBuffer::new();
        let poly = quad(
            &mut buffer,
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        );
        let plane = poly.plane(&buffer);

        assert_eq!(plane.point(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn short_polygon_has_degenerate_plane() {
        let mut buffer = VertexBuffer::new();
        let a = buffer.push(Point3::new(1.0, 2.0, 3.0));
        let b = buffer.push(Point3::new(4.0, 5.0, 6.0));
        let plane = Polygon::new(vec![a, b]).plane(&buffer);
        assert!(plane.is_degenerate());
    }

    #[test]
    fn centroid_and_bounds() {
        let mut buffer = VertexBuffer::new();
        let poly = quad(
            &mut buffer,
            [[0.0, 0.0, 1.0], [2.0, 0.0, 1.0], [2.0, 4.0, 1.0], [0.0, 4.0, 1.0]],
        );

        assert_relative_eq!(poly.centroid(&buffer), Point3::new(1.0, 2.0, 1.0));
        assert_eq!(poly.bounding_rect(&buffer), (0.0, 0.0, 2.0, 4.0));
    }

    #[test]
    fn coplanar_polygon_is_both_in_front_and_behind() {
        let mut buffer = VertexBuffer::new();
        let poly = quad(
            &mut buffer,
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
        );
        let plane = x_plane(0.0);

        assert!(poly.is_wholly_in_front(&plane, &buffer));
        assert!(poly.is_wholly_behind(&plane, &buffer));
    }

    #[test]
    fn split_wholly_in_front_is_a_no_op() {
        let mut buffer = VertexBuffer::new();
        let poly = quad(
            &mut buffer,
            [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
        );
        let before = buffer.len();

        let (front, back) = poly.split(&x_plane(0.0), &mut buffer);

        assert_eq!(front.vertices(), poly.vertices());
        assert!(back.is_empty());
        assert_eq!(buffer.len(), before);
    }

    #[test]
    fn split_straddling_quad() {
        let mut buffer = VertexBuffer::new();
        let poly = quad(
            &mut buffer,
            [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]],
        )
        .with_color(Color::new(10, 20, 30));
        let original = poly.vertices().to_vec();

        let (front, back) = poly.split(&x_plane(0.0), &mut buffer);

        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert_eq!(front.color(), Color::new(10, 20, 30));
        assert_eq!(back.color(), Color::new(10, 20, 30));

        // Intersection vertices are shared and lie on the plane.
        let shared: Vec<VertexId> = front
            .vertices()
            .iter()
            .copied()
            .filter(|id| back.vertices().contains(id))
            .collect();
        assert_eq!(shared.len(), 2);
        for id in &shared {
            assert_eq!(buffer.get(*id).x, 0.0);
            assert!(!original.contains(id));
        }

        // Non-shared vertices reconstruct the original, each exactly once.
        let mut rest: Vec<VertexId> = front
            .vertices()
            .iter()
            .chain(back.vertices())
            .copied()
            .filter(|id| !shared.contains(id))
            .collect();
        rest.sort();
        let mut expected = original.clone();
        expected.sort();
        assert_eq!(rest, expected);

        // Both halves stay planar: every vertex has z == 0.
        for id in front.vertices().iter().chain(back.vertices()) {
            assert_eq!(buffer.get(*id).z, 0.0);
        }
        // And both face the same way as the original.
        assert_eq!(front.plane(&buffer).normal().z.signum(), 1.0);
        assert_eq!(back.plane(&buffer).normal().z.signum(), 1.0);
    }

    #[test]
    fn split_interpolates_intersection() {
        let mut buffer = VertexBuffer::new();
        let a = buffer.push(Point3::new(-1.0, 0.0, 0.0));
        let b = buffer.push(Point3::new(3.0, 0.0, 0.0));
        let c = buffer.push(Point3::new(3.0, 4.0, 0.0));
        let poly = Polygon::new(vec![a, b, c]);

        let (front, back) = poly.split(&x_plane(0.0), &mut buffer);

        // Edge c->a crosses at t = 0.75 from c, edge a->b at t = 0.25 from a.
        assert_eq!(back.len(), 3);
        assert_eq!(front.len(), 4);
        let back_points = back.points(&buffer);
        assert_relative_eq!(back_points[0], Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(back_points[1], Point3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(back_points[2], Point3::new(0.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn split_through_vertices_duplicates_on_plane_vertices() {
        let mut buffer = VertexBuffer::new();
        // Diamond whose top and bottom corners lie on x = 0.
        let poly = quad(
            &mut buffer,
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
        );
        let before = buffer.len();

        let (front, back) = poly.split(&x_plane(0.0), &mut buffer);

        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 3);
        assert_eq!(buffer.len(), before, "no edge strictly crosses the plane");
    }

    #[test]
    fn split_tolerates_tiny_sliver() {
        let mut buffer = VertexBuffer::new();
        let a = buffer.push(Point3::new(0.0, 0.0, 0.0));
        let b = buffer.push(Point3::new(-1.0, 0.0, 0.0));
        let c = buffer.push(Point3::new(-1.0, 1.0, 0.0));
        let poly = Polygon::new(vec![a, b, c]);

        let (front, back) = poly.split(&x_plane(0.0), &mut buffer);

        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 3);
    }
}

//! Splitting planes for BSP construction and traversal.

use nalgebra::{Point3, Vector3, Vector4};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Positive side of the normal
    Front,
    /// Negative side of the normal
    Back,
    /// Signed distance is exactly zero
    OnPlane,
}

/// An infinite plane given by a point on it and a normal.
///
/// The normal is deliberately left unnormalized: only the sign of
/// [`Plane::signed_distance`] matters to callers. A plane built from collinear
/// points has a zero normal and reports every point as [`PlaneSide::OnPlane`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3<f32>,
    normal: Vector3<f32>,
}

impl Plane {
    /// Creates a plane from a point on the plane and a normal vector.
    pub fn new(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { point, normal }
    }

    /// Creates a plane through `a` with normal `(b - a) × (c - a)`.
    ///
    /// The normal direction follows the right-hand rule, so the winding of the
    /// three points decides which side is the front.
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self { point: a, normal }
    }

    #[inline]
    pub fn point(&self) -> Point3<f32> {
        self.point
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns `true` if the normal is the zero vector.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    /// Returns `(a, b, c, d)` such that `aX + bY + cZ + d = 0` on the plane.
    pub fn coefficients(&self) -> Vector4<f32> {
        let d = -self.normal.dot(&self.point.coords);
        Vector4::new(self.normal.x, self.normal.y, self.normal.z, d)
    }

    /// Computes `(vertex - point) · normal`.
    ///
    /// - Positive: vertex is in front (same side as normal)
    /// - Negative: vertex is behind
    /// - Zero: vertex is on the plane
    #[inline]
    pub fn signed_distance(&self, vertex: Point3<f32>) -> f32 {
        (vertex - self.point).dot(&self.normal)
    }

    /// Classifies which side of the plane a point lies on, with no tolerance.
    pub fn side_of(&self, vertex: Point3<f32>) -> PlaneSide {
        let dist = self.signed_distance(vertex);
        if dist > 0.0 {
            PlaneSide::Front
        } else if dist < 0.0 {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }
}

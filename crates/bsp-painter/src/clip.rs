//! Near-plane clipping in world space.
//!
//! Geometry is kept where `z >= near`. Edges that cross the plane are cut at
//! the point where `z == near` exactly, with `x` and `y` linearly interpolated.

use nalgebra::Point3;

/// Clips a closed polygon against the plane `z = near`.
///
/// Each edge `(v1, v2)` is handled by one of four cases:
/// - both inside: keep `v2`
/// - both outside: drop the edge
/// - leaving (`v1` inside, `v2` outside): emit the intersection
/// - entering (`v1` outside, `v2` inside): emit the intersection, then `v2`
///
/// Edges are walked starting with the wrap-around edge, so a polygon that is
/// entirely inside comes back unchanged. The result may have fewer than three
/// vertices; callers must skip drawing it then.
pub fn clip_polygon(points: &[Point3<f32>], near: f32) -> Vec<Point3<f32>> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };

    let mut clipped = Vec::with_capacity(points.len() + 1);
    let mut v1 = last;
    for &v2 in points {
        match (v1.z >= near, v2.z >= near) {
            (true, true) => clipped.push(v2),
            (false, false) => {}
            (true, false) => clipped.push(intersect_near(v1, v2, near)),
            (false, true) => {
                clipped.push(intersect_near(v1, v2, near));
                clipped.push(v2);
            }
        }
        v1 = v2;
    }
    clipped
}

/// Clips a line segment against the plane `z = near`.
///
/// Returns `None` when both endpoints are behind the plane. An endpoint behind
/// the plane is replaced by the intersection point.
pub fn clip_segment(
    a: Point3<f32>,
    b: Point3<f32>,
    near: f32,
) -> Option<(Point3<f32>, Point3<f32>)> {
    match (a.z >= near, b.z >= near) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (true, false) => Some((a, intersect_near(a, b, near))),
        (false, true) => Some((intersect_near(a, b, near), b)),
    }
}

fn intersect_near(v1: Point3<f32>, v2: Point3<f32>, near: f32) -> Point3<f32> {
    let t = (near - v1.z) / (v2.z - v1.z);
    Point3::new(v1.x + t * (v2.x - v1.x), v1.y + t * (v2.y - v1.y), near)
}

//! Stationary camera: projection to screen space and world transform commands.
//!
//! The camera never moves. Movement and rotation commands are applied to every
//! vertex of the world instead, so the eye stays at the origin.

use log::trace;
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::clip;
use crate::projection::Projection;
use crate::VertexBuffer;

/// Tunable camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Pixels per projected unit
    pub scaling_factor: f32,
    /// World units moved per movement command
    pub move_step: f32,
    /// Degrees turned per rotation command
    pub rotation_step: f32,
    /// Degrees of field of view changed per zoom command
    pub zoom_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.01,
            far: 1000.0,
            scaling_factor: 100.0,
            move_step: 0.1,
            rotation_step: 5.0,
            zoom_step: 5.0,
        }
    }
}

/// Projects world points to pixel coordinates and moves the world around it.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Projection,
    matrix: Matrix4<f32>,
    screen_center: Vector2<f32>,
    scaling_factor: f32,
    move_step: f32,
    rotation_step: f32,
    zoom_step: f32,
}

impl Camera {
    /// Creates a camera for a `width` x `height` pixel screen.
    pub fn new(settings: &CameraSettings, width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        let projection =
            Projection::from_degrees(settings.fov, aspect_ratio, settings.near, settings.far);
        Self {
            matrix: projection.matrix(),
            projection,
            screen_center: Vector2::new(width as f32 / 2.0, height as f32 / 2.0),
            scaling_factor: settings.scaling_factor,
            move_step: settings.move_step,
            rotation_step: settings.rotation_step.to_radians(),
            zoom_step: settings.zoom_step.to_radians(),
        }
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Returns the cached projection matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    #[inline]
    pub fn screen_center(&self) -> Point2<f32> {
        Point2::from(self.screen_center)
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.projection.near()
    }

    /// Projects a world point to normalized image coordinates.
    ///
    /// The homogeneous product is divided by its `w`, and the resulting `x`
    /// and `y` are then divided again by the normalized `z`. Points on the
    /// eye plane produce non-finite coordinates, which are passed through.
    pub fn project(&self, point: Point3<f32>) -> Point2<f32> {
        let clip = self.matrix * point.to_homogeneous();
        let normalized = clip / clip.w;
        Point2::new(normalized.x / normalized.z, normalized.y / normalized.z)
    }

    /// Projects a world point to pixel coordinates.
    pub fn project_to_screen(&self, point: Point3<f32>) -> Point2<f32> {
        let projected = self.project(point);
        Point2::from(projected.coords * self.scaling_factor + self.screen_center)
    }

    /// Clips a polygon's points against this camera's near plane.
    pub fn clip_polygon(&self, points: &[Point3<f32>]) -> Vec<Point3<f32>> {
        clip::clip_polygon(points, self.near())
    }

    /// Clips a segment against this camera's near plane.
    pub fn clip_segment(
        &self,
        a: Point3<f32>,
        b: Point3<f32>,
    ) -> Option<(Point3<f32>, Point3<f32>)> {
        clip::clip_segment(a, b, self.near())
    }

    pub fn move_up(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(0.0, self.move_step, 0.0));
    }

    pub fn move_down(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(0.0, -self.move_step, 0.0));
    }

    pub fn move_left(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(self.move_step, 0.0, 0.0));
    }

    pub fn move_right(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(-self.move_step, 0.0, 0.0));
    }

    pub fn move_forward(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(0.0, 0.0, self.move_step));
    }

    pub fn move_backward(&self, world: &mut VertexBuffer) {
        self.translate(world, Vector3::new(0.0, 0.0, -self.move_step));
    }

    pub fn rotate_x_positive(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_x(self.rotation_step));
    }

    pub fn rotate_x_negative(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_x(-self.rotation_step));
    }

    pub fn rotate_y_positive(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_y(self.rotation_step));
    }

    pub fn rotate_y_negative(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_y(-self.rotation_step));
    }

    pub fn rotate_z_positive(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_z(self.rotation_step));
    }

    pub fn rotate_z_negative(&self, world: &mut VertexBuffer) {
        world.transform(&rotation_z(-self.rotation_step));
    }

    /// Narrows the field of view and rebuilds the projection matrix.
    pub fn zoom_in(&mut self) {
        self.zoom(-self.zoom_step);
    }

    /// Widens the field of view and rebuilds the projection matrix.
    pub fn zoom_out(&mut self) {
        self.zoom(self.zoom_step);
    }

    fn zoom(&mut self, delta: f32) {
        self.projection.zoom(delta);
        self.matrix = self.projection.matrix();
        trace!("fov now {:.1} degrees", self.projection.fov().to_degrees());
    }

    fn translate(&self, world: &mut VertexBuffer, offset: Vector3<f32>) {
        trace!("translating world by {offset:?}");
        world.translate(offset);
    }
}

/// Homogeneous rotation about the X axis.
pub fn rotation_x(angle: f32) -> Matrix4<f32> {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Homogeneous rotation about the Y axis.
pub fn rotation_y(angle: f32) -> Matrix4<f32> {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Homogeneous rotation about the Z axis.
pub fn rotation_z(angle: f32) -> Matrix4<f32> {
    let (s, c) = angle.sin_cos();
    Matrix4::new(
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(&CameraSettings::default(), 800, 800)
    }

    fn single_vertex(point: Point3<f32>) -> (VertexBuffer, crate::VertexId) {
        let mut buffer = VertexBuffer::new();
        let id = buffer.push(point);
        (buffer, id)
    }

    #[test]
    fn on_axis_point_maps_to_screen_center() {
        let camera = camera();
        for z in [-10.0, -2.0, 3.0, 50.0] {
            let screen = camera.project_to_screen(Point3::new(0.0, 0.0, z));
            assert_relative_eq!(screen, camera.screen_center(), epsilon = 1e-4);
        }

        let wide = Camera::new(&CameraSettings::default(), 1600, 900);
        let screen = wide.project_to_screen(Point3::new(0.0, 0.0, 4.0));
        assert_relative_eq!(screen, Point2::new(800.0, 450.0), epsilon = 1e-4);
    }

    #[test]
    fn projection_divides_twice() {
        let settings = CameraSettings {
            fov: 90.0,
            near: 1.0,
            far: 3.0,
            ..CameraSettings::default()
        };
        let camera = Camera::new(&settings, 100, 100);
        let point = Point3::new(2.0, 1.0, 4.0);

        // clip = (2, 1, -2*4 - 3, -4); x' = 2 / -11 after both divisions.
        let projected = camera.project(point);
        assert_relative_eq!(projected.x, 2.0 / -11.0, epsilon = 1e-5);
        assert_relative_eq!(projected.y, 1.0 / -11.0, epsilon = 1e-5);
    }

    #[test]
    fn eye_plane_point_is_not_finite() {
        let projected = camera().project(Point3::new(1.0, 1.0, 0.0));
        assert!(!projected.x.is_finite() || !projected.y.is_finite());
    }

    #[test]
    fn screen_mapping_scales_then_centers() {
        let camera = camera();
        let point = Point3::new(0.5, -0.25, 2.0);
        let projected = camera.project(point);
        let screen = camera.project_to_screen(point);

        assert_relative_eq!(screen.x, projected.x * 100.0 + 400.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, projected.y * 100.0 + 400.0, epsilon = 1e-3);
    }

    #[test]
    fn movement_commands_shift_one_axis() {
        let camera = camera();
        let (mut world, id) = single_vertex(Point3::new(1.0, 1.0, 1.0));

        camera.move_up(&mut world);
        assert_relative_eq!(world.get(id), Point3::new(1.0, 1.1, 1.0), epsilon = 1e-6);
        camera.move_down(&mut world);
        camera.move_left(&mut world);
        assert_relative_eq!(world.get(id), Point3::new(1.1, 1.0, 1.0), epsilon = 1e-6);
        camera.move_right(&mut world);
        camera.move_forward(&mut world);
        assert_relative_eq!(world.get(id), Point3::new(1.0, 1.0, 1.1), epsilon = 1e-6);
        camera.move_backward(&mut world);
        assert_relative_eq!(world.get(id), Point3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_round_trips() {
        let camera = camera();
        let original = Point3::new(0.3, -1.7, 2.5);
        let (mut world, id) = single_vertex(original);

        camera.rotate_x_positive(&mut world);
        assert!((world.get(id) - original).norm() > 1e-3);
        camera.rotate_x_negative(&mut world);
        camera.rotate_y_positive(&mut world);
        camera.rotate_y_negative(&mut world);
        camera.rotate_z_negative(&mut world);
        camera.rotate_z_positive(&mut world);

        assert_relative_eq!(world.get(id), original, epsilon = 1e-5);
    }

    #[test]
    fn rotations_are_right_handed() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let z = Point3::new(0.0, 0.0, 1.0);

        let rotate = |m: Matrix4<f32>, p: Point3<f32>| crate::vertex::apply_homogeneous(&m, p);
        assert_relative_eq!(rotate(rotation_x(quarter), y), z, epsilon = 1e-6);
        assert_relative_eq!(rotate(rotation_y(quarter), z), x, epsilon = 1e-6);
        assert_relative_eq!(rotate(rotation_z(quarter), x), y, epsilon = 1e-6);
    }

    #[test]
    fn zoom_rebuilds_matrix() {
        let mut camera = camera();
        let before = camera.matrix()[(1, 1)];

        camera.zoom_in();
        assert!(camera.matrix()[(1, 1)] > before);
        assert_relative_eq!(camera.projection().fov().to_degrees(), 40.0, epsilon = 1e-3);

        camera.zoom_out();
        camera.zoom_out();
        assert!(camera.matrix()[(1, 1)] < before);
    }
}

//! Perspective projection parameters.
//!
//! [`Projection`] is the single source of truth for the field of view, aspect
//! ratio and near/far distances, and builds the 4x4 perspective matrix from
//! them.

use nalgebra::Matrix4;

/// Narrowest field of view zooming can reach, in radians.
pub const MIN_FOV: f32 = 1.0 * std::f32::consts::PI / 180.0;

/// Widest field of view zooming can reach, in radians.
pub const MAX_FOV: f32 = 179.0 * std::f32::consts::PI / 180.0;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Projection {
    /// Creates a new projection.
    ///
    /// # Arguments
    /// * `fov` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near` - Near clipping plane distance
    /// * `far` - Far clipping plane distance
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(fov_degrees.to_radians(), aspect_ratio, near, far)
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Widens (positive `delta`) or narrows the field of view.
    ///
    /// The result is clamped to `[MIN_FOV, MAX_FOV]` so `tan(fov / 2)` stays
    /// finite and non-zero.
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov + delta).clamp(MIN_FOV, MAX_FOV);
    }

    /// Builds the perspective matrix.
    ///
    /// ```text
    /// [ 1/(aspect*tan(fov/2))  0              0                   0                ]
    /// [ 0                      1/tan(fov/2)   0                   0                ]
    /// [ 0                      0              -(far+near)/(f-n)   -2*far*near/(f-n) ]
    /// [ 0                      0              -1                  0                ]
    /// ```
    pub fn matrix(&self) -> Matrix4<f32> {
        let tan_half = (self.fov / 2.0).tan();
        let depth = self.far - self.near;
        Matrix4::new(
            1.0 / (self.aspect_ratio * tan_half), 0.0, 0.0, 0.0,
            0.0, 1.0 / tan_half, 0.0, 0.0,
            0.0, 0.0, -(self.far + self.near) / depth, -2.0 * self.far * self.near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

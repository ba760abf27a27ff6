//! Per-frame rendering pipeline.
//!
//! A [`View`] owns the loaded geometry, the BSP tree built from it and the
//! camera. Each frame it orders the polygons, clips them against the near
//! plane, projects them to pixels and hands them to a [`Canvas`].

use log::debug;
use nalgebra::{Point2, Point3};

use crate::{BspTree, Camera, Color, Polygon, Scene, VertexBuffer};

/// Color used to stroke polygon outlines.
pub const OUTLINE_COLOR: Color = Color::WHITE;

/// Drawing surface the view renders onto.
pub trait Canvas {
    /// Fills a convex polygon given in pixel coordinates.
    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Color);

    /// Strokes a line segment given in pixel coordinates.
    fn draw_line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Color);
}

/// Externally invocable operations on a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
    RotateXPositive,
    RotateXNegative,
    RotateYPositive,
    RotateYNegative,
    RotateZPositive,
    RotateZNegative,
    ZoomIn,
    ZoomOut,
    /// Switch between BSP ordering and input ordering
    ToggleOcclusion,
}

/// A projected polygon ready for rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPolygon {
    pub points: Vec<Point2<f32>>,
    pub color: Color,
}

/// Scene geometry, its BSP tree and the camera looking at it.
#[derive(Debug, Clone)]
pub struct View {
    vertices: VertexBuffer,
    /// Input-order polygons, drawn as-is when occlusion is off.
    polygons: Vec<Polygon>,
    tree: BspTree,
    camera: Camera,
    viewer: Point3<f32>,
    occlusion: bool,
}

impl View {
    /// Builds the BSP tree for `scene` and sets up a view with the eye at the
    /// origin and occlusion enabled.
    pub fn new(scene: Scene, camera: Camera) -> Self {
        let (mut vertices, polygons) = scene.into_parts();
        let tree = BspTree::build(&polygons, &mut vertices);
        Self {
            vertices,
            polygons,
            tree,
            camera,
            viewer: Point3::origin(),
            occlusion: true,
        }
    }

    /// Sets the position the BSP tree is traversed from.
    pub fn with_viewer(mut self, viewer: Point3<f32>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn with_occlusion(mut self, occlusion: bool) -> Self {
        self.occlusion = occlusion;
        self
    }

    #[inline]
    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    #[inline]
    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn viewer(&self) -> Point3<f32> {
        self.viewer
    }

    #[inline]
    pub fn occlusion(&self) -> bool {
        self.occlusion
    }

    pub fn toggle_occlusion(&mut self) {
        self.occlusion = !self.occlusion;
        debug!("occlusion {}", if self.occlusion { "on" } else { "off" });
    }

    /// Applies one command to the camera or the world.
    pub fn apply(&mut self, command: Command) {
        let camera = &mut self.camera;
        let world = &mut self.vertices;
        match command {
            Command::MoveUp => camera.move_up(world),
            Command::MoveDown => camera.move_down(world),
            Command::MoveLeft => camera.move_left(world),
            Command::MoveRight => camera.move_right(world),
            Command::MoveForward => camera.move_forward(world),
            Command::MoveBackward => camera.move_backward(world),
            Command::RotateXPositive => camera.rotate_x_positive(world),
            Command::RotateXNegative => camera.rotate_x_negative(world),
            Command::RotateYPositive => camera.rotate_y_positive(world),
            Command::RotateYNegative => camera.rotate_y_negative(world),
            Command::RotateZPositive => camera.rotate_z_positive(world),
            Command::RotateZNegative => camera.rotate_z_negative(world),
            Command::ZoomIn => camera.zoom_in(),
            Command::ZoomOut => camera.zoom_out(),
            Command::ToggleOcclusion => self.toggle_occlusion(),
        }
    }

    /// Returns the polygons in draw order.
    ///
    /// With occlusion on this is the BSP back-to-front order from the viewer;
    /// otherwise it is the order the polygons were loaded in.
    pub fn ordered_polygons(&self) -> Vec<&Polygon> {
        if self.occlusion {
            self.tree.traverse(self.viewer, &self.vertices)
        } else {
            self.polygons.iter().collect()
        }
    }

    /// Clips and projects every polygon, in draw order.
    ///
    /// Polygons with fewer than three points left after near-plane clipping
    /// are dropped, as are polygons whose projection is not finite.
    pub fn frame(&self) -> Vec<ScreenPolygon> {
        self.ordered_polygons()
            .into_iter()
            .filter_map(|polygon| self.project_polygon(polygon))
            .collect()
    }

    fn project_polygon(&self, polygon: &Polygon) -> Option<ScreenPolygon> {
        let clipped = self.camera.clip_polygon(&polygon.points(&self.vertices));
        if clipped.len() < 3 {
            return None;
        }

        let points: Vec<Point2<f32>> = clipped
            .iter()
            .map(|&p| self.camera.project_to_screen(p))
            .collect();
        if !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            debug!("dropping polygon with non-finite projection");
            return None;
        }

        Some(ScreenPolygon {
            points,
            color: polygon.color(),
        })
    }

    /// Draws the current frame: each polygon is filled, then outlined.
    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        for polygon in self.frame() {
            canvas.fill_polygon(&polygon.points, polygon.color);
            let n = polygon.points.len();
            for i in 0..n {
                canvas.draw_line(polygon.points[i], polygon.points[(i + 1) % n], OUTLINE_COLOR);
            }
        }
    }
}

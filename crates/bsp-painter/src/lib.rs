//! Painter's-algorithm rendering core.
//!
//! Orders convex planar polygons back to front with a BSP tree, clips them
//! against the near plane and projects them onto a 2D screen. Geometry lives
//! in a shared [`VertexBuffer`]; polygons refer to it by handle so moving the
//! world moves every face at once.

mod bsp;
mod camera;
mod clip;
mod plane;
mod polygon;
mod projection;
mod scene;
mod vertex;
mod view;

pub use bsp::{BspNode, BspTree, BspVisitor, CollectingVisitor, FnVisitor, NodeId};
pub use camera::{rotation_x, rotation_y, rotation_z, Camera, CameraSettings};
pub use clip::{clip_polygon, clip_segment};
pub use plane::{Plane, PlaneSide};
pub use polygon::{Color, Polygon};
pub use projection::{Projection, MAX_FOV, MIN_FOV};
pub use scene::{Scene, SceneError};
pub use vertex::{apply_homogeneous, VertexBuffer, VertexId};
pub use view::{Canvas, Command, ScreenPolygon, View, OUTLINE_COLOR};

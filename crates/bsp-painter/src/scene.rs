//! Scene description loading.
//!
//! A scene file is plain text, one declaration per line:
//!
//! ```text
//! v <x> <y> <z>                  vertex, numbered from 1 in order of appearance
//! p <r,g,b> <i1> <i2> <i3> ...   polygon over previously declared vertices
//! ```
//!
//! Any other line is ignored. Loading stops at the first malformed line.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::info;
use nalgebra::Point3;

use crate::{Color, Polygon, VertexBuffer};

const VERTEX_PREFIX: &str = "v ";
const POLYGON_PREFIX: &str = "p ";

/// Error loading a scene
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// A coordinate or vertex index is not a number
    InvalidNumber { line: usize, token: String },
    /// A polygon color is not three comma-separated bytes
    InvalidColor { line: usize, token: String },
    /// A declaration ends before a required field
    MissingField { line: usize, field: &'static str },
    /// A polygon refers to a vertex that has not been declared
    VertexOutOfRange { line: usize, index: usize, count: usize },
    /// A polygon lists fewer than three vertices
    TooFewVertices { line: usize, count: usize },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::InvalidNumber { line, token } => {
                write!(f, "line {}: invalid number '{}'", line, token)
            }
            SceneError::InvalidColor { line, token } => {
                write!(f, "line {}: invalid color '{}', expected r,g,b", line, token)
            }
            SceneError::MissingField { line, field } => {
                write!(f, "line {}: missing {}", line, field)
            }
            SceneError::VertexOutOfRange { line, index, count } => write!(
                f,
                "line {}: vertex index {} out of range (1..={} declared)",
                line, index, count
            ),
            SceneError::TooFewVertices { line, count } => write!(
                f,
                "line {}: polygon needs at least 3 vertices, got {}",
                line, count
            ),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

/// The loaded geometry: a shared vertex buffer and polygons in file order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    vertices: VertexBuffer,
    polygons: Vec<Polygon>,
}

impl Scene {
    /// Assembles a scene from already-built parts.
    pub fn from_parts(vertices: VertexBuffer, polygons: Vec<Polygon>) -> Self {
        Self { vertices, polygons }
    }

    /// Reads and parses a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let scene = Self::parse(&text)?;
        info!(
            "loaded scene {}: {} vertices, {} polygons",
            path.display(),
            scene.vertices.len(),
            scene.polygons.len()
        );
        Ok(scene)
    }

    /// Parses scene text.
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let mut scene = Scene::default();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if let Some(rest) = raw.strip_prefix(VERTEX_PREFIX) {
                scene.parse_vertex(line, rest)?;
            } else if let Some(rest) = raw.strip_prefix(POLYGON_PREFIX) {
                scene.parse_polygon(line, rest)?;
            }
        }
        Ok(scene)
    }

    fn parse_vertex(&mut self, line: usize, rest: &str) -> Result<(), SceneError> {
        let mut tokens = rest.split_whitespace();
        let mut coordinate = |field| -> Result<f32, SceneError> {
            let token = tokens.next().ok_or(SceneError::MissingField { line, field })?;
            token.parse().map_err(|_| SceneError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        };
        let x = coordinate("x coordinate")?;
        let y = coordinate("y coordinate")?;
        let z = coordinate("z coordinate")?;
        self.vertices.push(Point3::new(x, y, z));
        Ok(())
    }

    fn parse_polygon(&mut self, line: usize, rest: &str) -> Result<(), SceneError> {
        let mut tokens = rest.split_whitespace();
        let color_token = tokens.next().ok_or(SceneError::MissingField {
            line,
            field: "color",
        })?;
        let color = parse_color(color_token).ok_or_else(|| SceneError::InvalidColor {
            line,
            token: color_token.to_string(),
        })?;

        let ids = tokens
            .map(|token| {
                let index: usize = token.parse().map_err(|_| SceneError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })?;
                index
                    .checked_sub(1)
                    .and_then(|i| self.vertices.id(i))
                    .ok_or(SceneError::VertexOutOfRange {
                        line,
                        index,
                        count: self.vertices.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if ids.len() < 3 {
            return Err(SceneError::TooFewVertices {
                line,
                count: ids.len(),
            });
        }
        self.polygons.push(Polygon::new(ids).with_color(color));
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut VertexBuffer {
        &mut self.vertices
    }

    /// Returns the polygons in declaration order.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Splits the scene into its vertex buffer and polygons.
    pub fn into_parts(self) -> (VertexBuffer, Vec<Polygon>) {
        (self.vertices, self.polygons)
    }
}

fn parse_color(token: &str) -> Option<Color> {
    let mut channels = token.split(',').map(|c| c.parse::<u8>().ok());
    let color = Color::new(channels.next()??, channels.next()??, channels.next()??);
    channels.next().is_none().then_some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# a single red triangle
v 0 0 1
v 1.5 0 1
v 0 -2 1

p 255,0,0 1 2 3
";

    #[test]
    fn parses_vertices_and_polygons() {
        let scene = Scene::parse(TRIANGLE).unwrap();

        assert_eq!(scene.vertices().len(), 3);
        assert_eq!(scene.polygons().len(), 1);
        let poly = &scene.polygons()[0];
        assert_eq!(poly.color(), Color::new(255, 0, 0));
        assert_eq!(
            poly.points(scene.vertices()),
            vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.5, 0.0, 1.0),
                Point3::new(0.0, -2.0, 1.0),
            ]
        );
    }

    #[test]
    fn polygons_share_vertices() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\np 1,2,3 1 2 3\np 4,5,6 1 3 4\n";
        let scene = Scene::parse(text).unwrap();

        let [a, b] = scene.polygons() else {
            panic!("expected two polygons");
        };
        assert_eq!(a.vertices()[0], b.vertices()[0]);
        assert_eq!(a.vertices()[2], b.vertices()[1]);
    }

    #[test]
    fn empty_text_is_empty_scene() {
        let scene = Scene::parse("").unwrap();
        assert!(scene.vertices().is_empty());
        assert!(scene.polygons().is_empty());
    }

    #[test]
    fn index_out_of_range_is_fatal() {
        let err = Scene::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\np 1,1,1 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            SceneError::VertexOutOfRange { line: 4, index: 4, count: 3 }
        ));
    }

    #[test]
    fn index_zero_is_out_of_range() {
        let err = Scene::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\np 1,1,1 0 1 2\n").unwrap_err();
        assert!(matches!(err, SceneError::VertexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn vertex_must_precede_use() {
        let err = Scene::parse("p 1,1,1 1 2 3\nv 0 0 0\nv 1 0 0\nv 1 1 0\n").unwrap_err();
        assert!(matches!(err, SceneError::VertexOutOfRange { line: 1, count: 0, .. }));
    }

    #[test]
    fn too_few_vertices_is_fatal() {
        let err = Scene::parse("v 0 0 0\nv 1 0 0\np 1,1,1 1 2\n").unwrap_err();
        assert!(matches!(err, SceneError::TooFewVertices { line: 3, count: 2 }));
    }

    #[test]
    fn malformed_tokens_are_reported() {
        let err = Scene::parse("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { line: 1, ref token } if token == "zero"));

        let err = Scene::parse("v 0 0\n").unwrap_err();
        assert!(matches!(err, SceneError::MissingField { field: "z coordinate", .. }));

        let err = Scene::parse("v 0 0 0\np 255,0 1 1 1\n").unwrap_err();
        assert!(matches!(err, SceneError::InvalidColor { line: 2, .. }));

        let err = Scene::parse("p \n").unwrap_err();
        assert!(matches!(err, SceneError::MissingField { field: "color", .. }));
    }

    #[test]
    fn color_parsing() {
        assert_eq!(parse_color("1,2,3"), Some(Color::new(1, 2, 3)));
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("1,2,3,4"), None);
        assert_eq!(parse_color("1, 2,3"), None);
    }

    #[test]
    fn error_messages_name_the_line() {
        let err = Scene::parse("v 0 0 0\np 1,1,1 1 1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: polygon needs at least 3 vertices, got 2"
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Scene::load("/nonexistent/scene.txt").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! Interactive viewer: macroquad window, keyboard mapping and frame pacing
//! around the `bsp_painter` core.

use std::time::{Duration, Instant};

use bsp_painter::{Canvas, Command};
use macroquad::prelude::*;
use nalgebra::Point2;

pub mod config;
pub use config::AppConfig;

/// Maps a key press to a view command.
///
/// Arrows move, Z/X move forward/backward, W/S A/D Q/E rotate about X, Y and
/// Z, `=`/`-` zoom and O toggles occlusion.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Up => Command::MoveUp,
        KeyCode::Down => Command::MoveDown,
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Z => Command::MoveForward,
        KeyCode::X => Command::MoveBackward,
        KeyCode::W => Command::RotateXPositive,
        KeyCode::S => Command::RotateXNegative,
        KeyCode::A => Command::RotateYPositive,
        KeyCode::D => Command::RotateYNegative,
        KeyCode::Q => Command::RotateZPositive,
        KeyCode::E => Command::RotateZNegative,
        KeyCode::Equal | KeyCode::KpAdd => Command::ZoomIn,
        KeyCode::Minus | KeyCode::KpSubtract => Command::ZoomOut,
        KeyCode::O => Command::ToggleOcclusion,
        _ => return None,
    };
    Some(command)
}

/// Converts a core color to an opaque macroquad color.
pub fn to_color(color: bsp_painter::Color) -> Color {
    Color::from_rgba(color.r, color.g, color.b, 255)
}

/// Draws onto the current macroquad frame in screen coordinates.
pub struct ScreenCanvas;

impl Canvas for ScreenCanvas {
    fn fill_polygon(&mut self, points: &[Point2<f32>], color: bsp_painter::Color) {
        if points.len() < 3 {
            return;
        }
        let color = to_color(color);
        let anchor = vec2(points[0].x, points[0].y);

        // Fan triangulation: vertex 0 connects to all edges
        for pair in points[1..].windows(2) {
            draw_triangle(
                anchor,
                vec2(pair[0].x, pair[0].y),
                vec2(pair[1].x, pair[1].y),
                color,
            );
        }
    }

    fn draw_line(&mut self, start: Point2<f32>, end: Point2<f32>, color: bsp_painter::Color) {
        draw_line(start.x, start.y, end.x, end.y, 1.0, to_color(color));
    }
}

/// Holds the frame loop to a fixed rate by sleeping off the rest of each frame.
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last: Instant::now(),
        }
    }

    /// Returns how long to sleep to finish the current frame on time.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.frame.saturating_sub(now.duration_since(self.last))
    }

    /// Sleeps until the current frame's time is used up.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last = Instant::now();
    }
}

use std::process::ExitCode;

use bsp_painter::{Camera, Scene, View};
use log::{error, info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;
use nalgebra::Point3;
use painter_viz::{command_for_key, to_color, AppConfig, FrameLimiter, ScreenCanvas};

fn window_conf(config: &AppConfig) -> Conf {
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let scene = match Scene::load(&config.scene.path) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to load scene '{}': {}", config.scene.path, e);
            return ExitCode::FAILURE;
        }
    };

    let camera = Camera::new(&config.camera, config.window.width, config.window.height);
    let [x, y, z] = config.scene.viewer;
    let view = View::new(scene, camera)
        .with_viewer(Point3::new(x, y, z))
        .with_occlusion(config.scene.occlusion);
    info!(
        "BSP tree: {} nodes, depth {}",
        view.tree().len(),
        view.tree().depth()
    );

    macroquad::Window::from_config(window_conf(&config), run(view, config.window.target_fps));
    ExitCode::SUCCESS
}

async fn run(mut view: View, target_fps: u32) {
    let mut limiter = FrameLimiter::new(target_fps);
    let background = to_color(bsp_painter::Color::BLACK);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("quit requested");
            break;
        }
        for key in get_keys_pressed() {
            if let Some(command) = command_for_key(key) {
                view.apply(command);
            }
        }

        clear_background(background);
        view.render(&mut ScreenCanvas);

        draw_text(
            &format!(
                "occlusion: {} (O) | fov {:.0}",
                if view.occlusion() { "BSP" } else { "input order" },
                view.camera().projection().fov().to_degrees()
            ),
            10.0,
            20.0,
            18.0,
            GRAY,
        );

        limiter.wait();
        next_frame().await
    }
}

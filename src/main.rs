use std::{path::PathBuf, time::Instant};

use glam::{Vec3, Vec4};
use glsandbox_core::Camera;
use sdl2::keyboard::Keycode;

use crate::{
    abs::App,
    config::Config,
    input::InputState,
    render::{FrameParams, Renderer},
};

mod abs;
mod config;
mod demo;
mod input;
mod logging;
mod render;

fn main() {
    // An explicit settings path may be passed as the first argument.
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(Config::default_path);
    let (config, warnings) = match &config_path {
        Some(path) => Config::load(path),
        None => (
            Config::default(),
            vec!["No config directory available, using defaults".to_string()],
        ),
    };

    logging::init(config.log_level());
    for warning in warnings {
        log::warn!("{warning}");
    }
    if let Some(path) = &config_path {
        log::info!("Using settings from {}", path.display());
    }

    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), String> {
    let mut app = App::new(&config.window)?;

    let mut renderer = Renderer::new(
        &app.gl,
        Vec4::from_array(config.clear_color),
        config.wireframe,
    )?;

    let start = Instant::now();
    let mut scene = renderer.upload(&demo::build_scene())?;
    log::debug!("Scene built and uploaded in {:?}", start.elapsed());

    let mut camera = Camera {
        position: Vec3::new(0.0, 2.0, 8.0),
        fov_degrees: config.camera.fov_degrees,
        sensitivity: config.camera.sensitivity,
        speed: config.camera.speed,
        ..Default::default()
    };

    let (mut width, mut height) = app.drawable_size();
    renderer.set_viewport(width, height);

    let mut input = InputState::default();
    let mut grabbed = true;

    let mut last_frame_time = Instant::now();
    let mut fps_timer = 0.0;
    let mut fps_frames = 0u32;

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        if input.quit {
            break 'running;
        }

        if input.resized {
            (width, height) = app.drawable_size();
            renderer.set_viewport(width, height);
            log::debug!("Resized to {width}x{height}");
        }

        let keyboard = &input.keyboard;
        if keyboard.was_pressed(Keycode::Escape) {
            if !grabbed {
                break 'running;
            }
            grabbed = false;
        }
        if !grabbed && input.mouse.clicked {
            grabbed = true;
        }
        if keyboard.was_pressed(Keycode::F) {
            renderer.wireframe = !renderer.wireframe;
            log::info!("Wireframe {}", if renderer.wireframe { "on" } else { "off" });
        }
        if keyboard.was_pressed(Keycode::Tab)
            && let Some(cube) = scene.find_mut(demo::CUBE)
        {
            cube.visible = !cube.visible;
        }

        app.sdl.mouse().set_relative_mouse_mode(grabbed);
        if grabbed {
            camera.look(input.mouse.delta.x, input.mouse.delta.y);
            camera.update(&keyboard.camera_input(), delta_time);
        }

        let time = start.elapsed().as_secs_f32();
        demo::animate(&mut scene, time);

        renderer.render(
            &scene,
            &FrameParams {
                camera: &camera,
                aspect: width as f32 / height.max(1) as f32,
                time,
            },
        );
        app.window.gl_swap_window();

        fps_timer += delta_time;
        fps_frames += 1;
        if fps_timer >= 1.0 {
            let title = format!(
                "{} - FPS: {:.1}",
                config.window.title,
                fps_frames as f32 / fps_timer
            );
            if let Err(e) = app.window.set_title(&title) {
                log::warn!("Could not set window title: {e}");
            }
            fps_timer = 0.0;
            fps_frames = 0;
        }
    }

    log::info!("Shutting down after {:.1}s", start.elapsed().as_secs_f32());
    Ok(())
}

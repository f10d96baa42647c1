//! Keyboard and mouse state gathered from SDL events.

use fxhash::FxHashSet;
use glam::Vec2;
use glsandbox_core::CameraInput;
use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: FxHashSet<Keycode>,
    pub pressed: FxHashSet<Keycode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    /// Whether `key` went down this frame.
    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }

    /// Maps the movement keys onto camera input.
    pub fn camera_input(&self) -> CameraInput {
        CameraInput {
            forward: self.is_down(Keycode::W),
            backward: self.is_down(Keycode::S),
            left: self.is_down(Keycode::A),
            right: self.is_down(Keycode::D),
            up: self.is_down(Keycode::Space),
            down: self.is_down(Keycode::LShift),
            sprint: self.is_down(Keycode::LCtrl),
        }
    }
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub delta: Vec2,
    /// A button went down this frame.
    pub clicked: bool,
}

/// Everything the frame update needs to know about user input.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    /// The window was resized this frame; query the drawable size again.
    pub resized: bool,
    pub quit: bool,
}

impl InputState {
    /// Clears the per-frame parts of the state. Call before polling events.
    pub fn begin_frame(&mut self) {
        self.keyboard.pressed.clear();
        self.mouse.delta = Vec2::ZERO;
        self.mouse.clicked = false;
        self.resized = false;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Quit { .. } => self.quit = true,
            Event::Window {
                win_event: sdl2::event::WindowEvent::SizeChanged(..),
                ..
            } => self.resized = true,
            Event::MouseMotion { xrel, yrel, .. } => {
                // several motion events can arrive in one frame
                self.mouse.delta += Vec2::new(xrel as f32, yrel as f32);
            }
            Event::MouseButtonDown { .. } => self.mouse.clicked = true,
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.insert(keycode);
                self.keyboard.pressed.insert(keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.remove(&keycode);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::Mod;

    use super::*;

    fn key_down(keycode: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    fn key_up(keycode: Keycode) -> Event {
        Event::KeyUp {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn test_pressed_lasts_one_frame() {
        let mut input = InputState::default();
        input.begin_frame();
        input.handle_event(&key_down(Keycode::F));
        assert!(input.keyboard.was_pressed(Keycode::F));
        assert!(input.keyboard.is_down(Keycode::F));

        input.begin_frame();
        assert!(!input.keyboard.was_pressed(Keycode::F));
        assert!(input.keyboard.is_down(Keycode::F));

        input.handle_event(&key_up(Keycode::F));
        assert!(!input.keyboard.is_down(Keycode::F));
        assert!(!input.keyboard.was_pressed(Keycode::F));
    }

    #[test]
    fn test_camera_input_mapping() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::W));
        input.handle_event(&key_down(Keycode::LShift));
        input.handle_event(&key_down(Keycode::LCtrl));

        assert_eq!(
            input.keyboard.camera_input(),
            CameraInput {
                forward: true,
                down: true,
                sprint: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_only_ctrl_sprints() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::Q));
        assert_eq!(input.keyboard.camera_input(), CameraInput::default());

        input.handle_event(&key_down(Keycode::LCtrl));
        assert!(input.keyboard.camera_input().sprint);
    }

    #[test]
    fn test_mouse_delta_accumulates() {
        let mut input = InputState::default();
        for _ in 0..3 {
            input.handle_event(&Event::MouseMotion {
                timestamp: 0,
                window_id: 0,
                which: 0,
                mousestate: sdl2::mouse::MouseState::from_sdl_state(0),
                x: 10,
                y: 20,
                xrel: 2,
                yrel: -1,
            });
        }
        assert_eq!(input.mouse.delta, Vec2::new(6.0, -3.0));

        input.begin_frame();
        assert_eq!(input.mouse.delta, Vec2::ZERO);
    }

    #[test]
    fn test_quit_and_resize() {
        let mut input = InputState::default();
        input.handle_event(&Event::Window {
            timestamp: 0,
            window_id: 0,
            win_event: sdl2::event::WindowEvent::SizeChanged(800, 0),
        });
        assert!(input.resized);

        input.begin_frame();
        assert!(!input.resized);

        input.handle_event(&Event::Quit { timestamp: 0 });
        assert!(input.quit);
    }
}

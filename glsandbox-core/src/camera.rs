//! First person fly camera.

use glam::{Mat4, Vec3};

/// Movement keys held this frame, independent of the windowing library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
}

/// A yaw/pitch camera with damped velocity.
///
/// Angles are in degrees. `speed` is the acceleration applied per 60 Hz frame,
/// updates scale it by the real frame time.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            // looking down -Z
            yaw: 270.0,
            pitch: 0.0,
            fov_degrees: 70.0,
            near: 0.1,
            far: 400.0,
            sensitivity: 0.1,
            speed: 0.06,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Turns the camera by a mouse delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * self.sensitivity).rem_euclid(360.0);
        // rem_euclid rounds tiny negative values up to exactly 360
        if self.yaw >= 360.0 {
            self.yaw = 0.0;
        }
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-89.0, 89.0);
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Horizontal unit vector to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize_or_zero()
    }

    /// Applies one frame of movement. `dt` is in seconds.
    pub fn update(&mut self, input: &CameraInput, dt: f32) {
        let frames = dt * 60.0;
        let forward = self.front().with_y(0.0).normalize_or_zero();
        let right = self.right();

        let mut accel = Vec3::ZERO;
        if input.forward {
            accel += forward * if input.sprint { 2.0 } else { 1.0 };
        }
        if input.backward {
            accel -= forward;
        }
        if input.right {
            accel += right;
        }
        if input.left {
            accel -= right;
        }
        if input.up {
            accel += Vec3::Y;
        }
        if input.down {
            accel -= Vec3::Y;
        }

        self.velocity += accel * self.speed * frames;
        self.position += self.velocity * frames;
        self.velocity *= 0.8_f32.powf(frames);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

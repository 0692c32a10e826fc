use glam::{Mat4, Vec3};
use prism_common::{CameraDemoConfig, MotionAxes};
use serde::Serialize;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Perspective {
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_radians: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Aspect ratio of a surface, safe for a zero height.
    pub fn aspect_for(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }
}

/// Camera matrix (camera-to-world) for an eye looking at `target`.
///
/// Its `z_axis` points from the target back toward the eye, so the negated
/// `z_axis` is the viewing direction.
pub fn look_at_camera(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up).inverse()
}

/// Free-flying camera driven by held keys.
///
/// Orientation is kept as three Euler angles in degrees and composed as
/// `T(position) * Rx(elevation) * Ry(-heading) * Rz(roll)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeCamera {
    pub position: Vec3,
    pub elevation: f32,
    pub heading: f32,
    pub roll: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    #[serde(skip)]
    start_position: Vec3,
    #[serde(skip)]
    start_heading: f32,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::from_config(&CameraDemoConfig::default())
    }
}

impl FreeCamera {
    pub fn from_config(config: &CameraDemoConfig) -> Self {
        let start_heading = wrap_degrees(config.start_heading_degrees);
        Self {
            position: config.start_position,
            elevation: 0.0,
            heading: start_heading,
            roll: 0.0,
            speed: config.speed,
            turn_speed: config.turn_speed_degrees,
            start_position: config.start_position,
            start_heading,
        }
    }

    pub fn camera_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.elevation.to_radians())
            * Mat4::from_rotation_y((-self.heading).to_radians())
            * Mat4::from_rotation_z(self.roll.to_radians())
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera_matrix().inverse()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        -self.camera_matrix().z_axis.truncate()
    }

    /// Step the camera by `dt` seconds of steering input.
    ///
    /// Translation uses the orientation from before this step's rotation.
    pub fn advance(&mut self, axes: MotionAxes, dt: f32) {
        if axes.is_idle() || dt <= 0.0 {
            return;
        }
        let back = self.camera_matrix().z_axis.truncate();
        self.position -= back * dt * self.speed * axes.thrust;

        let turn = dt * self.turn_speed;
        self.heading = wrap_degrees(self.heading + turn * axes.yaw);
        self.roll = wrap_degrees(self.roll + turn * axes.roll);
        self.elevation = wrap_degrees(self.elevation + turn * axes.pitch);
    }

    /// Return to the configured start pose.
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.heading = self.start_heading;
        self.elevation = 0.0;
        self.roll = 0.0;
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

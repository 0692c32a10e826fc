use glam::Vec3;
use prism_common::{CameraDemoConfig, DemoKind, LightingDemoConfig, MotionAxes, PrismConfig};
use serde::Serialize;

use crate::camera::{FreeCamera, Perspective};
use crate::grid::{CubeGrid, CubeInstance};
use crate::lighting::{LightingFrame, PyramidScene};
use crate::transforms::ViewTransforms;

/// Free camera flying through the cube grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraDemo {
    pub camera: FreeCamera,
    pub grid: CubeGrid,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    light_direction: Vec3,
}

/// Everything the cube-grid pass uploads for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraFrame {
    pub view: ViewTransforms,
    pub camera: FreeCamera,
    pub light_direction: Vec3,
    pub instances: Vec<CubeInstance>,
}

impl CameraDemo {
    pub fn from_config(config: &CameraDemoConfig) -> Self {
        Self {
            camera: FreeCamera::from_config(config),
            grid: CubeGrid::from_config(config),
            fov_degrees: config.fov_degrees,
            near: config.z_near,
            far: config.z_far,
            light_direction: config.light_direction.normalize_or_zero(),
        }
    }

    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    pub fn frame(&self, aspect: f32) -> CameraFrame {
        let projection = Perspective::new(self.fov_degrees, aspect, self.near, self.far).matrix();
        let view = ViewTransforms::new(projection, self.camera.camera_matrix());
        CameraFrame {
            instances: self.grid.instances(&view),
            view,
            camera: self.camera.clone(),
            light_direction: self.light_direction,
        }
    }
}

/// Pyramid rotated by a slider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightingDemo {
    pub scene: PyramidScene,
    initial_rotation_degrees: f32,
}

impl LightingDemo {
    pub fn from_config(config: &LightingDemoConfig) -> Self {
        Self {
            scene: PyramidScene::from_config(config),
            initial_rotation_degrees: config.rotation_degrees,
        }
    }

    pub fn initial_rotation_degrees(&self) -> f32 {
        self.initial_rotation_degrees
    }

    pub fn frame(&self, aspect: f32) -> LightingFrame {
        self.scene.frame(aspect)
    }
}

/// The running demo.
#[derive(Debug, Clone, PartialEq)]
pub enum Demo {
    Camera(CameraDemo),
    Lighting(LightingDemo),
}

/// One frame's worth of draw data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "demo", rename_all = "lowercase")]
pub enum Frame {
    Camera(CameraFrame),
    Lighting(LightingFrame),
}

impl Frame {
    pub fn kind(&self) -> DemoKind {
        match self {
            Frame::Camera(_) => DemoKind::Camera,
            Frame::Lighting(_) => DemoKind::Lighting,
        }
    }

    pub fn view(&self) -> &ViewTransforms {
        match self {
            Frame::Camera(f) => &f.view,
            Frame::Lighting(f) => &f.view,
        }
    }

    /// Number of objects drawn.
    pub fn draw_count(&self) -> usize {
        match self {
            Frame::Camera(f) => f.instances.len(),
            Frame::Lighting(_) => 1,
        }
    }
}

impl Demo {
    pub fn new(kind: DemoKind, config: &PrismConfig) -> Self {
        tracing::debug!("building {kind} demo");
        match kind {
            DemoKind::Camera => Demo::Camera(CameraDemo::from_config(&config.camera_demo)),
            DemoKind::Lighting => Demo::Lighting(LightingDemo::from_config(&config.lighting_demo)),
        }
    }

    pub fn kind(&self) -> DemoKind {
        match self {
            Demo::Camera(_) => DemoKind::Camera,
            Demo::Lighting(_) => DemoKind::Lighting,
        }
    }

    /// Apply `dt` seconds of steering. Only the camera demo moves.
    pub fn advance(&mut self, axes: MotionAxes, dt: f32) {
        if let Demo::Camera(demo) = self {
            demo.camera.advance(axes, dt);
        }
    }

    /// Set the pyramid rotation. Returns false for the camera demo.
    pub fn set_rotation_degrees(&mut self, degrees: f32) -> bool {
        match self {
            Demo::Lighting(demo) => {
                demo.scene.set_rotation_degrees(degrees);
                true
            }
            Demo::Camera(_) => false,
        }
    }

    pub fn reset(&mut self) {
        match self {
            Demo::Camera(demo) => demo.camera.reset(),
            Demo::Lighting(demo) => {
                let initial = demo.initial_rotation_degrees;
                demo.scene.set_rotation_degrees(initial);
            }
        }
    }

    pub fn frame(&self, aspect: f32) -> Frame {
        match self {
            Demo::Camera(demo) => Frame::Camera(demo.frame(aspect)),
            Demo::Lighting(demo) => Frame::Lighting(demo.frame(aspect)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_kind() {
        let config = PrismConfig::default();
        assert_eq!(Demo::new(DemoKind::Camera, &config).kind(), DemoKind::Camera);
        assert_eq!(Demo::new(DemoKind::Lighting, &config).kind(), DemoKind::Lighting);
    }

    #[test]
    fn camera_frame_draws_grid() {
        let demo = Demo::new(DemoKind::Camera, &PrismConfig::default());
        let frame = demo.frame(16.0 / 9.0);
        assert_eq!(frame.kind(), DemoKind::Camera);
        assert_eq!(frame.draw_count(), 124);
        let Frame::Camera(cam) = &frame else {
            panic!("expected camera frame");
        };
        assert!((cam.light_direction.length() - 1.0).abs() < 1e-6);
        assert!(cam.view.eye().abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
    }

    #[test]
    fn advance_moves_only_the_camera_demo() {
        let config = PrismConfig::default();
        let axes = MotionAxes {
            thrust: 1.0,
            ..MotionAxes::default()
        };

        let mut camera = Demo::new(DemoKind::Camera, &config);
        let before = camera.frame(1.0).view().eye();
        camera.advance(axes, 1.0);
        let after = camera.frame(1.0).view().eye();
        // start pose faces +Z toward the grid
        assert!((after - before).abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-4));

        let mut lighting = Demo::new(DemoKind::Lighting, &config);
        let snapshot = lighting.clone();
        lighting.advance(axes, 1.0);
        assert_eq!(lighting, snapshot);
    }

    #[test]
    fn rotation_only_applies_to_lighting() {
        let config = PrismConfig::default();
        let mut camera = Demo::new(DemoKind::Camera, &config);
        assert!(!camera.set_rotation_degrees(10.0));

        let mut lighting = Demo::new(DemoKind::Lighting, &config);
        assert!(lighting.set_rotation_degrees(120.0));
        let Frame::Lighting(frame) = lighting.frame(1.0) else {
            panic!("expected lighting frame");
        };
        assert!((frame.rotation_degrees - 120.0).abs() < 1e-3);

        lighting.reset();
        let Frame::Lighting(frame) = lighting.frame(1.0) else {
            panic!("expected lighting frame");
        };
        assert_eq!(frame.rotation_degrees, 0.0);
    }

    #[test]
    fn frame_serializes_with_demo_tag() {
        let demo = Demo::new(DemoKind::Lighting, &PrismConfig::default());
        let json = serde_json::to_value(demo.frame(1.0)).unwrap();
        assert_eq!(json["demo"], "lighting");
        assert_eq!(json["shininess"], 80.0);
        assert_eq!(json["object"]["world"].as_array().unwrap().len(), 16);
    }
}

use glam::{Mat4, Vec3};
use prism_common::{LightingDemoConfig, Rgba};
use serde::Serialize;

use crate::camera::{Perspective, look_at_camera};
use crate::transforms::{ObjectTransforms, ViewTransforms};

/// Fixed viewer and spot light for the pyramid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub light_position: Vec3,
    pub shininess: f32,
    pub color_front: Rgba,
    pub color_back: Rgba,
    pub spot_inner_degrees: f32,
    pub spot_outer_degrees: f32,
    pub ambient: f32,
}

impl LightRig {
    pub fn from_config(config: &LightingDemoConfig) -> Self {
        Self {
            eye: config.eye,
            target: config.target,
            up: config.up,
            light_position: config.light_position,
            shininess: config.shininess,
            color_front: config.color_front,
            color_back: config.color_back,
            spot_inner_degrees: config.spot_inner_degrees,
            spot_outer_degrees: config.spot_outer_degrees,
            ambient: config.ambient,
        }
    }

    /// Direction the light shines, from its position toward the target.
    pub fn light_direction(&self) -> Vec3 {
        -look_at_camera(self.light_position, self.target, self.up)
            .z_axis
            .truncate()
    }
}

/// Everything the pyramid pass uploads for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightingFrame {
    pub view: ViewTransforms,
    pub object: ObjectTransforms,
    pub rotation_degrees: f32,
    pub color_front: Rgba,
    pub color_back: Rgba,
    pub light_world_position: Vec3,
    pub view_world_position: Vec3,
    pub light_direction: Vec3,
    pub shininess: f32,
    /// Cosines of the inner and outer cone half-angles.
    pub spot_inner_cos: f32,
    pub spot_outer_cos: f32,
    pub ambient: f32,
}

/// A pyramid spinning about Y in front of a fixed camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidScene {
    pub rig: LightRig,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    rotation_radians: f32,
}

impl Default for PyramidScene {
    fn default() -> Self {
        Self::from_config(&LightingDemoConfig::default())
    }
}

impl PyramidScene {
    pub fn from_config(config: &LightingDemoConfig) -> Self {
        Self {
            rig: LightRig::from_config(config),
            fov_degrees: config.fov_degrees,
            near: config.z_near,
            far: config.z_far,
            rotation_radians: config.rotation_degrees.to_radians(),
        }
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation_radians
    }

    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation_radians = degrees.to_radians();
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_radians)
    }

    pub fn frame(&self, aspect: f32) -> LightingFrame {
        let rig = &self.rig;
        let projection = Perspective::new(self.fov_degrees, aspect, self.near, self.far).matrix();
        let view = ViewTransforms::new(projection, look_at_camera(rig.eye, rig.target, rig.up));
        LightingFrame {
            object: view.object(self.world_matrix()),
            view,
            rotation_degrees: self.rotation_radians.to_degrees(),
            color_front: rig.color_front,
            color_back: rig.color_back,
            light_world_position: rig.light_position,
            view_world_position: rig.eye,
            light_direction: rig.light_direction(),
            shininess: rig.shininess,
            spot_inner_cos: rig.spot_inner_degrees.to_radians().cos(),
            spot_outer_cos: rig.spot_outer_degrees.to_radians().cos(),
            ambient: rig.ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_direction_points_at_target() {
        let rig = LightRig::from_config(&LightingDemoConfig::default());
        let expected = (rig.target - rig.light_position).normalize();
        assert!(rig.light_direction().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn rotation_spins_about_y() {
        let mut scene = PyramidScene::default();
        scene.set_rotation_degrees(90.0);
        let x = scene.world_matrix().transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        let apex = scene.world_matrix().transform_point3(Vec3::Y);
        assert!(apex.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn frame_carries_uniforms() {
        let mut scene = PyramidScene::default();
        scene.set_rotation_degrees(45.0);
        let frame = scene.frame(4.0 / 3.0);
        assert!((frame.rotation_degrees - 45.0).abs() < 1e-4);
        assert_eq!(frame.color_front, Rgba::GREEN);
        assert_eq!(frame.color_back, Rgba::RED);
        assert_eq!(frame.shininess, 80.0);
        assert_eq!(frame.view_world_position, Vec3::new(0.0, 2.0, 5.0));
        assert_eq!(frame.light_world_position, Vec3::new(5.0, 5.0, 10.0));
        assert!(frame.spot_inner_cos > frame.spot_outer_cos);
        assert!(frame.view.eye().abs_diff_eq(frame.view_world_position, 1e-5));
        assert!(frame.object.is_finite() && frame.view.is_finite());
    }

    #[test]
    fn rotated_normal_matrix_matches_world() {
        let mut scene = PyramidScene::default();
        scene.set_rotation_degrees(30.0);
        let frame = scene.frame(1.0);
        assert!(
            frame
                .object
                .world_inverse_transpose
                .abs_diff_eq(frame.object.world, 1e-5)
        );
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let frame = PyramidScene::default().frame(16.0 / 9.0);
        let clip = frame.view.view_projection * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}

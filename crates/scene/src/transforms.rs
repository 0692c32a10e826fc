use glam::{Mat4, Vec3};
use serde::Serialize;

/// Camera-side matrices shared by every draw in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransforms {
    pub projection: Mat4,
    /// Camera-to-world.
    pub camera: Mat4,
    /// World-to-camera, the inverse of `camera`.
    pub view: Mat4,
    pub view_projection: Mat4,
}

impl ViewTransforms {
    pub fn new(projection: Mat4, camera: Mat4) -> Self {
        let view = camera.inverse();
        Self {
            projection,
            camera,
            view,
            view_projection: projection * view,
        }
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        self.camera.w_axis.truncate()
    }

    /// Derive the per-object matrices for a world transform.
    pub fn object(&self, world: Mat4) -> ObjectTransforms {
        ObjectTransforms {
            world,
            world_view_projection: self.view_projection * world,
            world_inverse_transpose: world.inverse().transpose(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.projection.is_finite()
            && self.camera.is_finite()
            && self.view.is_finite()
            && self.view_projection.is_finite()
    }
}

/// Per-draw matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectTransforms {
    pub world: Mat4,
    pub world_view_projection: Mat4,
    /// Transforms normals; equal to `world` for rotations, identity 3x3 for
    /// pure translations.
    pub world_inverse_transpose: Mat4,
}

impl ObjectTransforms {
    pub fn is_finite(&self) -> bool {
        self.world.is_finite()
            && self.world_view_projection.is_finite()
            && self.world_inverse_transpose.is_finite()
    }
}

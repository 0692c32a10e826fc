//! Scene math for the prism demos: everything between input and the GPU.
//!
//! Builds projection, view, and world matrices plus the shading parameters
//! each demo uploads per frame. Nothing here touches a graphics API.
//!
//! # Invariants
//! - `view` is always the inverse of the camera matrix.
//! - Every matrix in a `Frame` built from a validated config is finite.
//! - Mesh triangles wind counter-clockwise seen from outside.

pub mod camera;
pub mod demo;
pub mod grid;
pub mod lighting;
pub mod mesh;
pub mod transforms;

pub use camera::{FreeCamera, Perspective, look_at_camera};
pub use demo::{CameraDemo, CameraFrame, Demo, Frame, LightingDemo};
pub use grid::{CubeGrid, CubeInstance};
pub use lighting::{LightRig, LightingFrame, PyramidScene};
pub use mesh::{MeshBuffers, cube_mesh, face_normal, pyramid_mesh};
pub use transforms::{ObjectTransforms, ViewTransforms};

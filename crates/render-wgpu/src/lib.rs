//! wgpu render backend for the prism demos.
//!
//! Renders the instanced cube grid for the camera demo and the spot-lit
//! pyramid for the lighting demo. All matrices arrive precomputed in a
//! `Frame`; this crate only packs them into buffers and issues draws.
//!
//! # Invariants
//! - Renderer never mutates demo state.
//! - Static geometry is uploaded once; per frame only uniforms and instance
//!   data are rewritten.

mod cube_grid;
mod gpu;
mod pyramid;
mod shaders;

pub use cube_grid::CubeGridRenderer;
pub use gpu::WgpuRenderer;
pub use pyramid::PyramidRenderer;

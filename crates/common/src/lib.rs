//! Shared types and configuration for the prism demos.
//!
//! # Invariants
//! - A `PrismConfig` that passed `validate` always yields finite matrices.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    CameraDemoConfig, LightingDemoConfig, MAX_GRID_HALF_EXTENT, PrismConfig, WindowConfig,
};
pub use error::PrismError;
pub use types::{DemoKind, MotionAxes, Rgba};

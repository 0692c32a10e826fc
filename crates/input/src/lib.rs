//! Input mapping: raw keys and slider values in, steering axes and actions out.
//!
//! # Invariants
//! - The scene consumes `MotionAxes` and `Action`s, never raw key events.
//! - Windowing backends translate their key codes into `Key` at the edge.

pub mod action;
pub mod keys;
pub mod slider;

pub use action::{Action, KeyBindings};
pub use keys::{HeldKeys, Key};
pub use slider::RotationSlider;

//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read a `Frame`; they never mutate demo state.
//! - A frame carries every matrix and uniform a backend needs, so backends
//!   do no transform math of their own.
//!
//! The GPU backend lives in `prism-render-wgpu`. `DebugTextRenderer` is the
//! headless implementation used by the CLI and by tests.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    concat!("prism-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}

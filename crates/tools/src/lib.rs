//! Developer Tooling: frame inspector for the desktop panel and the CLI.
//!
//! # Invariants
//! - Inspection is read-only.

mod inspector;

pub use inspector::{DrawInfo, FrameInspector, FrameSummary};

pub fn crate_info() -> &'static str {
    concat!("prism-tools v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}

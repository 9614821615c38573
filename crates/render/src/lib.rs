//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read viewer state; they never mutate it.
//! - One call renders one frame through the viewer's camera.
//!
//! The GPU backend lives in `bouquet-render-wgpu`. The [`DebugTextRenderer`]
//! here drives the headless CLI and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "bouquet-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}

//! Viewer state for a single auto-framed, slowly rotating model.
//!
//! Everything the frame loop mutates lives in one [`Viewer`] value that is
//! handed explicitly to the load callback, the per-frame update and the
//! resize handler. Nothing here touches the GPU.
//!
//! # Invariants
//! - At most one model is ever attached.
//! - Until a model is attached, [`Viewer::tick`] only advances the frame count.
//! - Resizing changes the camera aspect and nothing else on the camera.

pub mod camera;
pub mod config;
pub mod framing;
pub mod glow;
pub mod lights;
pub mod viewer;

pub use camera::PerspectiveCamera;
pub use config::ViewerConfig;
pub use framing::{Framing, auto_frame};
pub use glow::{GlowSprite, GlowTexture, facing_rotation, glow_opacity};
pub use lights::{AmbientLight, DirectionalLight, Lights};
pub use viewer::{FrameClock, LoadState, ModelNode, SurfaceSize, Viewer, Viewport};

pub fn crate_info() -> &'static str {
    "bouquet-scene v0.1.0"
}

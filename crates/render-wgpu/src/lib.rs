//! wgpu render backend for the bouquet viewer.
//!
//! Draws the loaded model with Lambert shading from the scene's two lights,
//! then the glow quad with additive blending on top, into a transparent
//! surface.
//!
//! # Invariants
//! - Renderer never mutates viewer state.
//! - GPU resources for the model are uploaded once, on the first frame after
//!   the model attaches.

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, RenderError, preferred_alpha_mode};
pub use gpu::WgpuRenderer;

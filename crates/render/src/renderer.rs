use std::fmt::Write;

use bouquet_scene::{LoadState, Viewer};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the viewer (scene, camera, lights) and produces output.
/// It never mutates the viewer; the frame loop owns it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the viewer's scene through its camera.
    fn render(&self, viewer: &Viewer) -> Self::Output;
}

/// Human-readable dump of what a frame would draw.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, viewer: &Viewer) -> String {
        let mut out = String::new();
        let cam = viewer.camera();
        let lights = viewer.lights();

        let state = match viewer.load_state() {
            LoadState::Pending => "pending".to_string(),
            LoadState::Loaded => "loaded".to_string(),
            LoadState::Failed(reason) => format!("failed ({reason})"),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "=== Frame {} (model {state}) ===", viewer.clock().frames);
        let _ = writeln!(
            out,
            "Camera: pos=({:.3}, {:.3}, {:.3}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3} near={} far={}",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.fov_degrees(),
            cam.aspect,
            cam.near,
            cam.far
        );
        let _ = writeln!(
            out,
            "Lights: ambient={:.1} key={:.1} from ({:.0}, {:.0}, {:.0})",
            lights.ambient.intensity,
            lights.key.intensity,
            lights.key.position.x,
            lights.key.position.y,
            lights.key.position.z
        );

        match viewer.model() {
            Some(node) => {
                let b = node.model.bounds;
                let _ = writeln!(
                    out,
                    "Model: primitives={} vertices={} triangles={}",
                    node.model.primitives.len(),
                    node.model.vertex_count(),
                    node.model.triangle_count()
                );
                let _ = writeln!(
                    out,
                    "  bounds=({:.3}, {:.3}, {:.3})..({:.3}, {:.3}, {:.3})",
                    b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
                );
                let p = node.transform.position;
                let _ = writeln!(
                    out,
                    "  offset=({:.3}, {:.3}, {:.3}) rotation_y={:.4}",
                    p.x, p.y, p.z, node.rotation_y
                );
                match &node.glow {
                    Some(glow) => {
                        let _ = writeln!(
                            out,
                            "Glow: opacity={:.4} size={:.3} lift={:.3}",
                            glow.opacity, glow.transform.scale.x, glow.transform.position.y
                        );
                    }
                    None => out.push_str("Glow: none\n"),
                }
            }
            None => out.push_str("Model: none (lights only)\n"),
        }

        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}

use bouquet_assets::{LoadOutcome, ModelData};
use bouquet_common::Transform;
use glam::{Mat4, Quat, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::ViewerConfig;
use crate::framing::{Framing, auto_frame};
use crate::glow::{GlowSprite, facing_rotation, glow_opacity};
use crate::lights::Lights;

/// The loaded model and its per-frame state.
///
/// The node's transform is `translate(position) * rotate_y(rotation_y)`, so the
/// model spins about its own asset origin, shifted by the recentering offset.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub model: ModelData,
    pub transform: Transform,
    /// Accumulated spin about +Y, kept in `[0, 2π)`.
    pub rotation_y: f64,
    pub glow: Option<GlowSprite>,
}

impl ModelNode {
    fn new(model: ModelData) -> Self {
        Self {
            model,
            transform: Transform::default(),
            rotation_y: 0.0,
            glow: None,
        }
    }

    /// Model-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// World-space center of the model geometry.
    #[cfg(test)]
    fn world_center(&self) -> Vec3 {
        self.matrix().transform_point3(self.model.bounds.center())
    }

    /// Glow-quad-to-world matrix, if the model has a glow.
    pub fn glow_matrix(&self) -> Option<Mat4> {
        self.glow
            .as_ref()
            .map(|g| self.matrix() * g.transform.matrix())
    }

    fn spin(&mut self, step: f64) {
        self.rotation_y = (self.rotation_y + step).rem_euclid(std::f64::consts::TAU);
        self.transform.rotation = Quat::from_rotation_y(self.rotation_y as f32);
    }
}

/// Frame counter plus the glow pulse phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    pub frames: u64,
    /// Advances only on frames where a glow exists.
    pub glow_phase: f64,
}

/// Logical viewport size and the pixel ratio applied to the output surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: ((self.width * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height * self.pixel_ratio).round() as u32).max(1),
        }
    }
}

/// Output surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    /// The request failed; the scene keeps rendering lights only.
    Failed(String),
}

/// Scene, camera, lights, the optional model and the frame clock.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
    camera: PerspectiveCamera,
    lights: Lights,
    viewport: Viewport,
    model: Option<ModelNode>,
    framing: Option<Framing>,
    clock: FrameClock,
    load_state: LoadState,
}

impl Viewer {
    /// Build the scene for a logical viewport of `width` x `height`.
    pub fn new(config: ViewerConfig, width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let camera = PerspectiveCamera::new(config.fov_degrees, aspect, config.near, config.far);
        let viewport = Viewport {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: device_pixel_ratio.min(config.max_pixel_ratio),
        };
        tracing::debug!(width, height, aspect, "viewer created");
        Self {
            config,
            camera,
            lights: Lights::default(),
            viewport,
            model: None,
            framing: None,
            clock: FrameClock::default(),
            load_state: LoadState::Pending,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn model(&self) -> Option<&ModelNode> {
        self.model.as_ref()
    }

    pub fn glow(&self) -> Option<&GlowSprite> {
        self.model.as_ref().and_then(|m| m.glow.as_ref())
    }

    pub fn framing(&self) -> Option<&Framing> {
        self.framing.as_ref()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Apply the single completion of the model request.
    ///
    /// On success the model is recentered on the origin, the camera framed
    /// from its extent, and the glow attached. On failure the error is logged
    /// and the scene stays empty. Any later outcome is ignored.
    pub fn on_load(&mut self, outcome: LoadOutcome) {
        if self.load_state != LoadState::Pending {
            tracing::warn!("model already settled; ignoring extra load outcome");
            return;
        }
        match outcome {
            LoadOutcome::Loaded(model) => self.attach_model(model),
            LoadOutcome::Failed(e) => {
                tracing::error!("model load error: {e}");
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    fn attach_model(&mut self, mut model: ModelData) {
        if self.config.emissive {
            for material in model.materials_mut() {
                material.emissive = self.config.emissive_color;
                material.emissive_intensity = self.config.emissive_intensity;
            }
        }

        let mut node = ModelNode::new(model);
        match auto_frame(
            &node.model.bounds,
            self.config.camera_height_factor,
            self.config.camera_distance_factor,
        ) {
            Some(framing) => {
                node.transform.position = framing.recenter_offset;
                self.camera.set_position(framing.camera_position);
                self.camera.look_at(Vec3::ZERO);
                if self.config.glow {
                    node.glow = Some(GlowSprite::for_framing(&framing, &self.config));
                }
                tracing::debug!(
                    size = ?framing.size,
                    center = ?framing.center,
                    max_dim = framing.max_dimension,
                    camera = ?framing.camera_position,
                    "framed model"
                );
                self.framing = Some(framing);
            }
            None => {
                tracing::warn!("model has no spatial extent; keeping default camera");
            }
        }

        tracing::info!(
            primitives = node.model.primitives.len(),
            vertices = node.model.vertex_count(),
            glow = node.glow.is_some(),
            "model attached"
        );
        self.model = Some(node);
        self.load_state = LoadState::Loaded;
    }

    /// Advance one display frame.
    pub fn tick(&mut self) {
        self.clock.frames += 1;

        let Some(node) = self.model.as_mut() else {
            return;
        };
        node.spin(self.config.rotation_step);

        let parent = node.matrix();
        let parent_rotation = node.transform.rotation;
        if let Some(glow) = node.glow.as_mut() {
            self.clock.glow_phase += self.config.glow_phase_step;
            glow.opacity = glow_opacity(
                self.clock.glow_phase,
                self.config.glow_base_opacity,
                self.config.glow_amplitude,
            );

            let world_position = parent.transform_point3(glow.transform.position);
            let facing = facing_rotation(world_position, self.camera.position);
            glow.transform.rotation = parent_rotation.inverse() * facing;
        }
    }

    /// Track a new logical viewport size.
    ///
    /// Only the camera aspect changes. Returns the new output surface size,
    /// or `None` for a zero-sized viewport, which is ignored.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Option<SurfaceSize> {
        if !(width > 0.0 && height > 0.0) {
            tracing::debug!(width, height, "ignoring zero-sized viewport");
            return None;
        }
        self.camera.set_aspect(width / height);
        self.viewport = Viewport {
            width,
            height,
            pixel_ratio: device_pixel_ratio.min(self.config.max_pixel_ratio),
        };
        Some(self.viewport.surface_size())
    }
}

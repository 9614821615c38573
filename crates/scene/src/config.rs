use serde::{Deserialize, Serialize};

/// Tunables for the viewer. Defaults reproduce the bouquet page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians added to the model's Y rotation every frame.
    pub rotation_step: f64,
    /// Camera height as a multiple of the model's largest extent.
    pub camera_height_factor: f32,
    /// Camera distance along +Z as a multiple of the model's largest extent.
    pub camera_distance_factor: f32,
    /// Attach the additive glow billboard once the model loads.
    pub glow: bool,
    /// Radians added to the glow pulse phase every frame.
    pub glow_phase_step: f64,
    pub glow_base_opacity: f32,
    pub glow_amplitude: f32,
    /// Glow quad edge length as a multiple of the model's largest extent.
    pub glow_scale_factor: f32,
    /// Glow height above the model origin as a fraction of the model's height.
    pub glow_lift_factor: f32,
    /// Edge length in pixels of the generated gradient texture.
    pub glow_texture_size: u32,
    /// Tint every material with an emissive colour.
    pub emissive: bool,
    pub emissive_color: [f32; 3],
    pub emissive_intensity: f32,
    /// Upper bound on the device pixel ratio used for the output surface.
    pub max_pixel_ratio: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            rotation_step: 0.002,
            camera_height_factor: 0.6,
            camera_distance_factor: 2.0,
            glow: true,
            glow_phase_step: 0.015,
            glow_base_opacity: 0.44,
            glow_amplitude: 0.03,
            glow_scale_factor: 1.3,
            glow_lift_factor: 0.45,
            glow_texture_size: 256,
            emissive: false,
            // #7fffe8
            emissive_color: [127.0 / 255.0, 1.0, 232.0 / 255.0],
            emissive_intensity: 0.35,
            max_pixel_ratio: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_scene() {
        let c = ViewerConfig::default();
        assert_eq!(c.fov_degrees, 45.0);
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 100.0);
        assert_eq!(c.rotation_step, 0.002);
        assert!(c.glow);
        assert!(!c.emissive);
        assert_eq!(c.max_pixel_ratio, 2.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: ViewerConfig = serde_json::from_str(r#"{ "glow": false, "far": 250.0 }"#).unwrap();
        assert!(!c.glow);
        assert_eq!(c.far, 250.0);
        assert_eq!(c.fov_degrees, 45.0);
        assert_eq!(c.glow_texture_size, 256);
    }
}

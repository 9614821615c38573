use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Light shining from `position` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Y)
    }
}

/// The scene's two lights: a white fill and a white key from above-right-front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub key: DirectionalLight,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            },
            key: DirectionalLight {
                color: [1.0, 1.0, 1.0],
                intensity: 2.0,
                position: Vec3::new(3.0, 5.0, 4.0),
                target: Vec3::ZERO,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_light_points_at_origin() {
        let lights = Lights::default();
        let dir = lights.key.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir + Vec3::new(3.0, 5.0, 4.0).normalize()).length() < 1e-6);
        assert_eq!(lights.ambient.intensity, 1.0);
        assert_eq!(lights.key.intensity, 2.0);
    }
}

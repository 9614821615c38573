use bouquet_common::Transform;
use glam::{Mat3, Quat, Vec3};

use crate::config::ViewerConfig;
use crate::framing::Framing;

/// Opacity of the glow at a given pulse phase.
pub fn glow_opacity(phase: f64, base: f32, amplitude: f32) -> f32 {
    base + amplitude * phase.sin() as f32
}

/// Rotation that turns a quad's +Z normal from `from` towards `to`, keeping
/// its +Y as close to world up as possible.
pub fn facing_rotation(from: Vec3, to: Vec3) -> Quat {
    let Some(mut z) = (to - from).try_normalize() else {
        return Quat::IDENTITY;
    };
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // Looking straight up or down: nudge off the pole.
        z.z += 1e-4;
        z = z.normalize();
        x = Vec3::Y.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// One colour stop of a radial gradient. Channels and alpha are 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub rgba: [f32; 4],
}

/// Soft pink falloff used behind the bouquet.
pub const GLOW_STOPS: [ColorStop; 3] = [
    ColorStop {
        offset: 0.0,
        rgba: [1.0, 170.0 / 255.0, 185.0 / 255.0, 0.55],
    },
    ColorStop {
        offset: 0.4,
        rgba: [1.0, 182.0 / 255.0, 193.0 / 255.0, 0.25],
    },
    ColorStop {
        offset: 1.0,
        rgba: [1.0, 182.0 / 255.0, 193.0 / 255.0, 0.0],
    },
];

/// Square RGBA8 image of a radial gradient centred in the square, reaching
/// its last stop at the inscribed circle.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowTexture {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl GlowTexture {
    pub fn generate(size: u32) -> Self {
        Self::with_stops(size, &GLOW_STOPS)
    }

    pub fn with_stops(size: u32, stops: &[ColorStop]) -> Self {
        let size = size.max(1);
        let half = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - half;
                let dy = y as f32 + 0.5 - half;
                let t = (dx * dx + dy * dy).sqrt() / half;
                let rgba = sample_stops(stops, t);
                pixels.extend(rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
            }
        }
        Self { size, pixels }
    }

    /// RGBA at pixel `(x, y)`, or `None` outside the image.
    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = ((y * self.size + x) * 4) as usize;
        self.pixels.get(i..i + 4)?.try_into().ok()
    }
}

fn sample_stops(stops: &[ColorStop], t: f32) -> [f32; 4] {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return first.rgba;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return std::array::from_fn(|i| a.rgba[i] + (b.rgba[i] - a.rgba[i]) * f);
        }
    }
    last.rgba
}

/// Additive, camera-facing glow quad parented to the model node.
///
/// The quad is a unit square in its local XY plane; `transform.scale`
/// stretches it to size.
#[derive(Debug, Clone)]
pub struct GlowSprite {
    /// Transform relative to the model node.
    pub transform: Transform,
    pub opacity: f32,
    pub texture: GlowTexture,
}

impl GlowSprite {
    /// Size the quad from the model framing and lift it towards the top of
    /// the model.
    pub fn for_framing(framing: &Framing, config: &ViewerConfig) -> Self {
        let edge = framing.max_dimension * config.glow_scale_factor;
        Self {
            transform: Transform {
                position: Vec3::new(0.0, framing.size.y * config.glow_lift_factor, 0.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::new(edge, edge, 1.0),
            },
            opacity: config.glow_base_opacity,
            texture: GlowTexture::generate(config.glow_texture_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_stays_within_pulse_band() {
        for i in 0..2000 {
            let o = glow_opacity(f64::from(i) * 0.015, 0.44, 0.03);
            assert!((0.41 - 1e-6..=0.47 + 1e-6).contains(&o));
        }
        assert!((glow_opacity(0.0, 0.44, 0.03) - 0.44).abs() < 1e-7);
        assert!((glow_opacity(std::f64::consts::FRAC_PI_2, 0.44, 0.03) - 0.47).abs() < 1e-6);
    }

    #[test]
    fn facing_rotation_points_normal_at_target() {
        let from = Vec3::new(1.0, 2.0, 0.0);
        for to in [
            Vec3::new(0.0, 3.0, 10.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, -4.0),
        ] {
            let q = facing_rotation(from, to);
            let normal = q * Vec3::Z;
            assert!((normal - (to - from).normalize()).length() < 1e-5);
            // Quad's right edge stays horizontal.
            assert!((q * Vec3::X).y.abs() < 1e-5);
        }
    }

    #[test]
    fn facing_rotation_handles_poles_and_coincident_points() {
        let q = facing_rotation(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert!(q.is_finite());
        assert!((q * Vec3::Z).y > 0.99);
        assert_eq!(facing_rotation(Vec3::ONE, Vec3::ONE), Quat::IDENTITY);
    }

    #[test]
    fn gradient_is_brightest_in_the_middle_and_clear_at_the_corners() {
        let tex = GlowTexture::generate(64);
        assert_eq!(tex.pixels.len(), 64 * 64 * 4);

        let center = tex.pixel(32, 32).unwrap();
        // Pixel centres sit half a texel off the true centre: just under 0.55.
        assert!((130..=141).contains(&center[3]), "center alpha {}", center[3]);
        assert_eq!(center[0], 255);

        assert_eq!(tex.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(tex.pixel(63, 63).unwrap()[3], 0);
    }

    #[test]
    fn pixel_lookup_outside_the_image_is_none() {
        let tex = GlowTexture::generate(16);
        assert!(tex.pixel(15, 15).is_some());
        assert_eq!(tex.pixel(16, 0), None);
        assert_eq!(tex.pixel(0, 16), None);
        assert_eq!(tex.pixel(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn gradient_alpha_never_increases_outwards() {
        let tex = GlowTexture::generate(128);
        let row: Vec<u8> = (64..128).map(|x| tex.pixel(x, 64).unwrap()[3]).collect();
        assert!(row.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn sample_stops_interpolates_between_neighbours() {
        let mid = sample_stops(&GLOW_STOPS, 0.2);
        assert!((mid[3] - 0.4).abs() < 1e-6);
        assert_eq!(sample_stops(&GLOW_STOPS, 2.0), GLOW_STOPS[2].rgba);
        assert_eq!(sample_stops(&[], 0.5), [0.0; 4]);
    }

    #[test]
    fn sprite_is_sized_and_lifted_from_framing() {
        let framing = Framing {
            size: Vec3::new(1.0, 4.0, 2.0),
            center: Vec3::ZERO,
            max_dimension: 4.0,
            recenter_offset: Vec3::ZERO,
            camera_position: Vec3::new(0.0, 2.4, 8.0),
        };
        let config = ViewerConfig {
            glow_texture_size: 8,
            ..ViewerConfig::default()
        };
        let sprite = GlowSprite::for_framing(&framing, &config);
        assert!((sprite.transform.scale.x - 5.2).abs() < 1e-5);
        assert!((sprite.transform.scale.y - 5.2).abs() < 1e-5);
        assert_eq!(sprite.transform.scale.z, 1.0);
        assert!((sprite.transform.position.y - 1.8).abs() < 1e-5);
        assert_eq!(sprite.texture.size, 8);
    }
}

use bouquet_common::Aabb;
use glam::Vec3;

/// Camera placement derived from a model's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub size: Vec3,
    pub center: Vec3,
    /// Largest of the three extents.
    pub max_dimension: f32,
    /// Offset that moves the box center onto the origin.
    pub recenter_offset: Vec3,
    pub camera_position: Vec3,
}

/// Place the camera at `(0, height * d, distance * d)` where `d` is the
/// largest extent, so any model fills a similar share of the view whatever
/// its native units.
///
/// Returns `None` for empty or zero-extent boxes.
pub fn auto_frame(bounds: &Aabb, height_factor: f32, distance_factor: f32) -> Option<Framing> {
    if bounds.is_empty() {
        return None;
    }
    let size = bounds.size();
    let center = bounds.center();
    let max_dimension = size.max_element();
    if !max_dimension.is_finite() || max_dimension <= 0.0 {
        return None;
    }
    Some(Framing {
        size,
        center,
        max_dimension,
        recenter_offset: -center,
        camera_position: Vec3::new(
            0.0,
            max_dimension * height_factor,
            max_dimension * distance_factor,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(min: Vec3, max: Vec3) -> Framing {
        auto_frame(&Aabb::new(min, max), 0.6, 2.0).unwrap()
    }

    #[test]
    fn camera_distance_follows_largest_extent() {
        for size in [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(10.0, 0.5, 0.5),
            Vec3::new(0.02, 0.3, 0.01),
        ] {
            let f = frame(Vec3::ZERO, size);
            let d = size.max_element();
            assert_eq!(f.max_dimension, d);
            assert!((f.camera_position.z - 2.0 * d).abs() < 1e-6);
            assert!((f.camera_position.y - 0.6 * d).abs() < 1e-6);
            assert_eq!(f.camera_position.x, 0.0);
        }
    }

    #[test]
    fn recenter_offset_moves_center_to_origin() {
        let f = frame(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 1.0));
        assert_eq!(f.center, Vec3::new(3.0, 3.0, 0.0));
        assert_eq!(f.center + f.recenter_offset, Vec3::ZERO);
    }

    #[test]
    fn framing_is_independent_of_box_position() {
        let a = frame(Vec3::ZERO, Vec3::splat(2.0));
        let b = frame(Vec3::splat(100.0), Vec3::splat(102.0));
        assert_eq!(a.camera_position, b.camera_position);
    }

    #[test]
    fn degenerate_boxes_do_not_frame() {
        assert!(auto_frame(&Aabb::EMPTY, 0.6, 2.0).is_none());
        assert!(auto_frame(&Aabb::new(Vec3::ONE, Vec3::ONE), 0.6, 2.0).is_none());
    }
}

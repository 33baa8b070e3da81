//! Court-to-clip coordinate mapping
//!
//! Fits the court, its walls and a padding margin into clip space while
//! keeping court units square on screen.

use glam::{Affine2, Mat4, UVec2, Vec2, Vec4};

use crate::consts::{SCENE_PADDING, WALL_RADIUS};

/// Court <-> clip transform for one drawable size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtTransform {
    /// Clip units per court unit (before the aspect correction on x)
    pub scale: f32,
    /// Drawable width / height
    pub aspect: f32,
    /// Court point that lands at the center of the display
    pub center: Vec2,
    /// Column-major matrix handed to the backend as a uniform
    pub court_to_clip: Mat4,
    /// Exact inverse of `court_to_clip` in the z = 0 plane
    pub clip_to_court: Affine2,
    drawable_size: UVec2,
}

impl CourtTransform {
    pub fn new(court_radius: Vec2, drawable_size: UVec2) -> Self {
        // A zero-sized window would make the aspect ratio degenerate
        let drawable_size = drawable_size.max(UVec2::ONE);

        let margin = Vec2::splat(2.0 * WALL_RADIUS + SCENE_PADDING);
        let scene_min = -court_radius - margin;
        let scene_max = court_radius + margin;
        let extent = scene_max - scene_min;

        let aspect = drawable_size.x as f32 / drawable_size.y as f32;
        // x must fit in [-aspect, aspect], y in [-1, 1]
        let scale = (2.0 * aspect / extent.x).min(2.0 / extent.y);
        let center = 0.5 * (scene_max + scene_min);

        let sx = scale / aspect;
        let court_to_clip = Mat4::from_cols(
            Vec4::new(sx, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-center.x * sx, -center.y * scale, 0.0, 1.0),
        );
        let clip_to_court = Affine2::from_cols(
            Vec2::new(aspect / scale, 0.0),
            Vec2::new(0.0, 1.0 / scale),
            center,
        );

        Self {
            scale,
            aspect,
            center,
            court_to_clip,
            clip_to_court,
            drawable_size,
        }
    }

    pub fn court_to_clip_point(&self, court: Vec2) -> Vec2 {
        self.court_to_clip.transform_point3(court.extend(0.0)).truncate()
    }

    pub fn clip_to_court_point(&self, clip: Vec2) -> Vec2 {
        self.clip_to_court.transform_point2(clip)
    }

    /// Window pixel (origin top-left, y down) to court coordinates
    pub fn window_to_court(&self, pixel: Vec2) -> Vec2 {
        let size = self.drawable_size.as_vec2();
        let clip = Vec2::new(
            2.0 * pixel.x / size.x - 1.0,
            1.0 - 2.0 * pixel.y / size.y,
        );
        self.clip_to_court_point(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COURT: Vec2 = Vec2::new(7.0, 5.0);

    #[test]
    fn test_scene_fits_clip_space() {
        for size in [UVec2::new(1280, 720), UVec2::new(600, 900), UVec2::new(512, 512)] {
            let t = CourtTransform::new(COURT, size);
            let corner = COURT + Vec2::splat(2.0 * WALL_RADIUS + SCENE_PADDING);
            let max = t.court_to_clip_point(corner);
            let min = t.court_to_clip_point(-corner);

            assert!(max.x <= 1.0 + 1e-5 && max.y <= 1.0 + 1e-5);
            assert!(min.x >= -1.0 - 1e-5 && min.y >= -1.0 - 1e-5);
            // The limiting axis touches the edge
            assert!((max.x - 1.0).abs() < 1e-5 || (max.y - 1.0).abs() < 1e-5);
            // Centered
            assert!((max + min).length() < 1e-5);
        }
    }

    #[test]
    fn test_court_units_are_square_on_screen() {
        let size = UVec2::new(1600, 900);
        let t = CourtTransform::new(COURT, size);
        let dx = t.court_to_clip_point(Vec2::X) - t.court_to_clip_point(Vec2::ZERO);
        let dy = t.court_to_clip_point(Vec2::Y) - t.court_to_clip_point(Vec2::ZERO);
        let px = dx.x * size.x as f32 / 2.0;
        let py = dy.y * size.y as f32 / 2.0;
        assert!((px - py).abs() < 1e-3);
    }

    #[test]
    fn test_zero_size_drawable_is_usable() {
        let t = CourtTransform::new(COURT, UVec2::new(0, 0));
        assert!(t.scale.is_finite() && t.aspect.is_finite());
    }

    #[test]
    fn test_window_center_is_court_center() {
        let t = CourtTransform::new(COURT, UVec2::new(800, 600));
        let p = t.window_to_court(Vec2::new(400.0, 300.0));
        assert!(p.length() < 1e-5);
        // Top-left pixel is up and to the left in the court
        let tl = t.window_to_court(Vec2::ZERO);
        assert!(tl.x < 0.0 && tl.y > 0.0);
    }

    proptest! {
        #[test]
        fn prop_clip_round_trip(
            x in -1.0f32..1.0,
            y in -1.0f32..1.0,
            w in 1u32..4000,
            h in 1u32..4000,
        ) {
            let t = CourtTransform::new(COURT, UVec2::new(w, h));
            let p = Vec2::new(x, y);
            let back = t.court_to_clip_point(t.clip_to_court_point(p));
            prop_assert!((back - p).length() < 1e-4);
        }
    }
}

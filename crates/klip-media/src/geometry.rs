//! Crop geometry calculation.
//!
//! One pure function shared by both render shapes, so hook and main segments
//! of the same clip always use identical framing.

use klip_models::encoding::{TARGET_HEIGHT, TARGET_WIDTH};

/// A crop rectangle in source pixel units.
///
/// Always satisfies `crop_x + crop_width <= source_width` and
/// `crop_y + crop_height <= source_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    pub crop_width: u32,
    pub crop_height: u32,
    pub crop_x: u32,
    pub crop_y: u32,
}

/// Compute the crop rectangle that fits the target aspect ratio.
///
/// When the source is proportionally wider than the target, the full height
/// is kept and `focus_x` (0.0 = left edge, 1.0 = right edge) biases where the
/// window sits horizontally. When the source is narrower or equal, the full
/// width is kept and the window is always centered vertically; `focus_x` has
/// no effect.
pub fn compute_crop(
    source_w: u32,
    source_h: u32,
    target_w: u32,
    target_h: u32,
    focus_x: f64,
) -> CropGeometry {
    let target_ratio = target_w as f64 / target_h as f64;
    let source_ratio = source_w as f64 / source_h as f64;
    let focus_x = focus_x.clamp(0.0, 1.0);

    if source_ratio > target_ratio {
        // Source wider than target: crop full height, slide horizontally
        let crop_height = source_h;
        let crop_width = ((source_h as f64) * target_ratio).round() as u32;
        let crop_width = crop_width.min(source_w);
        let max_x = source_w - crop_width;
        let crop_x = (((source_w - crop_width) as f64) * focus_x).round() as u32;
        CropGeometry {
            crop_width,
            crop_height,
            crop_x: crop_x.min(max_x),
            crop_y: 0,
        }
    } else {
        // Source narrower or equal: crop full width, center vertically
        let crop_width = source_w;
        let crop_height = ((source_w as f64) / target_ratio).round() as u32;
        let crop_height = crop_height.min(source_h);
        let crop_y = (((source_h - crop_height) as f64) / 2.0).round() as u32;
        CropGeometry {
            crop_width,
            crop_height,
            crop_x: 0,
            crop_y: crop_y.min(source_h - crop_height),
        }
    }
}

/// Compute the crop for the default 1080x1920 portrait target.
pub fn compute_portrait_crop(source_w: u32, source_h: u32, focus_x: f64) -> CropGeometry {
    compute_crop(source_w, source_h, TARGET_WIDTH, TARGET_HEIGHT, focus_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_to_portrait_centered() {
        // 1920x1080 -> 1080x1920 target with focus 0.5
        let crop = compute_portrait_crop(1920, 1080, 0.5);
        assert_eq!(crop.crop_width, 608); // round(1080 * 1080/1920)
        assert_eq!(crop.crop_height, 1080);
        assert_eq!(crop.crop_x, 656); // round((1920-608) * 0.5)
        assert_eq!(crop.crop_y, 0);
    }

    #[test]
    fn test_focus_extremes() {
        let left = compute_portrait_crop(1920, 1080, 0.0);
        assert_eq!(left.crop_x, 0);

        let right = compute_portrait_crop(1920, 1080, 1.0);
        assert_eq!(right.crop_x, 1920 - right.crop_width);
    }

    #[test]
    fn test_narrow_source_centers_vertically() {
        // Square source is narrower than 9:16? 1.0 > 0.5625, so still wider.
        // A genuinely narrow source: 1080x3000.
        let crop = compute_crop(1080, 3000, 1080, 1920, 0.9);
        assert_eq!(crop.crop_width, 1080);
        assert_eq!(crop.crop_height, 1920);
        assert_eq!(crop.crop_x, 0); // focus_x ignored in this branch
        assert_eq!(crop.crop_y, 540);
    }

    #[test]
    fn test_equal_ratio_is_full_frame() {
        let crop = compute_crop(1080, 1920, 1080, 1920, 0.3);
        assert_eq!(crop.crop_width, 1080);
        assert_eq!(crop.crop_height, 1920);
        assert_eq!(crop.crop_x, 0);
        assert_eq!(crop.crop_y, 0);
    }

    #[test]
    fn test_bounds_invariant() {
        let dims = [
            (1920u32, 1080u32),
            (1280, 720),
            (3840, 2160),
            (640, 480),
            (1080, 1920),
            (720, 1280),
            (1, 1),
            (10000, 7),
        ];
        for (w, h) in dims {
            for focus in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let crop = compute_crop(w, h, 1080, 1920, focus);
                assert!(crop.crop_x + crop.crop_width <= w, "{}x{} focus {}", w, h, focus);
                assert!(crop.crop_y + crop.crop_height <= h, "{}x{} focus {}", w, h, focus);
                assert!(crop.crop_width > 0 && crop.crop_height > 0);
            }
        }
    }
}

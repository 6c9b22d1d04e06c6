//! FFmpeg filter string construction.

use std::path::Path;

use klip_models::encoding::{TARGET_HEIGHT, TARGET_WIDTH};

use crate::geometry::CropGeometry;

/// Build the crop+scale filter that turns a source frame into the portrait
/// target frame.
pub fn crop_scale_filter(crop: &CropGeometry) -> String {
    format!(
        "crop={}:{}:{}:{},scale={}:{}",
        crop.crop_width, crop.crop_height, crop.crop_x, crop.crop_y, TARGET_WIDTH, TARGET_HEIGHT
    )
}

/// Build a subtitles burn-in filter for the given caption file.
pub fn subtitles_filter(caption_path: impl AsRef<Path>) -> String {
    format!(
        "subtitles='{}'",
        escape_filter_path(caption_path.as_ref())
    )
}

/// Crop, scale and burn captions in one filter chain.
pub fn crop_scale_subtitles_filter(crop: &CropGeometry, caption_path: impl AsRef<Path>) -> String {
    format!(
        "{},{}",
        crop_scale_filter(crop),
        subtitles_filter(caption_path)
    )
}

/// Escape a path for use inside an FFmpeg filter argument.
///
/// Backslashes, colons and single quotes all carry meaning in filter syntax
/// (Windows drive letters trip the colon case).
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_scale_filter() {
        let crop = CropGeometry {
            crop_width: 608,
            crop_height: 1080,
            crop_x: 656,
            crop_y: 0,
        };
        assert_eq!(
            crop_scale_filter(&crop),
            "crop=608:1080:656:0,scale=1080:1920"
        );
    }

    #[test]
    fn test_subtitles_filter_escapes_path() {
        let filter = subtitles_filter(Path::new("/tmp/it's a clip.ass"));
        assert_eq!(filter, "subtitles='/tmp/it\\'s a clip.ass'");
    }

    #[test]
    fn test_escape_windows_drive_colon() {
        let escaped = escape_filter_path(Path::new("C:/captions/clip.ass"));
        assert_eq!(escaped, "C\\:/captions/clip.ass");
    }

    #[test]
    fn test_combined_chain_order() {
        let crop = CropGeometry {
            crop_width: 608,
            crop_height: 1080,
            crop_x: 656,
            crop_y: 0,
        };
        let chain = crop_scale_subtitles_filter(&crop, Path::new("/tmp/c.ass"));
        assert!(chain.starts_with("crop="));
        assert!(chain.ends_with("subtitles='/tmp/c.ass'"));
    }
}

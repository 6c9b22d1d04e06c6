//! Thumbnail generation.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner, ToolPaths};
use crate::error::MediaResult;

/// Thumbnail width in pixels; height follows the aspect ratio.
const THUMBNAIL_SCALE_WIDTH: u32 = 480;

/// Grab the first frame at one second in, to skip fade-from-black openings.
const THUMBNAIL_TIMESTAMP: &str = "00:00:01";

/// Generate a JPEG thumbnail from a rendered clip.
pub async fn generate_thumbnail(
    tools: &ToolPaths,
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let filter = format!("scale={}:-2", THUMBNAIL_SCALE_WIDTH);

    let cmd = FfmpegCommand::new(video_path.as_ref(), output_path.as_ref())
        .input_arg("-ss")
        .input_arg(THUMBNAIL_TIMESTAMP)
        .output_arg("-frames:v")
        .output_arg("1")
        .video_filter(filter);

    FfmpegRunner::new(tools).run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_args() {
        let cmd = FfmpegCommand::new("clip.mp4", "thumb.jpg")
            .input_arg("-ss")
            .input_arg(THUMBNAIL_TIMESTAMP)
            .output_arg("-frames:v")
            .output_arg("1")
            .video_filter(format!("scale={}:-2", THUMBNAIL_SCALE_WIDTH));
        let args = cmd.build_args();
        assert!(args.contains(&"-frames:v".to_string()));
        assert!(args.contains(&"scale=480:-2".to_string()));
    }
}

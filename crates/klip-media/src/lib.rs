//! FFmpeg/yt-dlp wrapper for the clip pipeline.
//!
//! This crate provides:
//! - Tool discovery and type-safe FFmpeg command building
//! - Video probing (dimensions, duration, frame rate)
//! - Crop geometry for portrait reframing
//! - Caption track generation (SRT, styled ASS, word-level ASS)
//! - Clip rendering (simple and hook + main with cross-fade)
//! - Video download and thumbnails

pub mod captions;
pub mod command;
pub mod download;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod probe;
pub mod render;
pub mod thumbnail;

pub use captions::{
    build_ass, build_srt, build_word_level_ass, window_segments, CaptionAnimation, CaptionStyle,
};
pub use command::{FfmpegCommand, FfmpegRunner, ToolPaths};
pub use download::{download_video, get_video_info, is_supported_url, VideoMetadata};
pub use error::{MediaError, MediaResult};
pub use filters::escape_filter_path;
pub use geometry::{compute_crop, compute_portrait_crop, CropGeometry};
pub use probe::{probe_video, VideoInfo};
pub use render::{ClipRenderer, CROSSFADE_DURATION_SECS, MIN_HOOK_DURATION_SECS};
pub use thumbnail::generate_thumbnail;

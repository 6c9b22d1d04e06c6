//! Shared data models for the klip pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Clip specifications and render results
//! - Transcript segments
//! - Bracketed timestamp parsing and formatting
//! - YouTube URL extraction from free text

pub mod clip;
pub mod encoding;
pub mod timestamp;
pub mod transcript;
pub mod utils;

// Re-export common types
pub use clip::{sanitize_title, ClipSpec, RenderResult};
pub use encoding::EncodingConfig;
pub use timestamp::{format_seconds, parse_timestamp, parse_timestamp_lenient};
pub use transcript::{Transcript, TranscriptSegment};
pub use utils::extract_video_url;

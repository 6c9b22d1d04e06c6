//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory for downloads and temporary segment/caption files
    pub work_dir: PathBuf,
    /// Directory rendered clips are written to
    pub output_dir: PathBuf,
    /// Path of the project store document
    pub store_path: PathBuf,
    /// Pause between clips in a batch
    pub clip_pause: Duration,
    /// Timeout for a single encode invocation
    pub encode_timeout: Duration,
    /// Horizontal crop focus, 0.0 = left, 1.0 = right
    pub focus_x: f64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/klip"),
            output_dir: PathBuf::from("/tmp/klip/output"),
            store_path: PathBuf::from("/tmp/klip/projects.json"),
            clip_pause: Duration::from_secs(1),
            encode_timeout: Duration::from_secs(600),
            focus_x: 0.5,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("KLIP_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            output_dir: std::env::var("KLIP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            store_path: std::env::var("KLIP_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            clip_pause: Duration::from_secs(
                std::env::var("KLIP_CLIP_PAUSE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1),
            ),
            encode_timeout: Duration::from_secs(
                std::env::var("KLIP_ENCODE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            focus_x: std::env::var("KLIP_FOCUS_X")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|f: f64| f.clamp(0.0, 1.0))
                .unwrap_or(0.5),
        }
    }
}

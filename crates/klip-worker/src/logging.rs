//! Structured clip logging utilities.

use tracing::{error, info, warn};
use uuid::Uuid;

/// Logger carrying clip context through batch processing.
#[derive(Debug, Clone)]
pub struct ClipLogger {
    clip_id: String,
    stage: String,
}

impl ClipLogger {
    pub fn new(clip_id: Uuid, stage: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            stage: stage.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(clip_id = %self.clip_id, stage = %self.stage, "Started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(clip_id = %self.clip_id, stage = %self.stage, "{}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(clip_id = %self.clip_id, stage = %self.stage, "{}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(clip_id = %self.clip_id, stage = %self.stage, "Failed: {}", message);
    }
}

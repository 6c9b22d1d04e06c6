//! Clip specification and render result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Duration policy for manually-extracted clips (seconds).
pub const MANUAL_MIN_DURATION_SECS: f64 = 15.0;
pub const MANUAL_MAX_DURATION_SECS: f64 = 90.0;

/// Duration policy for AI-recommended clips (seconds).
pub const RECOMMENDED_MIN_DURATION_SECS: f64 = 15.0;
pub const RECOMMENDED_MAX_DURATION_SECS: f64 = 60.0;

/// Maximum length of a sanitized filename title.
pub const MAX_TITLE_FILENAME_LEN: usize = 100;

/// One requested output clip.
///
/// Created by the analysis extractor or the recommendation path, consumed
/// once by the renderer. Never mutated afterward; reprocessing requires a
/// fresh id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClipSpec {
    /// Unique identifier, stable across retries
    pub id: Uuid,

    /// Human label, used to derive the output filename
    pub title: String,

    /// Start time in the source video (seconds)
    pub start_time: f64,

    /// End time in the source video (seconds)
    pub end_time: f64,

    /// Optional hook segment start (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_start_time: Option<f64>,

    /// Optional hook segment end (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_end_time: Option<f64>,

    /// Hook statement text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_text: Option<String>,

    /// Body/content description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rationale for why this clip was chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ClipSpec {
    /// Create a new spec with a fresh id.
    pub fn new(title: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start_time,
            end_time,
            hook_start_time: None,
            hook_end_time: None,
            hook_text: None,
            description: None,
            reason: None,
        }
    }

    /// Derived duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether a hook segment is present (both bounds set).
    pub fn has_hook(&self) -> bool {
        matches!(
            (self.hook_start_time, self.hook_end_time),
            (Some(s), Some(e)) if s < e
        )
    }

    /// Hook segment duration, if a hook is present.
    pub fn hook_duration(&self) -> Option<f64> {
        match (self.hook_start_time, self.hook_end_time) {
            (Some(s), Some(e)) if s < e => Some(e - s),
            _ => None,
        }
    }

    /// True when the hook window does not begin at the clip start.
    /// Informational only.
    pub fn hook_is_not_at_start(&self) -> bool {
        match self.hook_start_time {
            Some(hs) => (hs - self.start_time).abs() > f64::EPSILON,
            None => false,
        }
    }

    /// Generate the output filename.
    ///
    /// Format: `{sanitized_title}_{first 8 hex chars of id}.mp4`
    pub fn output_filename(&self) -> String {
        let short_id: String = self.id.simple().to_string().chars().take(8).collect();
        format!("{}_{}.mp4", sanitize_title(&self.title), short_id)
    }
}

/// Outcome of rendering one clip. Exactly one of `output_path`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderResult {
    /// Clip id this result belongs to
    pub clip_id: Uuid,

    /// Path to the finished clip, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Error message, on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderResult {
    /// Successful result.
    pub fn ok(clip_id: Uuid, output_path: impl Into<String>) -> Self {
        Self {
            clip_id,
            output_path: Some(output_path.into()),
            error: None,
        }
    }

    /// Failed result.
    pub fn failed(clip_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            clip_id,
            output_path: None,
            error: Some(error.into()),
        }
    }

    /// Whether the clip rendered successfully.
    pub fn is_ok(&self) -> bool {
        self.output_path.is_some()
    }
}

/// Sanitize a title for use in filenames.
///
/// Strips everything outside `[A-Za-z0-9 _-]`, collapses whitespace to
/// underscores and truncates to 100 characters. Case is preserved.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_TITLE_FILENAME_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Hello World!"), "Hello_World");
        assert_eq!(sanitize_title("Test@#$%123"), "Test123");
        assert_eq!(sanitize_title("  spaced   out  "), "spaced_out");
        // Case is preserved, unlike typical slug helpers
        assert_eq!(sanitize_title("CamelCase Title"), "CamelCase_Title");
    }

    #[test]
    fn test_sanitize_title_truncates() {
        let long = "a".repeat(300);
        assert_eq!(sanitize_title(&long).len(), MAX_TITLE_FILENAME_LEN);
    }

    #[test]
    fn test_output_filename() {
        let spec = ClipSpec::new("My Clip!", 10.0, 40.0);
        let filename = spec.output_filename();
        assert!(filename.starts_with("My_Clip_"));
        assert!(filename.ends_with(".mp4"));
        // 8 hex chars between the title and the extension
        let id_part = filename
            .trim_start_matches("My_Clip_")
            .trim_end_matches(".mp4");
        assert_eq!(id_part.len(), 8);
        assert!(id_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hook_accessors() {
        let mut spec = ClipSpec::new("Hook test", 688.0, 720.0);
        assert!(!spec.has_hook());
        assert!(!spec.hook_is_not_at_start());

        spec.hook_start_time = Some(650.0);
        spec.hook_end_time = Some(665.0);
        assert!(spec.has_hook());
        assert_eq!(spec.hook_duration(), Some(15.0));
        assert!(spec.hook_is_not_at_start());

        spec.hook_start_time = Some(688.0);
        assert!(!spec.hook_is_not_at_start());
    }

    #[test]
    fn test_render_result_exclusive() {
        let spec = ClipSpec::new("x", 0.0, 30.0);
        let ok = RenderResult::ok(spec.id, "/out/x.mp4");
        assert!(ok.is_ok());
        assert!(ok.error.is_none());

        let failed = RenderResult::failed(spec.id, "probe failed");
        assert!(!failed.is_ok());
        assert!(failed.output_path.is_none());
    }
}

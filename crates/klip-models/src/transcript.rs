//! Transcript models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timed segment of a transcript.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Segment text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A full transcript: ordered segments plus concatenated text and language.
///
/// Produced externally; read-only to the pipeline. An empty segment list is a
/// valid "no transcript" value, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Segments ordered by start time
    pub segments: Vec<TranscriptSegment>,
    /// Concatenated full text
    pub full_text: String,
    /// Language tag (e.g. "en", "id")
    pub language: String,
}

impl Transcript {
    /// Build a transcript from segments, deriving the concatenated text.
    pub fn from_segments(segments: Vec<TranscriptSegment>, language: impl Into<String>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            segments,
            full_text,
            language: language.into(),
        }
    }

    /// Whether the transcript carries any segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments() {
        let transcript = Transcript::from_segments(
            vec![
                TranscriptSegment::new("hello", 0.0, 2.0),
                TranscriptSegment::new("world", 2.0, 1.5),
            ],
            "en",
        );
        assert_eq!(transcript.full_text, "hello world");
        assert_eq!(transcript.language, "en");
        assert!(!transcript.is_empty());
        assert_eq!(transcript.segments[1].end(), 3.5);
    }

    #[test]
    fn test_empty_is_valid() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
    }
}

//! Transcript loading from VTT subtitle files.
//!
//! Auto-generated YouTube captions roll text across consecutive cues, so
//! parsing de-duplicates repeated lines. An empty or missing-cue file yields
//! an empty transcript, which downstream treats as "render without captions".

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use klip_models::{Transcript, TranscriptSegment};

use crate::error::WorkerResult;

static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:\d{2}:)?\d{2}:\d{2}\.\d{3})\s*-->\s*((?:\d{2}:)?\d{2}:\d{2}\.\d{3})")
        .expect("valid regex")
});

static CUE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Load a VTT file into a transcript. Language is taken from the filename's
/// subtitle tag (`video.en.vtt` → "en").
pub async fn load_vtt_transcript(path: impl AsRef<Path>) -> WorkerResult<Transcript> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let segments = parse_vtt(&content);
    let language = language_from_filename(path).unwrap_or_default();
    debug!(
        path = %path.display(),
        segments = segments.len(),
        language = %language,
        "Loaded transcript"
    );
    Ok(Transcript::from_segments(segments, language))
}

/// Parse VTT content into ordered timed segments.
pub fn parse_vtt(content: &str) -> Vec<TranscriptSegment> {
    let mut segments: Vec<TranscriptSegment> = Vec::new();
    let mut window: Option<(f64, f64)> = None;
    let mut text_lines: Vec<String> = Vec::new();
    let mut last_text = String::new();

    for raw in content.lines() {
        let line = CUE_TAG.replace_all(raw.trim(), "").to_string();

        if let Some(caps) = CUE_TIMING.captures(&line) {
            flush_cue(&mut segments, &mut window, &mut text_lines, &mut last_text);
            window = match (
                parse_vtt_timestamp(&caps[1]),
                parse_vtt_timestamp(&caps[2]),
            ) {
                (Some(start), Some(end)) if end >= start => Some((start, end)),
                _ => None,
            };
            continue;
        }

        if line.is_empty() {
            flush_cue(&mut segments, &mut window, &mut text_lines, &mut last_text);
            continue;
        }

        // Header, cue numbers, notes
        if line == "WEBVTT" || line.starts_with("NOTE") || line.chars().all(|c| c.is_numeric()) {
            continue;
        }

        if window.is_some() && line != last_text {
            text_lines.push(line);
        }
    }
    flush_cue(&mut segments, &mut window, &mut text_lines, &mut last_text);

    segments
}

fn flush_cue(
    segments: &mut Vec<TranscriptSegment>,
    window: &mut Option<(f64, f64)>,
    text_lines: &mut Vec<String>,
    last_text: &mut String,
) {
    let Some((start, end)) = window.take() else {
        text_lines.clear();
        return;
    };
    let text = text_lines.join(" ").trim().to_string();
    text_lines.clear();
    if !text.is_empty() && text != *last_text {
        *last_text = text.clone();
        segments.push(TranscriptSegment::new(text, start, (end - start).max(0.0)));
    }
}

/// Parse a VTT timestamp (`HH:MM:SS.mmm` or `MM:SS.mmm`) to seconds.
fn parse_vtt_timestamp(ts: &str) -> Option<f64> {
    let (clock, millis) = ts.split_once('.')?;
    let millis: f64 = millis.parse().ok()?;
    let parts: Vec<&str> = clock.split(':').collect();
    let (h, m, s): (f64, f64, f64) = match parts.as_slice() {
        [h, m, s] => (h.parse().ok()?, m.parse().ok()?, s.parse().ok()?),
        [m, s] => (0.0, m.parse().ok()?, s.parse().ok()?),
        _ => return None,
    };
    Some(h * 3600.0 + m * 60.0 + s + millis / 1000.0)
}

/// Subtitle language tag from a filename like `video.en.vtt`.
fn language_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let parts: Vec<&str> = name.split('.').collect();
    // stem.lang.vtt
    if parts.len() >= 3 && parts.last() == Some(&"vtt") {
        let lang = parts[parts.len() - 2];
        // "en" or "en-US", not a stem with dots in it
        if lang.len() <= 5 && lang.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            return Some(lang.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_VTT: &str = "\
WEBVTT

1
00:00:01.000 --> 00:00:03.500
Hello everyone

2
00:00:03.500 --> 00:00:06.000
<c>welcome back</c> to the channel

3
00:00:06.000 --> 00:00:08.000
welcome back to the channel
";

    #[test]
    fn test_parse_vtt_basic() {
        let segments = parse_vtt(SAMPLE_VTT);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Hello everyone");
        assert_eq!(segments[0].start, 1.0);
        assert_eq!(segments[0].duration, 2.5);
        // Tag stripped
        assert_eq!(segments[1].text, "welcome back to the channel");
    }

    #[test]
    fn test_rolling_duplicate_dropped() {
        // Third cue repeats the second's text
        let segments = parse_vtt(SAMPLE_VTT);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_short_timestamp_form() {
        assert_eq!(parse_vtt_timestamp("01:05.250"), Some(65.25));
        assert_eq!(parse_vtt_timestamp("01:00:00.000"), Some(3600.0));
        assert_eq!(parse_vtt_timestamp("garbage"), None);
    }

    #[test]
    fn test_empty_content_is_empty_transcript() {
        assert!(parse_vtt("WEBVTT\n").is_empty());
        assert!(parse_vtt("").is_empty());
    }

    #[test]
    fn test_language_from_filename() {
        assert_eq!(
            language_from_filename(Path::new("/tmp/video.en.vtt")),
            Some("en".to_string())
        );
        assert_eq!(
            language_from_filename(Path::new("abc123.id.vtt")),
            Some("id".to_string())
        );
        assert_eq!(language_from_filename(Path::new("video.vtt")), None);
    }

    #[tokio::test]
    async fn test_load_vtt_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.en.vtt");
        tokio::fs::write(&path, SAMPLE_VTT).await.unwrap();

        let transcript = load_vtt_transcript(&path).await.unwrap();
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.segments.len(), 2);
        assert!(transcript.full_text.contains("Hello everyone"));
    }
}

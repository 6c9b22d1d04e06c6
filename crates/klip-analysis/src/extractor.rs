//! Best-effort extraction of clip specs from a whole analysis document.
//!
//! Extraction never fails for an individual malformed section; bad sections
//! are skipped and the survivors returned in document order. An empty result
//! is the caller's signal that nothing could be parsed.

use tracing::{debug, warn};

use klip_models::clip::{MANUAL_MAX_DURATION_SECS, MANUAL_MIN_DURATION_SECS};
use klip_models::{parse_timestamp, ClipSpec};

use crate::matchers::{
    first_capture, first_pair, strip_emphasis, BLOCK_TERMINATOR, BODY_LABEL, DURATION_MATCHERS,
    HEADER_PARENTHETICAL, HEADER_TITLE, HOOK_TEXT_MATCHERS, HOOK_TIMELINE_MATCHERS, REASON_LABEL,
    SECTION_BOUNDARY, TIME_SHAPE, TIMELINE_MATCHERS, TITLE_MATCHERS,
};

/// Extract an ordered list of clip specs from analysis text.
///
/// Sections are split at numbered `Clip:` boundaries, pre-filtered on a loose
/// digit shape, then parsed field-by-field with ordered fallback matchers.
/// Each accepted clip gets a freshly generated id.
pub fn extract_clips(text: &str) -> Vec<ClipSpec> {
    let mut specs = Vec::new();

    for section in split_sections(text) {
        // Cheap pre-filter before expensive field extraction
        if !TIME_SHAPE.is_match(section) {
            debug!("Skipping section without any timestamp-shaped substring");
            continue;
        }

        match parse_section(section) {
            Some(spec) => specs.push(spec),
            None => debug!("Skipping unparseable analysis section"),
        }
    }

    specs
}

/// Split the document into candidate sections at clip-entry boundaries.
fn split_sections(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = SECTION_BOUNDARY.find_iter(text).map(|m| m.start()).collect();
    let mut sections = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        sections.push(&text[start..end]);
    }
    sections
}

/// Parse one section into a spec, or `None` if it fails any validity gate.
fn parse_section(section: &str) -> Option<ClipSpec> {
    // Timeline is the validity gate: no match drops the whole section.
    let (start_raw, end_raw) = first_pair(&TIMELINE_MATCHERS, section)?;
    let start_time = parse_timestamp(start_raw)?;
    let end_time = parse_timestamp(end_raw)?;

    if start_time >= end_time {
        warn!(
            start = start_time,
            end = end_time,
            "Dropping clip section with end before start"
        );
        return None;
    }

    let duration = explicit_duration(section).unwrap_or(end_time - start_time);
    if !(MANUAL_MIN_DURATION_SECS..=MANUAL_MAX_DURATION_SECS).contains(&duration) {
        warn!(duration, "Dropping clip section outside accepted duration range");
        return None;
    }

    let mut spec = ClipSpec::new(extract_title(section), start_time, end_time);

    if let Some(hook) = first_capture(&HOOK_TEXT_MATCHERS, section) {
        let hook = strip_emphasis(hook);
        if !hook.is_empty() {
            spec.hook_text = Some(hook);
        }
    }

    // Hook timestamps are kept only when they form a valid window; otherwise
    // the hook fields are discarded, not the whole clip.
    if let Some((hs_raw, he_raw)) = first_pair(&HOOK_TIMELINE_MATCHERS, section) {
        match (parse_timestamp(hs_raw), parse_timestamp(he_raw)) {
            (Some(hs), Some(he)) if hs < he => {
                spec.hook_start_time = Some(hs);
                spec.hook_end_time = Some(he);
            }
            _ => warn!("Discarding invalid hook timestamp window"),
        }
    }

    if let Some(body) = extract_block(section, &BODY_LABEL, true) {
        spec.description = Some(body);
    }
    if let Some(reason) = extract_block(section, &REASON_LABEL, false) {
        spec.reason = Some(reason);
    }

    Some(spec)
}

/// Suggested title wins over the header title; both empty falls back to a
/// fixed default.
fn extract_title(section: &str) -> String {
    if let Some(title) = first_capture(&TITLE_MATCHERS, section) {
        let title = strip_emphasis(title);
        if !title.is_empty() {
            return title;
        }
    }

    if let Some(caps) = HEADER_TITLE.captures(section) {
        let raw = caps.get(1).map(|g| g.as_str()).unwrap_or_default();
        let stripped = HEADER_PARENTHETICAL.replace(raw, "");
        let title = strip_emphasis(&stripped);
        if !title.is_empty() {
            return title;
        }
    }

    "Untitled Clip".to_string()
}

/// Explicit "Durasi" field in seconds, when present.
fn explicit_duration(section: &str) -> Option<f64> {
    first_capture(&DURATION_MATCHERS, section)
        .and_then(|v| v.replace(',', ".").parse::<f64>().ok())
}

/// Capture a labelled block.
///
/// The block starts with the remainder of the label line and, when
/// `multi_line` is set, continues over following lines until a terminator
/// (heading, bulleted/bold label, known field label, next clip entry).
/// Single-paragraph capture additionally stops at the first blank line.
fn extract_block(section: &str, label: &regex::Regex, multi_line: bool) -> Option<String> {
    let caps = label.captures(section)?;
    let label_match = caps.get(0)?;
    let mut parts: Vec<String> = Vec::new();

    let inline = strip_emphasis(caps.get(1).map(|g| g.as_str()).unwrap_or_default());
    if !inline.is_empty() {
        parts.push(inline);
    }

    let rest = &section[label_match.end()..];
    for line in rest.lines().skip(1) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !multi_line {
                break;
            }
            continue;
        }
        if BLOCK_TERMINATOR.is_match(trimmed) {
            break;
        }
        let cleaned = strip_emphasis(trimmed);
        if !cleaned.is_empty() {
            parts.push(cleaned);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_CLIPS: &str = r#"
Analisis video https://youtu.be/dQw4w9WgXcQ

### 1. Clip: Pembuka yang Kuat (Motivasi)
- **Judul Clip**: Rahasia Konsisten
- **Timeline Full Clip**: `[00:01:00]` - `[00:01:45]`
- **Text Hook**: "Ini yang tidak pernah diajarkan"
- **Isi Konten**: Penjelasan tentang kebiasaan pagi
  yang mengubah cara kerja otak.
- **Mengapa Bagus**: Relatable untuk semua orang.

### 2. Clip: Penutup
- **Judul Clip**: Satu Langkah Kecil
- **Timeline Full Clip**: `[00:11:28]` - `[00:12:00]`
- **Timestamp Hook**: [00:10:50]-[00:11:05]
- **Kalimat Hook**: *Jangan berhenti di sini*
"#;

    #[test]
    fn test_two_wellformed_sections() {
        let specs = extract_clips(TWO_CLIPS);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].title, "Rahasia Konsisten");
        assert_eq!(specs[0].start_time, 60.0);
        assert_eq!(specs[0].end_time, 105.0);
        assert_eq!(specs[1].title, "Satu Langkah Kecil");
    }

    #[test]
    fn test_hook_window_scenario() {
        let specs = extract_clips(TWO_CLIPS);
        let spec = &specs[1];
        assert_eq!(spec.hook_start_time, Some(650.0));
        assert_eq!(spec.hook_end_time, Some(665.0));
        assert_eq!(spec.start_time, 688.0);
        assert!(spec.hook_is_not_at_start());
        assert_eq!(spec.hook_text.as_deref(), Some("Jangan berhenti di sini"));
    }

    #[test]
    fn test_end_before_start_drops_section_only() {
        let text = r#"
1. Clip: Rusak
Timeline Full Clip: [00:12:00] - [00:11:28]

2. Clip: Baik
Timeline Full Clip: [00:01:00] - [00:01:45]
"#;
        let specs = extract_clips(text);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].title, "Baik");
    }

    #[test]
    fn test_section_without_timeline_dropped() {
        let text = r#"
1. Clip: Tanpa waktu 10:30 disebutkan
Isi Konten: hanya teks tanpa timeline berlabel yang valid
"#;
        // Pre-filter passes (digit shape present) but no timeline pair
        assert!(extract_clips(text).is_empty());
    }

    #[test]
    fn test_duration_policy_rejects_out_of_range() {
        let too_long = r#"
1. Clip: Kepanjangan
Timeline Full Clip: [00:01:00] - [00:05:00]
"#;
        assert!(extract_clips(too_long).is_empty());

        let too_short = r#"
1. Clip: Kependekan
Timeline Full Clip: [00:01:00] - [00:01:05]
"#;
        assert!(extract_clips(too_short).is_empty());
    }

    #[test]
    fn test_invalid_hook_discards_hook_not_clip() {
        let text = r#"
1. Clip: Hook terbalik
Timeline Full Clip: [00:01:00] - [00:01:45]
Timestamp Hook: [00:11:05] - [00:10:50]
"#;
        let specs = extract_clips(text);
        assert_eq!(specs.len(), 1);
        assert!(specs[0].hook_start_time.is_none());
        assert!(specs[0].hook_end_time.is_none());
    }

    #[test]
    fn test_header_title_fallback_strips_parenthetical() {
        let text = r#"
### 3. Clip: Momen Puncak (Emosional)
Timeline Full Clip: [00:02:00] - [00:02:40]
"#;
        let specs = extract_clips(text);
        assert_eq!(specs[0].title, "Momen Puncak");
    }

    #[test]
    fn test_untitled_default() {
        let text = "1. Clip:\nTimeline Full Clip: [00:02:00] - [00:02:40]\n";
        let specs = extract_clips(text);
        assert_eq!(specs[0].title, "Untitled Clip");
    }

    #[test]
    fn test_plain_text_dialect() {
        let text = r#"
1. Clip: Versi polos
Judul Clip: Tanpa Markdown
Estimasi Timeline Full Clip: 01:00 s.d. 01:45
Durasi: ±45 detik
Hook: Dengarkan baik-baik
Isi: Penjelasan inti materi.
Alasan: Padat dan jelas.
"#;
        let specs = extract_clips(text);
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.title, "Tanpa Markdown");
        assert_eq!(spec.start_time, 60.0);
        assert_eq!(spec.end_time, 105.0);
        assert_eq!(spec.hook_text.as_deref(), Some("Dengarkan baik-baik"));
        assert_eq!(spec.description.as_deref(), Some("Penjelasan inti materi."));
        assert_eq!(spec.reason.as_deref(), Some("Padat dan jelas."));
    }

    #[test]
    fn test_multiline_body_stops_at_label() {
        let text = r#"
1. Clip: Blok isi
Timeline Full Clip: [00:01:00] - [00:01:45]
Isi Konten: Baris pertama
baris kedua masih isi
- **Mengapa Bagus**: bukan isi lagi
"#;
        let specs = extract_clips(text);
        let body = specs[0].description.as_deref().unwrap();
        assert!(body.contains("Baris pertama"));
        assert!(body.contains("baris kedua"));
        assert!(!body.contains("bukan isi lagi"));
    }

    #[test]
    fn test_plain_bullet_ends_reason_block() {
        let text = r#"
1. Clip: Alasan singkat
Timeline Full Clip: [00:01:00] - [00:01:45]
Alasan: Padat dan jelas.
- catatan lain yang bukan alasan
"#;
        let specs = extract_clips(text);
        assert_eq!(specs[0].reason.as_deref(), Some("Padat dan jelas."));
    }

    #[test]
    fn test_idempotence_modulo_ids() {
        let a = extract_clips(TWO_CLIPS);
        let b = extract_clips(TWO_CLIPS);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.title, y.title);
            assert_eq!(x.start_time, y.start_time);
            assert_eq!(x.end_time, y.end_time);
            assert_eq!(x.hook_start_time, y.hook_start_time);
            assert_ne!(x.id, y.id);
        }
    }
}

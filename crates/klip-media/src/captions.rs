//! Caption track generation.
//!
//! Converts transcript segments restricted to a time window into burnable
//! subtitle tracks. All cue times are re-based so the window start becomes
//! zero. Three encodings share the same windowing/re-basing path: plain SRT,
//! a styled ASS track with optional per-cue animation, and a word-level
//! karaoke ASS variant.

use klip_models::TranscriptSegment;

/// Per-cue animation directive for the styled track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionAnimation {
    /// No override tags
    None,
    /// Fade in/out (200ms each side)
    #[default]
    Fade,
    /// Scale "pop": cue starts at 80% and grows to 100% over 120ms
    Pop,
}

/// Style parameters for the ASS track.
#[derive(Debug, Clone)]
pub struct CaptionStyle {
    pub font: String,
    pub font_size: u32,
    /// Primary text colour, ASS `&HBBGGRR&` form without wrapping
    pub primary_colour: String,
    pub outline_colour: String,
    /// Highlight colour for the active word in the karaoke variant
    pub highlight_colour: String,
    /// ASS numpad alignment (2 = bottom center)
    pub alignment: u8,
    pub animation: CaptionAnimation,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            font_size: 64,
            primary_colour: "00FFFFFF".to_string(),
            outline_colour: "00000000".to_string(),
            highlight_colour: "0000FFFF".to_string(),
            alignment: 2,
            animation: CaptionAnimation::Fade,
        }
    }
}

/// Select the segments whose start falls inside `[window_start, window_end)`,
/// re-based to window-relative time.
///
/// A segment that starts inside the window but spills past `window_end` is
/// kept in full; the final cue is never truncated.
pub fn window_segments(
    segments: &[TranscriptSegment],
    window_start: f64,
    window_end: f64,
) -> Vec<TranscriptSegment> {
    segments
        .iter()
        .filter(|s| s.start >= window_start && s.start < window_end)
        .map(|s| TranscriptSegment::new(s.text.clone(), s.start - window_start, s.duration))
        .collect()
}

/// Build a plain SRT track for the window.
pub fn build_srt(segments: &[TranscriptSegment], window_start: f64, window_end: f64) -> String {
    let mut out = String::new();
    for (i, seg) in window_segments(segments, window_start, window_end)
        .iter()
        .enumerate()
    {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            srt_time(seg.start),
            srt_time(seg.end()),
            seg.text.trim()
        ));
    }
    out
}

/// Build a styled ASS track for the window.
pub fn build_ass(
    segments: &[TranscriptSegment],
    window_start: f64,
    window_end: f64,
    style: &CaptionStyle,
) -> String {
    let mut out = ass_header(style);
    for seg in window_segments(segments, window_start, window_end) {
        let tags = animation_tags(style.animation);
        out.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}{}\n",
            ass_time(seg.start),
            ass_time(seg.end()),
            tags,
            ass_escape(seg.text.trim())
        ));
    }
    out
}

/// Build a word-level karaoke ASS track for the window.
///
/// Each segment's duration is divided evenly across its whitespace-delimited
/// words and one cue is emitted per word, with the active word rendered in
/// the highlight colour. Evenly-divided timing is a simplification, not
/// audio-aligned.
pub fn build_word_level_ass(
    segments: &[TranscriptSegment],
    window_start: f64,
    window_end: f64,
    style: &CaptionStyle,
) -> String {
    let mut out = ass_header(style);
    for seg in window_segments(segments, window_start, window_end) {
        let words: Vec<&str> = seg.text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let per_word = seg.duration / words.len() as f64;
        for (i, _) in words.iter().enumerate() {
            let start = seg.start + per_word * i as f64;
            let end = seg.start + per_word * (i + 1) as f64;
            let mut line = String::new();
            for (j, word) in words.iter().enumerate() {
                if j > 0 {
                    line.push(' ');
                }
                if j == i {
                    line.push_str(&format!(
                        "{{\\c&H{}&}}{}{{\\c&H{}&}}",
                        style.highlight_colour,
                        ass_escape(word),
                        style.primary_colour
                    ));
                } else {
                    line.push_str(&ass_escape(word));
                }
            }
            out.push_str(&format!(
                "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
                ass_time(start),
                ass_time(end),
                line
            ));
        }
    }
    out
}

/// ASS script header with one Default style.
fn ass_header(style: &CaptionStyle) -> String {
    format!(
        "[Script Info]\n\
         ScriptType: v4.00+\n\
         PlayResX: 1080\n\
         PlayResY: 1920\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, OutlineColour, Bold, Outline, Shadow, Alignment, MarginV\n\
         Style: Default,{},{},&H{}&,&H{}&,1,3,0,{},120\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        style.font, style.font_size, style.primary_colour, style.outline_colour, style.alignment
    )
}

/// Override tags for the configured animation.
fn animation_tags(animation: CaptionAnimation) -> String {
    match animation {
        CaptionAnimation::None => String::new(),
        CaptionAnimation::Fade => "{\\fad(200,200)}".to_string(),
        CaptionAnimation::Pop => "{\\fscx80\\fscy80\\t(0,120,\\fscx100\\fscy100)}".to_string(),
    }
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
fn srt_time(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        ms
    )
}

/// Format seconds as an ASS timestamp (`H:MM:SS.cc`).
fn ass_time(secs: f64) -> String {
    let total_cs = (secs.max(0.0) * 100.0).round() as u64;
    let cs = total_cs % 100;
    let total = total_cs / 100;
    format!(
        "{}:{:02}:{:02}.{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        cs
    )
}

/// Escape text for an ASS dialogue line.
fn ass_escape(text: &str) -> String {
    text.replace('{', "(").replace('}', ")").replace('\n', "\\N")
}

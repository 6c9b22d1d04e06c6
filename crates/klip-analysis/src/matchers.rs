//! Ordered field matchers for the analysis extractor.
//!
//! Each field is extracted by trying a list of named patterns in order, most
//! specific first (bulleted + bold + backticked) down to loose plain-text
//! variants. Precedence lives in the table order, not in control flow, so a
//! new template dialect is one more entry and each matcher can be unit-tested
//! on its own.

use regex::Regex;
use std::sync::LazyLock;

/// A named, ordered alternative pattern for one field.
pub struct FieldMatcher {
    /// Identifier for diagnostics and tests
    pub name: &'static str,
    pub regex: Regex,
}

impl FieldMatcher {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            // Patterns are compile-time constants; a failure here is a bug.
            regex: Regex::new(pattern).expect("invalid field matcher pattern"),
        }
    }
}

/// Timestamp fragment: `H?H:MM` or `HH:MM:SS`, optionally bracket- and
/// backtick-wrapped. The wrappers are captured along with the digits;
/// `parse_timestamp` strips them.
const TS: &str = r"`?\[?\d{1,2}:\d{2}(?::\d{2})?\]?`?";

/// Range separator: `-`, en-dash, em-dash, or `s.d.`.
const SEP: &str = r"(?:s\.d\.|[-\x{2013}\x{2014}])";

/// Boundary that starts a new clip entry: an optional ATX header prefix, a
/// number, then `Clip:`. The single most load-bearing pattern in the crate.
pub static SECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^(?:#{1,4}\s*)?\d+\.\s*Clip\s*:").unwrap());

/// Cheap pre-filter: sections without any `H?:MM`-shaped substring cannot
/// carry a timeline and are dropped before field extraction.
pub static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

/// Title from the section's leading numbered-clip line.
pub static HEADER_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^(?:#{1,4}\s*)?\d+\.\s*Clip\s*:\s*(.+)$").unwrap());

/// Trailing `(Category)` parenthetical on a header title.
pub static HEADER_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

/// Suggested-title matchers. "Judul Clip" outranks "Judul Ide"; within each
/// label, bulleted-bold > bold > plain-colon.
pub static TITLE_MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(|| {
    vec![
        FieldMatcher::new(
            "judul-clip-bulleted-bold",
            r"(?mi)^\s*[-*\x{2022}]\s*\*\*\s*Judul\s+Clip\s*\*\*\s*:?\s*(.+)$",
        ),
        FieldMatcher::new(
            "judul-clip-bold",
            r"(?mi)\*\*\s*Judul\s+Clip\s*\*\*\s*:?\s*(.+)$",
        ),
        FieldMatcher::new("judul-clip-plain", r"(?mi)^\s*Judul\s+Clip\s*:\s*(.+)$"),
        FieldMatcher::new(
            "judul-ide-bulleted-bold",
            r"(?mi)^\s*[-*\x{2022}]\s*\*\*\s*Judul\s+Ide\s*\*\*\s*:?\s*(.+)$",
        ),
        FieldMatcher::new(
            "judul-ide-bold",
            r"(?mi)\*\*\s*Judul\s+Ide\s*\*\*\s*:?\s*(.+)$",
        ),
        FieldMatcher::new("judul-ide-plain", r"(?mi)^\s*Judul\s+Ide\s*:\s*(.+)$"),
    ]
});

/// Timeline matchers, two timestamp captures each. A section matching none of
/// these is dropped entirely; this is the validity gate.
pub static TIMELINE_MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(|| {
    let label = r"(?:Estimasi\s+)?Timeline\s+Full\s+Clip";
    vec![
        FieldMatcher::new(
            "timeline-backticked",
            &format!(
                r"(?mi){label}[^\n]*?(`\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\]`)\s*{SEP}\s*(`\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\]`)"
            ),
        ),
        FieldMatcher::new(
            "timeline-bracketed",
            &format!(
                r"(?mi){label}[^\n]*?(\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\])\s*{SEP}\s*(\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\])"
            ),
        ),
        FieldMatcher::new(
            "timeline-bare",
            &format!(
                r"(?mi){label}[^\n]*?(\d{{1,2}}:\d{{2}}(?::\d{{2}})?)\s*{SEP}\s*(\d{{1,2}}:\d{{2}}(?::\d{{2}})?)"
            ),
        ),
        FieldMatcher::new(
            "timestamp-label",
            &format!(r"(?mi)^\s*[-*\x{{2022}}]?\s*\*{{0,2}}Timestamp\*{{0,2}}\s*:\s*({TS})\s*{SEP}\s*({TS})"),
        ),
        FieldMatcher::new(
            "bare-bracket-pair",
            &format!(
                r"(?m)(\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\])\s*{SEP}\s*(\[\d{{1,2}}:\d{{2}}(?::\d{{2}})?\])"
            ),
        ),
    ]
});

/// Explicit duration matchers (seconds value capture). Optional `±/~/≈`
/// prefix and `detik|seconds|sec|s` suffix.
pub static DURATION_MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(|| {
    let label = r"Durasi(?:\s*(?:Total|Clip))?";
    vec![
        FieldMatcher::new(
            "durasi-suffixed",
            &format!(
                r"(?mi){label}\s*:\s*[\x{{00b1}}~\x{{2248}}]?\s*(\d+(?:[.,]\d+)?)\s*(?:detik|seconds|sec|s)\b"
            ),
        ),
        FieldMatcher::new(
            "durasi-bare",
            &format!(r"(?mi){label}\s*:\s*[\x{{00b1}}~\x{{2248}}]?\s*(\d+(?:[.,]\d+)?)\b"),
        ),
    ]
});

/// Hook statement matchers. Quotes and markdown emphasis are stripped from
/// the captured value by the extractor.
pub static HOOK_TEXT_MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(|| {
    let label = r"(?:Text\s+Hook|Kalimat\s+Hook|Hook)";
    vec![
        FieldMatcher::new(
            "hook-bulleted-bold",
            &format!(r"(?mi)^\s*[-*\x{{2022}}]\s*\*\*\s*{label}\s*\*\*\s*:?\s*(.+)$"),
        ),
        FieldMatcher::new(
            "hook-bold",
            &format!(r"(?mi)\*\*\s*{label}\s*\*\*\s*:?\s*(.+)$"),
        ),
        FieldMatcher::new("hook-plain", &format!(r"(?mi)^\s*{label}\s*:\s*(.+)$")),
    ]
});

/// Hook timestamp matchers, same bracket/dash tolerance as the main timeline.
pub static HOOK_TIMELINE_MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(|| {
    let label = r"(?:Timestamp\s+Hook|Hook\s+Timestamp)";
    vec![FieldMatcher::new(
        "hook-timestamp",
        &format!(r"(?mi){label}[^\n]*?({TS})\s*{SEP}\s*({TS})"),
    )]
});

/// Body/content label line; the block itself is captured line-by-line in the
/// extractor since it runs to the next heading boundary.
pub static BODY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*[-*\x{2022}]?\s*\*{0,2}\s*Isi(?:\s+Konten|\s+Clip)?\s*\*{0,2}\s*:\s*(.*)$")
        .unwrap()
});

/// Rationale label line; single-paragraph capture handled by the extractor.
pub static REASON_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^\s*[-*\x{2022}]?\s*\*{0,2}\s*(?:Mengapa\s+Bagus|Alasan|Why|Reason)\s*\*{0,2}\s*:?\s*(.*)$",
    )
    .unwrap()
});

/// A line that terminates a multi-line block: a heading, any bullet (plain
/// or bold), a bold label, the next clip entry, or a known plain field label.
pub static BLOCK_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:#{1,4}\s|[-*\x{2022}]\s*\*\*|[-*\x{2022}]\s|\*\*\w|\d+\.\s*Clip\s*:|(?:Judul\s+(?:Clip|Ide)|(?:Estimasi\s+)?Timeline\s+Full\s+Clip|Timestamp(?:\s+Hook)?|Durasi(?:\s*(?:Total|Clip))?|Text\s+Hook|Kalimat\s+Hook|Hook\s+Timestamp|Hook|Isi(?:\s+Konten|\s+Clip)?|Mengapa\s+Bagus|Alasan|Why|Reason)\s*:)",
    )
    .unwrap()
});

/// Try matchers in order, returning the first single-capture match.
pub fn first_capture<'t>(matchers: &[FieldMatcher], text: &'t str) -> Option<&'t str> {
    for m in matchers {
        if let Some(caps) = m.regex.captures(text) {
            if let Some(g) = caps.get(1) {
                return Some(g.as_str());
            }
        }
    }
    None
}

/// Try matchers in order, returning the first two-capture match.
pub fn first_pair<'t>(matchers: &[FieldMatcher], text: &'t str) -> Option<(&'t str, &'t str)> {
    for m in matchers {
        if let Some(caps) = m.regex.captures(text) {
            if let (Some(a), Some(b)) = (caps.get(1), caps.get(2)) {
                return Some((a.as_str(), b.as_str()));
            }
        }
    }
    None
}

/// Strip markdown emphasis markers and surrounding quotes from a captured
/// field value.
pub fn strip_emphasis(value: &str) -> String {
    value
        .replace("**", "")
        .replace('`', "")
        .replace('*', "")
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '_' | '\u{201c}' | '\u{201d}'))
        .trim()
        .to_string()
}

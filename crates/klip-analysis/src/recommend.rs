//! Validation of AI-recommended clip windows.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use klip_models::clip::{ClipSpec, RECOMMENDED_MAX_DURATION_SECS, RECOMMENDED_MIN_DURATION_SECS};

/// Recommended windows may overshoot the real video length by this much
/// before being rejected; duration metadata from providers is approximate.
const DURATION_OVERSHOOT_SECS: f64 = 2.0;

/// A candidate clip window as returned by a recommendation provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipCandidate {
    pub title: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// Viral-potential score, 1 to 10
    pub score: u8,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ClipCandidate {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Filter candidates down to those satisfying the recommended-clip policy
/// and convert survivors to [`ClipSpec`]s, preserving order.
///
/// Invalid candidates are logged and skipped; a fully invalid input yields
/// an empty list rather than an error, the caller decides whether that is
/// fatal.
pub fn validate_recommendations(candidates: Vec<ClipCandidate>, video_duration: f64) -> Vec<ClipSpec> {
    candidates
        .into_iter()
        .filter(|c| {
            if let Err(why) = check_candidate(c, video_duration) {
                warn!(title = %c.title, reason = %why, "Skipping recommended clip");
                return false;
            }
            true
        })
        .map(|c| ClipSpec {
            id: Uuid::new_v4(),
            title: c.title,
            start_time: c.start,
            end_time: c.end,
            hook_start_time: None,
            hook_end_time: None,
            hook_text: None,
            description: c.description,
            reason: c.reason,
        })
        .collect()
}

fn check_candidate(c: &ClipCandidate, video_duration: f64) -> Result<(), String> {
    if c.start < 0.0 {
        return Err(format!("negative start {}", c.start));
    }
    if c.end <= c.start {
        return Err(format!("end {} not after start {}", c.end, c.start));
    }
    if video_duration > 0.0 && c.end > video_duration + DURATION_OVERSHOOT_SECS {
        return Err(format!(
            "end {} past video duration {}",
            c.end, video_duration
        ));
    }
    let duration = c.duration();
    if duration < RECOMMENDED_MIN_DURATION_SECS || duration > RECOMMENDED_MAX_DURATION_SECS {
        return Err(format!(
            "duration {:.1}s outside {}..{}s",
            duration, RECOMMENDED_MIN_DURATION_SECS, RECOMMENDED_MAX_DURATION_SECS
        ));
    }
    if !(1..=10).contains(&c.score) {
        return Err(format!("score {} outside 1..10", c.score));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(start: f64, end: f64, score: u8) -> ClipCandidate {
        ClipCandidate {
            title: "Candidate".to_string(),
            start,
            end,
            score,
            reason: None,
            description: None,
        }
    }

    #[test]
    fn test_valid_candidate_passes() {
        let specs = validate_recommendations(vec![candidate(10.0, 40.0, 8)], 600.0);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].start_time, 10.0);
        assert_eq!(specs[0].end_time, 40.0);
    }

    #[test]
    fn test_duration_policy() {
        // 10s too short, 70s too long, 60s exactly is fine
        let specs = validate_recommendations(
            vec![
                candidate(0.0, 10.0, 5),
                candidate(0.0, 70.0, 5),
                candidate(0.0, 60.0, 5),
            ],
            600.0,
        );
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].end_time, 60.0);
    }

    #[test]
    fn test_end_before_start_skipped() {
        let specs = validate_recommendations(vec![candidate(40.0, 10.0, 5)], 600.0);
        assert!(specs.is_empty());
    }

    #[test]
    fn test_score_bounds() {
        let specs = validate_recommendations(
            vec![candidate(0.0, 30.0, 0), candidate(0.0, 30.0, 11)],
            600.0,
        );
        assert!(specs.is_empty());
    }

    #[test]
    fn test_overshoot_tolerance() {
        // 1s past the reported duration is tolerated, 5s is not
        let specs = validate_recommendations(
            vec![candidate(570.0, 601.0, 7), candidate(575.0, 605.0, 7)],
            600.0,
        );
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].start_time, 570.0);
    }

    #[test]
    fn test_order_preserved() {
        let specs = validate_recommendations(
            vec![candidate(100.0, 130.0, 3), candidate(10.0, 40.0, 9)],
            600.0,
        );
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].start_time, 100.0);
        assert_eq!(specs[1].start_time, 10.0);
    }
}

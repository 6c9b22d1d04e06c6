//! Generative-AI recommendation client.
//!
//! Sends a transcript to a generative text API and parses the returned JSON
//! into candidate clip windows, which are then filtered through the
//! recommended-clip policy.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use klip_analysis::{validate_recommendations, ClipCandidate};
use klip_models::ClipSpec;

use crate::error::{WorkerError, WorkerResult};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Recommendation API client.
pub struct RecommendationClient {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// The JSON document the model is asked to produce.
#[derive(Debug, Deserialize)]
struct RecommendationDocument {
    clips: Vec<ClipCandidate>,
}

impl RecommendationClient {
    /// Create a client from environment configuration.
    pub fn from_env() -> WorkerResult<Self> {
        let api_key = std::env::var("KLIP_RECOMMEND_API_KEY")
            .map_err(|_| WorkerError::config_error("KLIP_RECOMMEND_API_KEY not set"))?;
        let model =
            std::env::var("KLIP_RECOMMEND_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            model,
            client: Client::new(),
        })
    }

    /// Ask the model for clip recommendations and validate them against the
    /// recommended-clip policy. Invalid candidates are skipped, not fatal.
    pub async fn recommend_clips(
        &self,
        transcript_text: &str,
        video_duration: f64,
    ) -> WorkerResult<Vec<ClipSpec>> {
        let prompt = build_prompt(transcript_text);
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        info!(model = %self.model, "Requesting clip recommendations");
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::recommendation_failed(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| WorkerError::recommendation_failed("Empty model response"))?;

        let document = parse_recommendation_json(text)?;
        debug!(candidates = document.clips.len(), "Parsed recommendations");

        Ok(validate_recommendations(document.clips, video_duration))
    }
}

fn build_prompt(transcript_text: &str) -> String {
    format!(
        r#"You select short viral-worthy clips from a video transcript.

Return ONLY a single JSON object with this schema:
{{
  "clips": [
    {{
      "title": "Catchy title",
      "start": 0.0,
      "end": 0.0,
      "score": 1,
      "reason": "Why this segment works as a short clip",
      "description": "Engaging social media caption"
    }}
  ]
}}

Rules:
- "start" and "end" are offsets in seconds from the start of the video.
- Each clip must be 15 to 60 seconds long.
- "score" is viral potential from 1 to 10.
- Clips must not overlap.

TRANSCRIPT:
{transcript_text}
"#
    )
}

/// Parse the model's JSON, tolerating markdown code fences around it.
fn parse_recommendation_json(text: &str) -> WorkerResult<RecommendationDocument> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed)
        .map_err(|e| WorkerError::recommendation_failed(format!("Unparsable response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let doc = parse_recommendation_json(
            r#"{"clips": [{"title": "T", "start": 5.0, "end": 35.0, "score": 8}]}"#,
        )
        .unwrap();
        assert_eq!(doc.clips.len(), 1);
        assert_eq!(doc.clips[0].score, 8);
    }

    #[test]
    fn test_parse_fenced_json() {
        let doc = parse_recommendation_json(
            "```json\n{\"clips\": [{\"title\": \"T\", \"start\": 0.0, \"end\": 30.0, \"score\": 5}]}\n```",
        )
        .unwrap();
        assert_eq!(doc.clips.len(), 1);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_recommendation_json("not json").is_err());
    }
}

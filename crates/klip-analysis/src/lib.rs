//! Extraction of clip specifications from human-written analysis text.
//!
//! Analysis documents arrive in several loosely-related template dialects
//! (markdown with backticks, markdown bold, plain numbered text, bulleted
//! "Detail Hook" sub-sections), mixing Indonesian and English field labels.
//! This crate turns such a document into an ordered list of
//! [`klip_models::ClipSpec`] using layered fallback pattern matching, and
//! validates AI-recommended clip windows against the same structural rules.

pub mod extractor;
pub mod matchers;
pub mod recommend;

pub use extractor::extract_clips;
pub use recommend::{validate_recommendations, ClipCandidate};

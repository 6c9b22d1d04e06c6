//! Batch worker turning long videos into short portrait clips.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod recommend;
pub mod transcript;

pub use batch::BatchCoordinator;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::ClipLogger;
pub use recommend::RecommendationClient;
pub use transcript::{load_vtt_transcript, parse_vtt};

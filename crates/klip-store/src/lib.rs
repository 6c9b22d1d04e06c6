//! Durable project/clip metadata store backed by a single JSON document.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{ClipInfo, ClipProject, ProjectStore};

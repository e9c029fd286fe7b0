//! Custom extractors for Axum handlers.

pub mod id_path;
pub mod validated_json;

pub use id_path::{IdPath, IdPathRejection};
pub use validated_json::ValidatedJson;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("failed to read boundary file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature {index} has no string property `{key}`")]
    MissingName { index: usize, key: &'static str },

    #[error("unknown region kind `{0}` (expected `circuits` or `districts`)")]
    UnknownKind(String),
}

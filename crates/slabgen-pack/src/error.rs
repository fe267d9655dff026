//! Error types for generated resources.

use thiserror::Error;

use crate::archive::ResourceType;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing generated under this path
    #[error("generated pack has no data for {0}")]
    NotFound(String),

    #[error("reading {requested:?} data from a {actual:?} pack")]
    WrongType {
        requested: ResourceType,
        actual: ResourceType,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;

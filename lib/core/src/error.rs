use crate::product::ScoredProduct;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No candidate products to rank")]
    NoCandidates,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A change was detected but the new top-N could not be stored.
    /// The computed ranking is carried along so it can still be served.
    #[error("Top products snapshot not replaced: {reason}")]
    SnapshotNotReplaced {
        ranking: Vec<ScoredProduct>,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

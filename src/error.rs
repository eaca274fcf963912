use thiserror::Error;

pub type PageRiskResult<T> = Result<T, PageRiskError>;

#[derive(Error, Debug)]
pub enum PageRiskError {
    #[error("threat feed '{feed}' unavailable: {reason}")]
    FeedUnavailable { feed: String, reason: String },

    #[error("cache persistence error: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

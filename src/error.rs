use thiserror::Error;

/// Errors that can abort an enrichment run
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// No API key was supplied for the upstream recipe source
    #[error("Missing API key: set DISHCRAFT__SOURCE__API_KEY or SPOONACULAR_API_KEY")]
    MissingApiKey,

    /// Network failure while talking to the upstream source
    #[error("Failed to fetch recipes: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Upstream refused the request because the plan quota is used up
    #[error("Upstream quota exceeded (HTTP {0})")]
    QuotaExceeded(u16),

    /// Upstream answered with any other non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Response or store payload was not valid JSON for the expected shape
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem error from a store or seed file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Persisted store rejected an operation
    #[error("Store error: {0}")]
    StoreError(String),

    /// Invalid command-line or builder usage
    #[error("Usage error: {0}")]
    UsageError(String),
}

impl EnrichError {
    /// True for failures that come from the upstream source rather than local state
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            EnrichError::FetchError(_)
                | EnrichError::QuotaExceeded(_)
                | EnrichError::UpstreamStatus { .. }
        )
    }
}

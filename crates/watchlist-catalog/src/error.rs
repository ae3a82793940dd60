use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request failed or timed out before a response was received.
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected catalog response: {0}")]
    Parse(#[source] serde_json::Error),
}

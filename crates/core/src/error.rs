/// Failures surfaced by the query pipeline.
///
/// `Configuration` is fatal before any query runs; the remaining variants
/// are per-query failures reported to the caller without retrying.
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Read(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

use thiserror::Error;

/// Errors raised while loading pricing data
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

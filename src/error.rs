//! Error handling for nav-core

use thiserror::Error;

use nav_core_auth::AuthError;
use nav_core_pricing::PricingError;

/// Unified error type for nav-core
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Pricing data errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

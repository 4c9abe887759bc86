use std::fmt;
use thiserror::Error;

/// Errors raised inside the auth crate.
///
/// None of these escape the coordinator's public actions: they are logged and
/// translated into [`AuthState::error`](crate::AuthState) or dropped.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity client error: {0}")]
    Client(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    pub fn client<T: fmt::Display>(msg: T) -> Self {
        AuthError::Client(msg.to_string())
    }

    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        AuthError::Storage(msg.to_string())
    }

    pub fn config<T: fmt::Display>(msg: T) -> Self {
        AuthError::Config(msg.to_string())
    }
}

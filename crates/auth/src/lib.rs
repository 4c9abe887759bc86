//! Keycloak session coordinator for nav-core
//!
//! This crate wraps an identity-provider client behind a reactive
//! [`AuthState`] and four actions (login, logout, get-token, clear-error).
//! Clients are cached per [`ProviderConfig`] in a [`SessionRegistry`] so
//! that remounting a UI tree, or two consumers starting at once, results in
//! a single init round trip.
//!
//! ```no_run
//! use std::sync::Arc;
//! use nav_core_auth::{AuthOptions, BrowserEnvironment, ClientFactory, SessionCoordinator, SessionRegistry};
//!
//! async fn run(factory: Arc<dyn ClientFactory>, environment: Arc<dyn BrowserEnvironment>) {
//!     let registry = Arc::new(SessionRegistry::new(factory));
//!     let options = AuthOptions::new("https://auth.example.com", "zc", "frontend");
//!     let auth = SessionCoordinator::new(registry, environment, reqwest::Client::new(), options);
//!
//!     auth.initialize().await;
//!     if let Some(token) = auth.get_token().await {
//!         println!("Bearer {}", token);
//!     }
//! }
//! ```

pub mod browser;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod types;

pub use browser::{BrowserEnvironment, KeyValueStorage, MemoryStorage};
pub use client::{ClientFactory, IdentityClient, InitOptions, LoginOptions, TokenExpiredHandler};
pub use config::{AuthOptions, OnLoad, ProviderConfig, ReadyCallback};
pub use coordinator::{AuthContext, SessionCoordinator};
pub use error::AuthError;
pub use registry::{Acquired, ExpiryHooks, ExpirySubscription, SessionRegistry, SharedInit};
pub use types::{AuthState, Claims, UserInfo};

/// Refresh the token on expiry if it expires within this many seconds
pub const TOKEN_REFRESH_MIN_VALIDITY: u32 = 30;

/// `get_token` refreshes if the token expires within this many seconds
pub const TOKEN_UPDATE_MIN_VALIDITY: u32 = 300;

/// Storage keys owned by the identity client start with this prefix
pub const STORAGE_KEY_PREFIX: &str = "kc-";

pub const INIT_FAILED_MESSAGE: &str = "Unable to check login status";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

pub const TOKEN_REFRESH_FAILED_MESSAGE: &str = "Session expired. Please login again.";

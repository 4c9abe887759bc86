//! nav-core
//!
//! Shared navigation logic for the Zerocopter web app and the website
//! builder: Keycloak session coordination, user and company display helpers,
//! pricing data, and the constants and design tokens both surfaces render
//! with.

pub mod config;
pub mod constants;
pub mod error;
pub mod tokens;

use std::path::Path;
use std::sync::Arc;

use log::debug;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::config::NavOptions;
use crate::error::Error;

pub use nav_core_auth as auth;
pub use nav_core_display as display;
pub use nav_core_pricing as pricing;

use nav_core_auth::{AuthOptions, BrowserEnvironment, ClientFactory, SessionCoordinator, SessionRegistry};
use nav_core_pricing::PricingData;

/// The main entry point for nav-core
///
/// Owns the session registry, so every coordinator created through the same
/// `NavCore` shares identity clients and their in-flight initialization.
pub struct NavCore {
    /// HTTP client used for token revocation
    pub http_client: Client,
    /// Client options
    pub options: NavOptions,
    registry: Arc<SessionRegistry>,
    environment: Arc<dyn BrowserEnvironment>,
}

impl NavCore {
    /// Create a new nav-core instance
    ///
    /// # Arguments
    ///
    /// * `factory` - Builds identity clients for a provider configuration
    /// * `environment` - The host's location, storage and navigation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use nav_core::NavCore;
    /// use nav_core::auth::{AuthOptions, BrowserEnvironment, ClientFactory};
    ///
    /// async fn run(factory: Arc<dyn ClientFactory>, environment: Arc<dyn BrowserEnvironment>) {
    ///     let nav = NavCore::new(factory, environment).unwrap();
    ///     let auth = nav.use_auth(AuthOptions::new("https://auth.example.com", "zc", "frontend"));
    ///     auth.initialize().await;
    /// }
    /// ```
    pub fn new(
        factory: Arc<dyn ClientFactory>,
        environment: Arc<dyn BrowserEnvironment>,
    ) -> Result<Self, Error> {
        Self::new_with_options(factory, environment, NavOptions::default())
    }

    /// Create a new nav-core instance with custom options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use nav_core::{NavCore, config::NavOptions};
    /// use nav_core::auth::{BrowserEnvironment, ClientFactory};
    ///
    /// fn build(factory: Arc<dyn ClientFactory>, environment: Arc<dyn BrowserEnvironment>) -> NavCore {
    ///     let options = NavOptions::default().with_request_timeout(Some(Duration::from_secs(10)));
    ///     NavCore::new_with_options(factory, environment, options).unwrap()
    /// }
    /// ```
    pub fn new_with_options(
        factory: Arc<dyn ClientFactory>,
        environment: Arc<dyn BrowserEnvironment>,
        options: NavOptions,
    ) -> Result<Self, Error> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            options,
            registry: Arc::new(SessionRegistry::new(factory)),
            environment,
        })
    }

    /// The registry shared by every coordinator of this instance
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Create a session coordinator for the given provider
    ///
    /// The coordinator starts in the loading state; call
    /// [`SessionCoordinator::initialize`] or use [`spawn_auth`](Self::spawn_auth).
    pub fn use_auth(&self, options: AuthOptions) -> SessionCoordinator {
        debug!("Creating session coordinator for {}", options.provider);
        SessionCoordinator::new(
            self.registry.clone(),
            self.environment.clone(),
            self.http_client.clone(),
            options,
        )
    }

    /// Create a session coordinator and start its initialization on the
    /// tokio runtime
    pub fn spawn_auth(&self, options: AuthOptions) -> (SessionCoordinator, JoinHandle<()>) {
        let coordinator = self.use_auth(options);
        let task = coordinator.spawn_initialize();
        (coordinator, task)
    }

    /// Parse pricing data from a JSON string
    pub fn parse_pricing(json: &str) -> Result<PricingData, Error> {
        Ok(PricingData::parse(json)?)
    }

    /// Load pricing data from a `packages.json` file
    pub fn load_pricing(path: impl AsRef<Path>) -> Result<PricingData, Error> {
        Ok(PricingData::load(path)?)
    }
}

impl std::fmt::Debug for NavCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavCore")
            .field("options", &self.options)
            .field("sessions", &self.registry.len())
            .finish()
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::NavOptions;
    pub use crate::constants::{UserMenuAction, USER_MENU_ITEMS};
    pub use crate::error::Error;
    pub use crate::NavCore;
    pub use nav_core_auth::{AuthContext, AuthOptions, AuthState, SessionCoordinator, UserInfo};
    pub use nav_core_display::{user_display_name, user_initials};
    pub use nav_core_pricing::{PricingData, PricingPackage};
}

//! The identity client seam
//!
//! The coordinator never speaks OpenID Connect itself. Discovery, PKCE code
//! exchange and token refresh belong to the wrapped client, which is consumed
//! through [`IdentityClient`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::{OnLoad, ProviderConfig};
use crate::types::Claims;

/// Options passed to [`IdentityClient::init`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub on_load: OnLoad,
    pub check_login_iframe: bool,
    pub pkce_method: String,
    pub response_mode: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent_check_sso_redirect_uri: Option<String>,
}

impl InitOptions {
    pub fn new(on_load: OnLoad, check_login_iframe: bool) -> Self {
        Self {
            on_load,
            check_login_iframe,
            pkce_method: "S256".to_string(),
            response_mode: "fragment".to_string(),
            scope: "openid".to_string(),
            silent_check_sso_redirect_uri: None,
        }
    }
}

/// Options passed to [`IdentityClient::login`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOptions {
    pub redirect_uri: String,
    pub scope: String,
}

/// Invoked by the client's own timer when the access token expires
pub type TokenExpiredHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// A wrapped identity-provider client (keycloak-js or an equivalent)
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Run the client's own init; resolves to whether the user is authenticated
    async fn init(&self, options: InitOptions) -> anyhow::Result<bool>;

    /// `None` until the client has completed init
    fn authenticated(&self) -> Option<bool>;

    /// The current access token
    fn token(&self) -> Option<String>;

    /// The current ID token
    fn id_token(&self) -> Option<String>;

    /// The current refresh token
    fn refresh_token(&self) -> Option<String>;

    /// Claims of the current token
    fn token_parsed(&self) -> Option<Claims>;

    /// Start the login redirect. Completion is a fresh page load.
    fn login(&self, options: LoginOptions) -> anyhow::Result<()>;

    /// Refresh the token if it expires within `min_validity` seconds.
    /// Resolves to whether a refresh happened; fails when the refresh token
    /// is no longer valid.
    async fn update_token(&self, min_validity: u32) -> anyhow::Result<bool>;

    /// Replace the token-expiry hook. `None` unsubscribes.
    fn set_token_expired_handler(&self, handler: Option<TokenExpiredHandler>);
}

/// Constructs identity clients for a provider
pub trait ClientFactory: Send + Sync {
    fn create(&self, config: &ProviderConfig) -> anyhow::Result<Arc<dyn IdentityClient>>;
}

impl<F> ClientFactory for F
where
    F: Fn(&ProviderConfig) -> anyhow::Result<Arc<dyn IdentityClient>> + Send + Sync,
{
    fn create(&self, config: &ProviderConfig) -> anyhow::Result<Arc<dyn IdentityClient>> {
        self(config)
    }
}

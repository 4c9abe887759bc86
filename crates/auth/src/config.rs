//! Configuration for the session coordinator

use std::env;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::IdentityClient;
use crate::error::AuthError;

/// Identifies one identity-provider endpoint, realm and application.
///
/// Two configs are the same provider iff all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The Keycloak server URL
    #[serde(rename = "url")]
    pub server_url: String,

    /// The realm
    pub realm: String,

    /// The client ID
    #[serde(rename = "clientId")]
    pub client_id: String,
}

impl ProviderConfig {
    pub fn new(server_url: &str, realm: &str, client_id: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            realm: realm.to_string(),
            client_id: client_id.to_string(),
        }
    }

    /// Canonical string form, stable across field order
    pub fn cache_key(&self) -> Result<String, AuthError> {
        Ok(serde_json::to_string(self)?)
    }

    fn endpoint(&self, name: &str) -> Result<Url, AuthError> {
        let url = format!(
            "{}/realms/{}/protocol/openid-connect/{}",
            self.server_url, self.realm, name
        );
        Ok(Url::parse(&url)?)
    }

    /// The token revocation endpoint
    pub fn revoke_url(&self) -> Result<Url, AuthError> {
        self.endpoint("revoke")
    }

    /// The RP-initiated logout URL.
    ///
    /// `id_token_hint` is only appended for a non-empty token.
    pub fn logout_url(
        &self,
        post_logout_redirect_uri: &str,
        id_token_hint: Option<&str>,
    ) -> Result<Url, AuthError> {
        let mut url = self.endpoint("logout")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.client_id);
            query.append_pair("post_logout_redirect_uri", post_logout_redirect_uri);
            if let Some(hint) = id_token_hint.filter(|hint| !hint.is_empty()) {
                query.append_pair("id_token_hint", hint);
            }
        }
        Ok(url)
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/realms/{} ({})", self.server_url, self.realm, self.client_id)
    }
}

/// The identity client's `onLoad` init mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnLoad {
    /// Silently check for an existing session
    #[default]
    CheckSso,
    /// Redirect to the login page when there is no session
    LoginRequired,
}

impl OnLoad {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckSso => "check-sso",
            Self::LoginRequired => "login-required",
        }
    }
}

/// Called with the raw client once a coordinator has attached it
pub type ReadyCallback = Arc<dyn Fn(Arc<dyn IdentityClient>) + Send + Sync>;

/// Options accepted by a session coordinator
#[derive(Clone)]
pub struct AuthOptions {
    /// Which provider to talk to
    pub provider: ProviderConfig,

    /// Where to go after login; defaults to the current URL
    pub login_redirect_uri: Option<String>,

    /// Where to go after logout; defaults to the current origin
    pub logout_redirect_uri: Option<String>,

    /// Invoked with the client once it is attached
    pub on_ready: Option<ReadyCallback>,

    /// The init mode
    pub on_load: OnLoad,

    /// Check SSO through a hidden iframe at `{origin}/silent-check-sso.html`
    pub enable_silent_sso_check: bool,

    /// Keep the login status iframe running
    pub check_login_iframe: bool,
}

impl AuthOptions {
    /// Create options for a provider with all defaults
    pub fn new(server_url: &str, realm: &str, client_id: &str) -> Self {
        Self {
            provider: ProviderConfig::new(server_url, realm, client_id),
            login_redirect_uri: None,
            logout_redirect_uri: None,
            on_ready: None,
            on_load: OnLoad::default(),
            enable_silent_sso_check: false,
            check_login_iframe: false,
        }
    }

    /// Read options from `KEYCLOAK_URL`, `KEYCLOAK_REALM` and
    /// `KEYCLOAK_CLIENT_ID`, plus the optional `KEYCLOAK_LOGIN_REDIRECT_URI`
    /// and `KEYCLOAK_LOGOUT_REDIRECT_URI`.
    pub fn from_env() -> Result<Self, AuthError> {
        let required = |name: &str| {
            env::var(name).map_err(|_| AuthError::config(format!("{} is not set", name)))
        };

        let mut options = Self::new(
            &required("KEYCLOAK_URL")?,
            &required("KEYCLOAK_REALM")?,
            &required("KEYCLOAK_CLIENT_ID")?,
        );
        options.login_redirect_uri = env::var("KEYCLOAK_LOGIN_REDIRECT_URI").ok();
        options.logout_redirect_uri = env::var("KEYCLOAK_LOGOUT_REDIRECT_URI").ok();
        Ok(options)
    }

    /// Set the post-login redirect URI
    pub fn with_login_redirect_uri(mut self, value: &str) -> Self {
        self.login_redirect_uri = Some(value.to_string());
        self
    }

    /// Set the post-logout redirect URI
    pub fn with_logout_redirect_uri(mut self, value: &str) -> Self {
        self.logout_redirect_uri = Some(value.to_string());
        self
    }

    /// Set the ready callback
    pub fn with_on_ready<F>(mut self, callback: F) -> Self
    where
        F: Fn(Arc<dyn IdentityClient>) + Send + Sync + 'static,
    {
        self.on_ready = Some(Arc::new(callback));
        self
    }

    /// Set the init mode
    pub fn with_on_load(mut self, value: OnLoad) -> Self {
        self.on_load = value;
        self
    }

    /// Set whether to use the silent SSO check
    pub fn with_silent_sso_check(mut self, value: bool) -> Self {
        self.enable_silent_sso_check = value;
        self
    }

    /// Set whether to use the login status iframe
    pub fn with_check_login_iframe(mut self, value: bool) -> Self {
        self.check_login_iframe = value;
        self
    }
}

impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptions")
            .field("provider", &self.provider)
            .field("login_redirect_uri", &self.login_redirect_uri)
            .field("logout_redirect_uri", &self.logout_redirect_uri)
            .field("on_ready", &self.on_ready.is_some())
            .field("on_load", &self.on_load)
            .field("enable_silent_sso_check", &self.enable_silent_sso_check)
            .field("check_login_iframe", &self.check_login_iframe)
            .finish()
    }
}

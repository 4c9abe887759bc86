//! The session coordinator: reactive auth state plus login, logout,
//! get-token and clear-error, on top of a cached identity client

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use futures_util::FutureExt;
use log::{debug, error, info, warn};
use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::browser::{self, BrowserEnvironment};
use crate::client::{IdentityClient, InitOptions, LoginOptions, TokenExpiredHandler};
use crate::config::AuthOptions;
use crate::fetch;
use crate::registry::{Acquired, ExpiryHooks, ExpirySubscription, SessionRegistry};
use crate::types::{AuthState, UserInfo};
use crate::{
    INIT_FAILED_MESSAGE, SESSION_EXPIRED_MESSAGE, STORAGE_KEY_PREFIX, TOKEN_REFRESH_FAILED_MESSAGE,
    TOKEN_REFRESH_MIN_VALIDITY, TOKEN_UPDATE_MIN_VALIDITY,
};

struct Inner {
    registry: Arc<SessionRegistry>,
    environment: Arc<dyn BrowserEnvironment>,
    http_client: Client,
    options: AuthOptions,
    client: RwLock<Option<Arc<dyn IdentityClient>>>,
    state: watch::Sender<AuthState>,
    active: AtomicBool,
    expiry: Mutex<Option<ExpirySubscription>>,
}

impl Inner {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn expiry(&self) -> MutexGuard<'_, Option<ExpirySubscription>> {
        self.expiry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn client(&self) -> Option<Arc<dyn IdentityClient>> {
        self.client
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn attach(&self, client: Arc<dyn IdentityClient>) {
        *self
            .client
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(client.clone());

        if let Some(on_ready) = &self.options.on_ready {
            on_ready(client);
        }
    }

    /// Replace the whole state. Dropped after teardown.
    fn replace_state(&self, state: AuthState) {
        if !self.is_active() {
            debug!("Coordinator torn down, dropping state {:?}", state);
            return;
        }
        self.state.send_replace(state);
    }

    /// Patch the state in place. Dropped after teardown.
    fn update_state(&self, patch: impl FnOnce(&mut AuthState)) {
        if !self.is_active() {
            debug!("Coordinator torn down, dropping state patch");
            return;
        }
        self.state.send_modify(patch);
    }

    fn init_options(&self) -> InitOptions {
        let mut options = InitOptions::new(self.options.on_load, self.options.check_login_iframe);
        if self.options.enable_silent_sso_check {
            options.silent_check_sso_redirect_uri =
                Some(format!("{}/silent-check-sso.html", self.environment.origin()));
        }
        options
    }

    async fn on_token_expired(&self) {
        let Some(client) = self.client() else {
            return;
        };

        match client.update_token(TOKEN_REFRESH_MIN_VALIDITY).await {
            Ok(true) => {
                if let Some(claims) = client.token_parsed() {
                    let user = UserInfo::from(&claims);
                    debug!("Token refreshed for {:?}", user.sub);
                    self.update_state(|state| {
                        state.user = Some(user);
                        state.is_authenticated = true;
                    });
                }
            }
            Ok(false) => debug!("Token still valid, no refresh needed"),
            Err(e) => {
                warn!("Token refresh on expiry failed: {:#}", e);
                self.replace_state(AuthState::failed(SESSION_EXPIRED_MESSAGE));
            }
        }
    }

    fn clear_storage(&self) {
        let callback_prefix = format!("kc-callback-{}", self.options.provider.client_id);
        let prefixes = [callback_prefix.as_str(), STORAGE_KEY_PREFIX];

        let areas = [
            ("localStorage", self.environment.local_storage()),
            ("sessionStorage", self.environment.session_storage()),
        ];
        for (name, storage) in areas {
            match browser::remove_prefixed(storage, &prefixes) {
                Ok(removed) => debug!("Removed {} keys from {}", removed, name),
                Err(e) => warn!("Failed to clear {}: {}", name, e),
            }
        }
    }
}

/// Drives one identity client for one UI consumer.
///
/// Cloning is cheap and every clone drives the same state, so handles can be
/// passed to callbacks freely.
#[derive(Clone)]
pub struct SessionCoordinator {
    inner: Arc<Inner>,
}

impl SessionCoordinator {
    /// Create a coordinator in the loading state. Nothing happens until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(
        registry: Arc<SessionRegistry>,
        environment: Arc<dyn BrowserEnvironment>,
        http_client: Client,
        options: AuthOptions,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::loading());

        Self {
            inner: Arc::new(Inner {
                registry,
                environment,
                http_client,
                options,
                client: RwLock::new(None),
                state,
                active: AtomicBool::new(true),
                expiry: Mutex::new(None),
            }),
        }
    }

    pub fn options(&self) -> &AuthOptions {
        &self.inner.options
    }

    /// A snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// A receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// The current state together with the actions
    pub fn context(&self) -> AuthContext {
        AuthContext {
            state: self.state(),
            actions: self.clone(),
        }
    }

    /// The attached identity client, once initialization has attached one
    pub fn client(&self) -> Option<Arc<dyn IdentityClient>> {
        self.inner.client()
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Attach the cached client for this provider, running its init if no
    /// other coordinator already did.
    ///
    /// A client that already finished init is adopted without awaiting
    /// anything. Failures end up in the state's `error`; this never fails.
    pub async fn initialize(&self) {
        let inner = &self.inner;
        let config = &inner.options.provider;

        match inner.registry.acquire(config, || inner.init_options()) {
            Ok(Acquired::Ready { client, hooks }) => {
                inner.attach(client.clone());
                let authenticated = client.authenticated() == Some(true);
                inner.replace_state(AuthState::settled(
                    authenticated,
                    client.token_parsed().as_ref(),
                ));
                self.register_expiry_handler(&client, &hooks);
            }
            Ok(Acquired::Pending { client, hooks, init }) => {
                inner.attach(client.clone());

                match init.await {
                    Ok(authenticated) => {
                        if !inner.is_active() {
                            debug!("Init for {} finished after teardown", config);
                            return;
                        }
                        info!("Identity client for {} ready (authenticated: {})", config, authenticated);
                        inner.replace_state(AuthState::settled(
                            authenticated,
                            client.token_parsed().as_ref(),
                        ));
                        self.register_expiry_handler(&client, &hooks);
                    }
                    Err(e) => {
                        error!("Keycloak initialization failed for {}: {:#}", config, e);
                        inner.replace_state(AuthState::failed(INIT_FAILED_MESSAGE));
                    }
                }
            }
            Err(e) => {
                error!("Keycloak initialization failed for {}: {}", config, e);
                inner.replace_state(AuthState::failed(INIT_FAILED_MESSAGE));
            }
        }
    }

    /// Run [`initialize`](Self::initialize) on the tokio runtime
    pub fn spawn_initialize(&self) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.initialize().await })
    }

    fn register_expiry_handler(&self, client: &Arc<dyn IdentityClient>, hooks: &Arc<ExpiryHooks>) {
        // Checked under the lock so a concurrent teardown cannot miss it.
        let mut expiry = self.inner.expiry();
        if !self.inner.is_active() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let handler: TokenExpiredHandler = Arc::new(move || {
            let weak = weak.clone();
            async move {
                if let Some(inner) = weak.upgrade() {
                    inner.on_token_expired().await;
                }
            }
            .boxed()
        });

        debug!("Registering token expiry handler");
        let previous = expiry.replace(hooks.subscribe(client, handler));
        drop(expiry);
        drop(previous);
    }

    /// Redirect to the provider's login page. No-op before a client is attached.
    pub fn login(&self) {
        let Some(client) = self.inner.client() else {
            debug!("login() called before the identity client was attached");
            return;
        };

        let redirect_uri = self
            .inner
            .options
            .login_redirect_uri
            .clone()
            .unwrap_or_else(|| self.inner.environment.current_url());

        if let Err(e) = client.login(LoginOptions {
            redirect_uri,
            scope: "openid".to_string(),
        }) {
            error!("Login redirect failed: {:#}", e);
        }
    }

    /// Log out locally at once, then revoke the refresh token, clear the
    /// client's storage and navigate to the provider's logout page.
    ///
    /// Each side effect is best-effort; failures are only logged.
    pub async fn logout(&self) {
        let inner = &self.inner;
        let Some(client) = inner.client() else {
            debug!("logout() called before the identity client was attached");
            return;
        };

        // Read before the reset: some clients drop their tokens on state change.
        let id_token = client.id_token().filter(|token| !token.is_empty());
        let refresh_token = client.refresh_token().filter(|token| !token.is_empty());
        let redirect_uri = inner
            .options
            .logout_redirect_uri
            .clone()
            .unwrap_or_else(|| inner.environment.origin());

        inner.replace_state(AuthState::unauthenticated());

        let config = &inner.options.provider;

        if let Some(refresh_token) = refresh_token {
            if let Err(e) = fetch::revoke_refresh_token(&inner.http_client, config, &refresh_token).await {
                warn!("Token revocation failed: {}", e);
            }
        }

        inner.clear_storage();

        match config.logout_url(&redirect_uri, id_token.as_deref()) {
            Ok(url) => {
                info!("Logging out of {}", config);
                inner.environment.navigate(url.as_str());
            }
            Err(e) => warn!("Failed to build logout URL: {}", e),
        }
    }

    /// A valid access token for an outgoing request, refreshed when it
    /// expires within five minutes. `None` when not authenticated or when
    /// the refresh fails.
    pub async fn get_token(&self) -> Option<String> {
        let client = self.inner.client()?;
        let authenticated = self.state().is_authenticated;
        if !authenticated || client.authenticated() != Some(true) {
            return None;
        }

        match client.update_token(TOKEN_UPDATE_MIN_VALIDITY).await {
            Ok(_) => client.token(),
            Err(e) => {
                error!("Token refresh failed: {:#}", e);
                self.inner
                    .replace_state(AuthState::failed(TOKEN_REFRESH_FAILED_MESSAGE));
                None
            }
        }
    }

    /// Clear the error, leaving everything else as is
    pub fn clear_error(&self) {
        self.inner.update_state(|state| state.error = None);
    }

    /// Stop applying state updates and unsubscribe from token expiry.
    ///
    /// The cached client, any in-flight init and the expiry subscriptions of
    /// other coordinators on the same provider are left running.
    pub fn teardown(&self) {
        if self.inner.active.swap(false, Ordering::SeqCst) {
            debug!("Tearing down coordinator for {}", self.inner.options.provider);
            let subscription = self.inner.expiry().take();
            if let Some(subscription) = subscription {
                subscription.cancel();
            }
        }
    }
}

impl fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("provider", &self.inner.options.provider)
            .field("state", &*self.inner.state.borrow())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Auth state plus the actions that change it
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub state: AuthState,
    actions: SessionCoordinator,
}

impl AuthContext {
    pub fn login(&self) {
        self.actions.login()
    }

    pub async fn logout(&self) {
        self.actions.logout().await
    }

    pub async fn get_token(&self) -> Option<String> {
        self.actions.get_token().await
    }

    pub fn clear_error(&self) {
        self.actions.clear_error()
    }

    /// The coordinator behind this context
    pub fn actions(&self) -> &SessionCoordinator {
        &self.actions
    }
}

impl Deref for AuthContext {
    type Target = AuthState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

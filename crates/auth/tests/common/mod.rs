#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use nav_core_auth::{
    AuthOptions, BrowserEnvironment, Claims, ClientFactory, IdentityClient, InitOptions,
    KeyValueStorage, LoginOptions, MemoryStorage, ProviderConfig, SessionCoordinator,
    SessionRegistry, TokenExpiredHandler,
};
use tokio::sync::Semaphore;

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

pub fn claims(name: &str) -> Claims {
    Claims {
        sub: Some("user-1".to_string()),
        email: Some("ada@example.com".to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[derive(Default)]
struct Session {
    authenticated: Option<bool>,
    token: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
    claims: Option<Claims>,
}

/// Scripted stand-in for keycloak-js
pub struct MockClient {
    session: Mutex<Session>,
    init_outcome: Mutex<Result<bool, String>>,
    session_claims: Mutex<Option<Claims>>,
    refresh_outcome: Mutex<Result<bool, String>>,
    refreshed_claims: Mutex<Option<Claims>>,
    gate: Option<Semaphore>,
    handler: Mutex<Option<TokenExpiredHandler>>,
    pub init_calls: AtomicUsize,
    pub init_options: Mutex<Vec<InitOptions>>,
    pub update_calls: Mutex<Vec<u32>>,
    pub logins: Mutex<Vec<LoginOptions>>,
}

impl MockClient {
    fn with_outcome(outcome: Result<bool, String>, claims: Option<Claims>) -> Self {
        Self {
            session: Mutex::new(Session::default()),
            init_outcome: Mutex::new(outcome),
            session_claims: Mutex::new(claims),
            refresh_outcome: Mutex::new(Ok(false)),
            refreshed_claims: Mutex::new(None),
            gate: None,
            handler: Mutex::new(None),
            init_calls: AtomicUsize::new(0),
            init_options: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            logins: Mutex::new(Vec::new()),
        }
    }

    /// Init resolves `true` with `claims`
    pub fn authenticated(claims: Claims) -> Self {
        Self::with_outcome(Ok(true), Some(claims))
    }

    /// Init resolves `true` but the client exposes no claims
    pub fn authenticated_without_claims() -> Self {
        Self::with_outcome(Ok(true), None)
    }

    /// Init resolves `false`
    pub fn anonymous() -> Self {
        Self::with_outcome(Ok(false), None)
    }

    /// Init rejects
    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()), None)
    }

    /// Hold init in flight until [`release`](Self::release)
    pub fn held(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    pub fn set_refresh_outcome(&self, outcome: Result<bool, &str>) {
        *self.refresh_outcome.lock().unwrap() = outcome.map_err(str::to_string);
    }

    pub fn set_refreshed_claims(&self, claims: Claims) {
        *self.refreshed_claims.lock().unwrap() = Some(claims);
    }

    pub fn set_tokens(&self, id_token: Option<&str>, refresh_token: Option<&str>) {
        let mut session = self.session.lock().unwrap();
        session.id_token = id_token.map(str::to_string);
        session.refresh_token = refresh_token.map(str::to_string);
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn has_expiry_handler(&self) -> bool {
        self.handler.lock().unwrap().is_some()
    }

    /// Fire the expiry hook the way the client's own timer would
    pub async fn expire(&self) -> bool {
        let handler = self.handler.lock().unwrap().clone();
        match handler {
            Some(handler) => {
                handler().await;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl IdentityClient for MockClient {
    async fn init(&self, options: InitOptions) -> anyhow::Result<bool> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.init_options.lock().unwrap().push(options);

        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }

        let outcome = self.init_outcome.lock().unwrap().clone();
        let authenticated = outcome.map_err(|e| anyhow!(e))?;

        let mut session = self.session.lock().unwrap();
        session.authenticated = Some(authenticated);
        if authenticated {
            session.token = Some("access-1".to_string());
            session.id_token.get_or_insert_with(|| "id-1".to_string());
            session.refresh_token.get_or_insert_with(|| "refresh-1".to_string());
            session.claims = self.session_claims.lock().unwrap().clone();
        }
        Ok(authenticated)
    }

    fn authenticated(&self) -> Option<bool> {
        self.session.lock().unwrap().authenticated
    }

    fn token(&self) -> Option<String> {
        self.session.lock().unwrap().token.clone()
    }

    fn id_token(&self) -> Option<String> {
        self.session.lock().unwrap().id_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.session.lock().unwrap().refresh_token.clone()
    }

    fn token_parsed(&self) -> Option<Claims> {
        self.session.lock().unwrap().claims.clone()
    }

    fn login(&self, options: LoginOptions) -> anyhow::Result<()> {
        self.logins.lock().unwrap().push(options);
        Ok(())
    }

    async fn update_token(&self, min_validity: u32) -> anyhow::Result<bool> {
        self.update_calls.lock().unwrap().push(min_validity);

        let outcome = self.refresh_outcome.lock().unwrap().clone();
        let refreshed = outcome.map_err(|e| anyhow!(e))?;

        if refreshed {
            let mut session = self.session.lock().unwrap();
            session.token = Some("access-2".to_string());
            if let Some(claims) = self.refreshed_claims.lock().unwrap().clone() {
                session.claims = Some(claims);
            }
        }
        Ok(refreshed)
    }

    fn set_token_expired_handler(&self, handler: Option<TokenExpiredHandler>) {
        *self.handler.lock().unwrap() = handler;
    }
}

/// Hands out the same mock client for every config and counts constructions
pub struct MockFactory {
    client: Arc<MockClient>,
    fail: bool,
    pub created: AtomicUsize,
}

impl MockFactory {
    pub fn new(client: Arc<MockClient>) -> Self {
        Self {
            client,
            fail: false,
            created: AtomicUsize::new(0),
        }
    }

    pub fn failing(client: Arc<MockClient>) -> Self {
        Self {
            fail: true,
            ..Self::new(client)
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ClientFactory for MockFactory {
    fn create(&self, _config: &ProviderConfig) -> anyhow::Result<Arc<dyn IdentityClient>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("keycloak-js failed to load"));
        }
        Ok(self.client.clone())
    }
}

/// A page at https://app.test/dashboard
pub struct MockEnvironment {
    pub session: MemoryStorage,
    pub local: MemoryStorage,
    pub navigations: Mutex<Vec<String>>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            session: MemoryStorage::new(),
            local: MemoryStorage::new(),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl BrowserEnvironment for MockEnvironment {
    fn current_url(&self) -> String {
        "https://app.test/dashboard".to_string()
    }

    fn origin(&self) -> String {
        "https://app.test".to_string()
    }

    fn session_storage(&self) -> &dyn KeyValueStorage {
        &self.session
    }

    fn local_storage(&self) -> &dyn KeyValueStorage {
        &self.local
    }

    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }
}

pub struct Harness {
    pub client: Arc<MockClient>,
    pub factory: Arc<MockFactory>,
    pub registry: Arc<SessionRegistry>,
    pub environment: Arc<MockEnvironment>,
}

impl Harness {
    pub fn new(client: MockClient) -> Self {
        init_logger();
        let client = Arc::new(client);
        let factory = Arc::new(MockFactory::new(client.clone()));
        Self::with_factory(client, factory)
    }

    pub fn with_factory(client: Arc<MockClient>, factory: Arc<MockFactory>) -> Self {
        init_logger();
        Self {
            registry: Arc::new(SessionRegistry::new(factory.clone())),
            client,
            factory,
            environment: Arc::new(MockEnvironment::new()),
        }
    }

    pub fn coordinator(&self, options: AuthOptions) -> SessionCoordinator {
        SessionCoordinator::new(
            self.registry.clone(),
            self.environment.clone(),
            reqwest::Client::new(),
            options,
        )
    }
}

pub fn options() -> AuthOptions {
    AuthOptions::new("https://idp.test", "r", "c")
}

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nav_core::auth::{
    AuthOptions, BrowserEnvironment, Claims, ClientFactory, IdentityClient, InitOptions,
    KeyValueStorage, LoginOptions, MemoryStorage, ProviderConfig, TokenExpiredHandler,
};
use nav_core::constants::{UserMenuAction, USER_MENU_ITEMS};
use nav_core::display::{user_display_name, user_initials};
use nav_core::error::Error;
use nav_core::NavCore;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct StubClient {
    authenticated: bool,
    init_calls: AtomicUsize,
}

impl StubClient {
    fn issued(&self, value: &str) -> Option<String> {
        self.authenticated.then(|| value.to_string())
    }
}

#[async_trait]
impl IdentityClient for StubClient {
    async fn init(&self, _options: InitOptions) -> anyhow::Result<bool> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.authenticated)
    }

    fn authenticated(&self) -> Option<bool> {
        Some(self.authenticated)
    }

    fn token(&self) -> Option<String> {
        self.issued("access-9")
    }

    fn id_token(&self) -> Option<String> {
        self.issued("id-9")
    }

    fn refresh_token(&self) -> Option<String> {
        self.issued("refresh-9")
    }

    fn token_parsed(&self) -> Option<Claims> {
        self.authenticated.then(|| Claims {
            name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        })
    }

    fn login(&self, _options: LoginOptions) -> anyhow::Result<()> {
        Ok(())
    }

    async fn update_token(&self, _min_validity: u32) -> anyhow::Result<bool> {
        Ok(false)
    }

    fn set_token_expired_handler(&self, _handler: Option<TokenExpiredHandler>) {}
}

struct StubEnvironment {
    local: MemoryStorage,
    session: MemoryStorage,
    navigations: Mutex<Vec<String>>,
}

impl BrowserEnvironment for StubEnvironment {
    fn current_url(&self) -> String {
        "https://app.test/".to_string()
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

fn setup(authenticated: bool) -> (NavCore, Arc<StubClient>, Arc<StubEnvironment>) {
    let client = Arc::new(StubClient {
        authenticated,
        init_calls: AtomicUsize::new(0),
    });
    let environment = Arc::new(StubEnvironment {
        local: MemoryStorage::new(),
        session: MemoryStorage::new(),
        navigations: Mutex::new(Vec::new()),
    });

    let shared = client.clone();
    let factory: Arc<dyn ClientFactory> = Arc::new(
        move |_: &ProviderConfig| -> anyhow::Result<Arc<dyn IdentityClient>> { Ok(shared.clone()) },
    );

    let nav = NavCore::new(factory, environment.clone()).unwrap();
    (nav, client, environment)
}

fn auth_options() -> AuthOptions {
    AuthOptions::new("https://idp.test", "zc", "web")
}

#[tokio::test]
async fn test_coordinators_share_the_registry() {
    let (nav, client, _) = setup(true);

    let first = nav.use_auth(auth_options());
    first.initialize().await;
    let second = nav.use_auth(auth_options());
    second.initialize().await;

    assert_eq!(client.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.registry().len(), 1);
    assert!(second.state().is_authenticated);
}

#[tokio::test]
async fn test_spawn_auth_settles_state() {
    let (nav, _, _) = setup(true);

    let (auth, task) = nav.spawn_auth(auth_options());
    task.await.unwrap();

    let state = auth.state();
    assert!(!state.is_loading);
    let user = state.user.as_ref();
    assert_eq!(user_display_name(user), "Ada Lovelace");
    assert_eq!(user_initials(&user_display_name(user)), "AL");
}

#[tokio::test]
async fn test_anonymous_logout_navigates_without_revoke() {
    let (nav, _, environment) = setup(false);

    let (auth, task) = nav.spawn_auth(auth_options().with_logout_redirect_uri("https://zerocopter.com"));
    task.await.unwrap();
    assert!(!auth.state().is_authenticated);

    auth.logout().await;

    let navigations = environment.navigations.lock().unwrap().clone();
    assert_eq!(
        navigations,
        vec![
            "https://idp.test/realms/zc/protocol/openid-connect/logout?client_id=web&post_logout_redirect_uri=https%3A%2F%2Fzerocopter.com"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_logout_revokes_through_shared_http_client() {
    let server = MockServer::start().await;
    let user_agent = format!("nav-core/{}", env!("CARGO_PKG_VERSION"));
    Mock::given(method("POST"))
        .and(path("/realms/zc/protocol/openid-connect/revoke"))
        .and(header("user-agent", user_agent.as_str()))
        .and(body_string_contains("token=refresh-9"))
        .and(body_string_contains("client_id=web"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (nav, _, environment) = setup(true);
    let auth = nav.use_auth(AuthOptions::new(&server.uri(), "zc", "web"));
    auth.initialize().await;
    assert!(auth.state().is_authenticated);

    auth.logout().await;

    assert!(!auth.state().is_authenticated);
    let navigations = environment.navigations.lock().unwrap().clone();
    assert_eq!(navigations.len(), 1);
    assert!(navigations[0].starts_with(&format!(
        "{}/realms/zc/protocol/openid-connect/logout?client_id=web",
        server.uri()
    )));
    assert!(navigations[0].ends_with("&id_token_hint=id-9"));
}

#[test]
fn test_pricing_errors_convert() {
    match NavCore::parse_pricing("not json") {
        Err(Error::Pricing(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_pricing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"last_updated":"2025-06-01","currency":"EUR","billing_cycle":"yearly","packages":[]}}"#
    )
    .unwrap();

    let data = NavCore::load_pricing(file.path()).unwrap();
    assert_eq!(data.currency, "EUR");
    assert!(data.packages.is_empty());
}

#[test]
fn test_user_menu_ends_with_sign_out() {
    let last = USER_MENU_ITEMS.last().unwrap();
    assert_eq!(last.action, UserMenuAction::Signout);
    assert!(last.separator);
    assert_eq!(
        USER_MENU_ITEMS.iter().filter(|item| item.separator).count(),
        1
    );
}

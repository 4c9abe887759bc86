//! Process-wide cache of identity clients, one per provider config
//!
//! The registry is an ordinary object owned by application start-up and
//! shared by every coordinator. A cached entry pairs the client with its
//! in-flight init future; concurrent coordinators for the same config await
//! the same future instead of starting a second init.
//!
//! The identity client has a single expiry hook. Each entry owns an
//! [`ExpiryHooks`] that occupies that slot with one dispatcher and forwards
//! to every subscribed coordinator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{join_all, BoxFuture, FutureExt, Shared};
use log::debug;

use crate::client::{ClientFactory, IdentityClient, InitOptions, TokenExpiredHandler};
use crate::config::ProviderConfig;
use crate::error::AuthError;

/// Outcome of a client's init, cloneable so every waiter sees the same result
pub type InitResult = Result<bool, Arc<anyhow::Error>>;

/// An init future that any number of coordinators can await
pub type SharedInit = Shared<BoxFuture<'static, InitResult>>;

/// Expiry subscribers of one identity client
#[derive(Default)]
pub struct ExpiryHooks {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, TokenExpiredHandler)>>,
}

impl ExpiryHooks {
    fn handlers(&self) -> MutexGuard<'_, Vec<(u64, TokenExpiredHandler)>> {
        self.handlers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add `handler`, installing the dispatcher on `client` for the first
    /// subscriber. Dropping or cancelling the subscription removes it again.
    pub fn subscribe(
        self: &Arc<Self>,
        client: &Arc<dyn IdentityClient>,
        handler: TokenExpiredHandler,
    ) -> ExpirySubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut handlers = self.handlers();
        if handlers.is_empty() {
            debug!("Installing token expiry dispatcher");
            client.set_token_expired_handler(Some(self.dispatcher()));
        }
        handlers.push((id, handler));

        ExpirySubscription {
            hooks: self.clone(),
            client: client.clone(),
            id,
        }
    }

    fn unsubscribe(&self, client: &Arc<dyn IdentityClient>, id: u64) {
        let mut handlers = self.handlers();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        if handlers.is_empty() {
            debug!("Last expiry subscriber gone, removing dispatcher");
            client.set_token_expired_handler(None);
        }
    }

    fn snapshot(&self) -> Vec<TokenExpiredHandler> {
        let handlers = self.handlers();
        handlers.iter().map(|(_, handler)| handler.clone()).collect()
    }

    fn dispatcher(self: &Arc<Self>) -> TokenExpiredHandler {
        let weak = Arc::downgrade(self);
        Arc::new(move || {
            let handlers = match weak.upgrade() {
                Some(hooks) => hooks.snapshot(),
                None => Vec::new(),
            };
            async move {
                join_all(handlers.iter().map(|handler| handler())).await;
            }
            .boxed()
        })
    }
}

/// One coordinator's place in a client's [`ExpiryHooks`]
pub struct ExpirySubscription {
    hooks: Arc<ExpiryHooks>,
    client: Arc<dyn IdentityClient>,
    id: u64,
}

impl ExpirySubscription {
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ExpirySubscription {
    fn drop(&mut self) {
        self.hooks.unsubscribe(&self.client, self.id);
    }
}

struct CachedSession {
    client: Arc<dyn IdentityClient>,
    hooks: Arc<ExpiryHooks>,
    init: Option<SharedInit>,
}

/// What a coordinator gets back from [`SessionRegistry::acquire`]
pub enum Acquired {
    /// The client already finished its init; adopt it as-is
    Ready {
        client: Arc<dyn IdentityClient>,
        hooks: Arc<ExpiryHooks>,
    },
    /// The client's init is (now) in flight
    Pending {
        client: Arc<dyn IdentityClient>,
        hooks: Arc<ExpiryHooks>,
        init: SharedInit,
    },
}

/// Registry of identity clients keyed by provider config
pub struct SessionRegistry {
    factory: Arc<dyn ClientFactory>,
    entries: Mutex<HashMap<ProviderConfig, CachedSession>>,
}

impl SessionRegistry {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ProviderConfig, CachedSession>> {
        // The map holds no invariant a panicking holder could break halfway.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the client for `config`, creating it and starting its init if needed.
    ///
    /// `init_options` is only consulted when no init has been started yet.
    /// The lock is released before anything is awaited.
    pub fn acquire(
        &self,
        config: &ProviderConfig,
        init_options: impl FnOnce() -> InitOptions,
    ) -> Result<Acquired, AuthError> {
        let mut entries = self.entries();

        if let Some(cached) = entries.get(config) {
            if cached.client.authenticated().is_some() {
                debug!("Reusing initialized client for {}", config);
                return Ok(Acquired::Ready {
                    client: cached.client.clone(),
                    hooks: cached.hooks.clone(),
                });
            }
        }

        if !entries.contains_key(config) {
            debug!("Creating identity client for {}", config);
            let client = self
                .factory
                .create(config)
                .map_err(|e| AuthError::client(format!("{:#}", e)))?;
            entries.insert(
                config.clone(),
                CachedSession {
                    client,
                    hooks: Arc::default(),
                    init: None,
                },
            );
        }

        let cached = entries
            .get_mut(config)
            .ok_or_else(|| AuthError::client("cache entry vanished"))?;

        let init = match &cached.init {
            Some(init) => {
                debug!("Joining in-flight init for {}", config);
                init.clone()
            }
            None => {
                let options = init_options();
                debug!("Starting init for {} ({:?})", config, options.on_load);
                let client = cached.client.clone();
                let init = async move { client.init(options).await.map_err(Arc::new) }
                    .boxed()
                    .shared();
                cached.init = Some(init.clone());
                init
            }
        };

        Ok(Acquired::Pending {
            client: cached.client.clone(),
            hooks: cached.hooks.clone(),
            init,
        })
    }

    /// The cached client for `config`, if any
    pub fn lookup(&self, config: &ProviderConfig) -> Option<Arc<dyn IdentityClient>> {
        self.entries().get(config).map(|cached| cached.client.clone())
    }

    pub fn contains(&self, config: &ProviderConfig) -> bool {
        self.entries().contains_key(config)
    }

    /// Drop the entry for `config`. The next coordinator builds a fresh client.
    pub fn evict(&self, config: &ProviderConfig) -> bool {
        let removed = self.entries().remove(config).is_some();
        if removed {
            debug!("Evicted identity client for {}", config);
        }
        removed
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

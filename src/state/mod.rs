//! Shared application state and the in-memory pieces that complement the
//! persistent store.

pub mod countdown;
mod sse;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::order_store::OrderStore, error::ServiceError};

pub use self::countdown::{ColorToken, CountdownView, ExpiryTriggers, project};
pub use self::sse::SseHub;

/// Cheaply clonable handle to the shared [`AppState`].
pub type SharedState = Arc<AppState>;

/// Broadcast channel capacity for the shared SSE hub.
const SSE_CAPACITY: usize = 64;

/// Central application state holding the storage handle, SSE hub, and the
/// bookkeeping for countdown expiry edges.
pub struct AppState {
    order_store: RwLock<Option<Arc<dyn OrderStore>>>,
    sse: SseHub,
    degraded: watch::Sender<bool>,
    triggers: ExpiryTriggers,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            order_store: RwLock::new(None),
            sse: SseHub::new(SSE_CAPACITY),
            degraded: degraded_tx,
            triggers: ExpiryTriggers::new(),
            config,
        })
    }

    /// Obtain a handle to the current order store, if one is installed.
    pub async fn order_store(&self) -> Option<Arc<dyn OrderStore>> {
        let guard = self.order_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the order store or fail with a degraded-mode error.
    pub async fn require_order_store(&self) -> Result<Arc<dyn OrderStore>, ServiceError> {
        self.order_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new order store implementation and leave degraded mode.
    pub async fn set_order_store(&self, store: Arc<dyn OrderStore>) {
        {
            let mut guard = self.order_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current order store and enter degraded mode.
    pub async fn clear_order_store(&self) {
        {
            let mut guard = self.order_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.order_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Broadcast hub shared by the dashboard and public SSE streams.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Edge detection state for countdown expiry events.
    pub fn triggers(&self) -> &ExpiryTriggers {
        &self.triggers
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Update and broadcast the degraded flag when the value changes.
    async fn update_degraded(&self, value: bool) {
        if *self.degraded.borrow() == value {
            return;
        }

        let _ = self.degraded.send(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dao::order_store::memory::MemoryOrderStore};

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_degraded().await);
        assert!(state.require_order_store().await.is_err());

        state
            .set_order_store(Arc::new(MemoryOrderStore::new()))
            .await;
        assert!(!state.is_degraded().await);
        assert!(state.require_order_store().await.is_ok());
    }

    #[tokio::test]
    async fn degraded_transitions_are_broadcast() {
        let state = AppState::new(AppConfig::default());
        let mut watcher = state.degraded_watcher();
        assert!(*watcher.borrow_and_update());

        state
            .set_order_store(Arc::new(MemoryOrderStore::new()))
            .await;
        watcher.changed().await.unwrap();
        assert!(!*watcher.borrow_and_update());

        state.clear_order_store().await;
        watcher.changed().await.unwrap();
        assert!(*watcher.borrow_and_update());
    }
}

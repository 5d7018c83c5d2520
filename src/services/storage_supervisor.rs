use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{order_store::OrderStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Keep the shared state supplied with a healthy storage backend.
///
/// Connects with exponential backoff, then polls the installed store; when a
/// health check fails the store is asked to reconnect a few times before the
/// whole connection is abandoned and rebuilt from scratch. Degraded mode is
/// flipped so request handlers fail fast while storage is down.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn OrderStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.set_order_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                delay = INITIAL_DELAY;

                monitor(&state, &store).await;

                // The monitor only returns once reconnection is hopeless;
                // fall through to a fresh connection attempt.
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Poll the installed store until its reconnect attempts are exhausted.
///
/// On the first failed health check the store is removed from the shared
/// state, so request handlers fail fast while reconnection runs.
async fn monitor(state: &SharedState, store: &Arc<dyn OrderStore>) {
    loop {
        match store.health_check().await {
            Ok(()) => sleep(HEALTH_POLL_INTERVAL).await,
            Err(err) => {
                warn!(error = %err, "storage health check failed; entering degraded mode");
                state.clear_order_store().await;

                if try_reconnect_with_backoff(store).await {
                    state.set_order_store(store.clone()).await;
                    info!("storage reconnected; leaving degraded mode");
                    sleep(HEALTH_POLL_INTERVAL).await;
                } else {
                    warn!("exhausted storage reconnect attempts; rebuilding the connection");
                    return;
                }
            }
        }
    }
}

/// Retry `try_reconnect` a bounded number of times. Returns whether the store
/// is usable again.
async fn try_reconnect_with_backoff(store: &Arc<dyn OrderStore>) -> bool {
    let mut delay = INITIAL_DELAY;

    for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
        sleep(delay).await;
        match store.try_reconnect().await {
            Ok(()) => {
                info!("storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) => {
                warn!(attempt, error = %err, "storage reconnect attempt failed");
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }

    false
}

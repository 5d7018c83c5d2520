use std::{
    collections::HashSet,
    sync::Arc,
    time::{Duration, SystemTime},
};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{models::BuzzerStatus, order_store::OrderStore},
    services::{buzzer_service, sse_events},
    state::{SharedState, countdown},
};

/// Periodically turn elapsed countdowns into status changes.
///
/// Two sweeps per pass: active buzzers whose countdown reached zero become
/// `ready` (exactly once per ETA value, so adding time re-runs the
/// countdown), and `ready` buzzers older than the pickup grace period become
/// `expired`. Runs forever; storage outages skip the pass.
pub async fn run(state: SharedState) {
    let interval = state.config().sweep_interval;
    let pickup_grace = state.config().pickup_grace;

    loop {
        sleep(interval).await;

        let Some(store) = state.order_store().await else {
            continue;
        };

        sweep_pass(&state, &store, SystemTime::now(), pickup_grace).await;
    }
}

/// One pass over every open buzzer.
async fn sweep_pass(
    state: &SharedState,
    store: &Arc<dyn OrderStore>,
    now: SystemTime,
    pickup_grace: Duration,
) {
    match store.list_buzzers_by_status(BuzzerStatus::Active).await {
        Ok(active) => {
            let mut tracked = HashSet::with_capacity(active.len());
            for buzzer in active {
                tracked.insert(buzzer.id);

                let remaining = countdown::remaining_minutes(
                    now,
                    buzzer.started_at,
                    buzzer.eta,
                    buzzer.status,
                );
                if !state.triggers().should_fire(buzzer.id, buzzer.eta, remaining) {
                    continue;
                }

                let id = buzzer.id;
                match buzzer_service::apply_status(store, buzzer, BuzzerStatus::Ready).await {
                    Ok(updated) => {
                        info!(buzzer_id = %id, "countdown elapsed; buzzer marked ready");
                        sse_events::broadcast_status_changed(state, &updated, BuzzerStatus::Ready);
                    }
                    Err(err) => {
                        // Re-arm so the next pass retries the promotion.
                        warn!(buzzer_id = %id, error = %err, "failed to mark buzzer ready");
                        state.triggers().reset(id);
                    }
                }
            }

            state.triggers().retain_tracked(&tracked);
        }
        Err(err) => {
            warn!(error = %err, "expiry sweep could not list active buzzers");
            return;
        }
    }

    match store.list_buzzers_by_status(BuzzerStatus::Ready).await {
        Ok(ready) => {
            for buzzer in ready {
                let abandoned = buzzer
                    .ready_at
                    .and_then(|at| now.duration_since(at).ok())
                    .is_some_and(|waited| waited >= pickup_grace);
                if !abandoned {
                    continue;
                }

                let id = buzzer.id;
                match buzzer_service::apply_status(store, buzzer, BuzzerStatus::Expired).await {
                    Ok(updated) => {
                        info!(buzzer_id = %id, "pickup grace elapsed; buzzer expired");
                        sse_events::broadcast_status_changed(state, &updated, BuzzerStatus::Expired);
                    }
                    Err(err) => {
                        warn!(buzzer_id = %id, error = %err, "failed to expire buzzer");
                    }
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "expiry sweep could not list ready buzzers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::{
        config::AppConfig,
        dao::{models::BuzzerEntity, order_store::memory::MemoryOrderStore},
        state::AppState,
    };

    const GRACE: Duration = Duration::from_secs(60);

    fn buzzer_started_at(started_at: SystemTime, eta: u32) -> BuzzerEntity {
        let now = SystemTime::now();
        BuzzerEntity {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            public_token: Uuid::new_v4().simple().to_string(),
            ticket: None,
            customer_name: None,
            menu_item_ids: Vec::new(),
            eta,
            started_at,
            ready_at: None,
            picked_up_at: None,
            status: BuzzerStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    async fn harness() -> (SharedState, MemoryOrderStore, Arc<dyn OrderStore>) {
        let state = AppState::new(AppConfig::default());
        let store = MemoryOrderStore::new();
        let dyn_store: Arc<dyn OrderStore> = Arc::new(store.clone());
        state.set_order_store(dyn_store.clone()).await;
        (state, store, dyn_store)
    }

    #[tokio::test]
    async fn elapsed_countdown_promotes_to_ready_once() {
        let (state, store, dyn_store) = harness().await;

        let started = SystemTime::now() - Duration::from_secs(10 * 60);
        let buzzer = buzzer_started_at(started, 5);
        let id = buzzer.id;
        store.save_buzzer(buzzer).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        let after = store.buzzer(id).unwrap();
        assert_eq!(after.status, BuzzerStatus::Ready);
        assert!(after.ready_at.is_some());

        // A second pass leaves the buzzer alone.
        let stamped = after.ready_at;
        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().ready_at, stamped);
    }

    #[tokio::test]
    async fn running_countdown_is_left_alone() {
        let (state, store, dyn_store) = harness().await;

        let buzzer = buzzer_started_at(SystemTime::now(), 5);
        let id = buzzer.id;
        store.save_buzzer(buzzer).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Active);
    }

    #[tokio::test]
    async fn failed_promotion_is_retried_next_pass() {
        let (state, store, dyn_store) = harness().await;

        let started = SystemTime::now() - Duration::from_secs(10 * 60);
        let buzzer = buzzer_started_at(started, 5);
        let id = buzzer.id;
        store.save_buzzer(buzzer).await.unwrap();

        store.fail_buzzer_saves(true);
        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Active);

        store.fail_buzzer_saves(false);
        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Ready);
    }

    #[tokio::test]
    async fn added_time_rearms_the_promotion() {
        let (state, store, dyn_store) = harness().await;

        let started = SystemTime::now() - Duration::from_secs(10 * 60);
        let buzzer = buzzer_started_at(started, 5);
        let id = buzzer.id;
        store.save_buzzer(buzzer.clone()).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Ready);

        // Staff re-run the order with a bigger ETA that has also elapsed.
        let mut rerun = buzzer;
        rerun.eta = 8;
        store.save_buzzer(rerun).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Ready);
    }

    #[tokio::test]
    async fn abandoned_ready_buzzer_expires_after_grace() {
        let (state, store, dyn_store) = harness().await;

        let mut buzzer = buzzer_started_at(SystemTime::now(), 5);
        buzzer.status = BuzzerStatus::Ready;
        buzzer.ready_at = Some(SystemTime::now() - 2 * GRACE);
        let id = buzzer.id;
        store.save_buzzer(buzzer).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Expired);
    }

    #[tokio::test]
    async fn recently_ready_buzzer_survives_the_sweep() {
        let (state, store, dyn_store) = harness().await;

        let mut buzzer = buzzer_started_at(SystemTime::now(), 5);
        buzzer.status = BuzzerStatus::Ready;
        buzzer.ready_at = Some(SystemTime::now());
        let id = buzzer.id;
        store.save_buzzer(buzzer).await.unwrap();

        sweep_pass(&state, &dyn_store, SystemTime::now(), GRACE).await;
        assert_eq!(store.buzzer(id).unwrap().status, BuzzerStatus::Ready);
    }
}

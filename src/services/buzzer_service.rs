use std::{sync::Arc, time::SystemTime};

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{
        models::{BuzzerEntity, BuzzerStatus, UserEntity},
        order_store::OrderStore,
    },
    dto::buzzer::{
        AdjustTimeRequest, BuzzerSummary, CreateBuzzerRequest, CreateBuzzerResponse,
    },
    error::ServiceError,
    services::{auth_service::random_token, authz::ensure_staff, menu_service, sse_events},
    state::{SharedState, countdown},
};

/// Length of the public tracking tokens handed to customers.
const PUBLIC_TOKEN_LEN: usize = 26;

/// Minimum ETA a time adjustment can reach, in minutes.
const MIN_ETA_MINUTES: u32 = 1;

/// Start a new buzzer for an order.
///
/// The ETA comes from the summed estimated times of the selected menu items
/// when that sum is positive; otherwise from the explicit override, falling
/// back to the business default.
pub async fn create_buzzer(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    request: CreateBuzzerRequest,
) -> Result<CreateBuzzerResponse, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let business = store
        .find_business(business_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("business".into()))?;

    let items = menu_service::resolve_menu_items(&store, &request.menu_item_ids).await?;
    let item_sum: u32 = items.iter().map(|item| item.estimated_time).sum();
    let eta = if item_sum > 0 {
        item_sum
    } else {
        request.custom_eta.unwrap_or(business.default_eta)
    };

    let now = SystemTime::now();
    let buzzer = BuzzerEntity {
        id: Uuid::new_v4(),
        business_id,
        public_token: random_token(PUBLIC_TOKEN_LEN),
        ticket: request.ticket,
        customer_name: request.customer_name,
        menu_item_ids: items.iter().map(|item| item.id).collect(),
        eta,
        started_at: now,
        ready_at: None,
        picked_up_at: None,
        status: BuzzerStatus::Active,
        created_at: now,
        updated_at: now,
    };
    store.save_buzzer(buzzer.clone()).await?;

    info!(buzzer_id = %buzzer.id, business_id = %business_id, eta, "buzzer started");
    sse_events::broadcast_buzzer_created(state, &buzzer);

    Ok(CreateBuzzerResponse {
        buzzer_id: buzzer.id,
        public_token: buzzer.public_token,
    })
}

/// List a business's active and ready buzzers, newest first.
pub async fn list_open_buzzers(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
) -> Result<Vec<BuzzerSummary>, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let buzzers = store.list_open_buzzers(business_id).await?;

    let mut summaries = Vec::with_capacity(buzzers.len());
    for buzzer in buzzers {
        summaries.push(assemble_summary(&store, buzzer).await?);
    }
    Ok(summaries)
}

/// Add or remove time from a running buzzer.
///
/// The resulting ETA never drops below one minute. Changing the ETA re-arms
/// the expiry trigger, so an overdue buzzer given more time counts down again.
pub async fn adjust_time(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    buzzer_id: Uuid,
    request: AdjustTimeRequest,
) -> Result<BuzzerSummary, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let mut buzzer = load_scoped(&store, business_id, buzzer_id).await?;
    if buzzer.status != BuzzerStatus::Active {
        return Err(ServiceError::Conflict(
            "only running buzzers can be adjusted".into(),
        ));
    }

    let adjusted = i64::from(buzzer.eta) + i64::from(request.delta_minutes);
    buzzer.eta = adjusted.max(i64::from(MIN_ETA_MINUTES)) as u32;
    buzzer.updated_at = SystemTime::now();
    store.save_buzzer(buzzer.clone()).await?;

    sse_events::broadcast_time_adjusted(state, &buzzer);
    assemble_summary(&store, buzzer).await
}

/// Mark a buzzer ready for pickup.
pub async fn mark_ready(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    buzzer_id: Uuid,
) -> Result<BuzzerSummary, ServiceError> {
    transition(state, user, business_id, buzzer_id, BuzzerStatus::Ready).await
}

/// Record that the customer collected the order.
pub async fn mark_picked_up(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    buzzer_id: Uuid,
) -> Result<BuzzerSummary, ServiceError> {
    transition(state, user, business_id, buzzer_id, BuzzerStatus::PickedUp).await
}

/// Cancel a running buzzer.
pub async fn cancel(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    buzzer_id: Uuid,
) -> Result<BuzzerSummary, ServiceError> {
    transition(state, user, business_id, buzzer_id, BuzzerStatus::Canceled).await
}

/// Apply a lifecycle transition requested by staff.
async fn transition(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    buzzer_id: Uuid,
    target: BuzzerStatus,
) -> Result<BuzzerSummary, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let buzzer = load_scoped(&store, business_id, buzzer_id).await?;
    let buzzer = apply_status(&store, buzzer, target).await?;

    sse_events::broadcast_status_changed(state, &buzzer, target);
    assemble_summary(&store, buzzer).await
}

/// Move a buzzer to `target`, stamping the transition timestamps, and persist
/// it. Rejected with a conflict when the lifecycle does not allow the move.
pub(crate) async fn apply_status(
    store: &Arc<dyn OrderStore>,
    mut buzzer: BuzzerEntity,
    target: BuzzerStatus,
) -> Result<BuzzerEntity, ServiceError> {
    if !buzzer.status.can_transition(target) {
        return Err(ServiceError::Conflict(format!(
            "cannot move a {} buzzer to {}",
            buzzer.status.as_str(),
            target.as_str()
        )));
    }

    let now = SystemTime::now();
    match target {
        BuzzerStatus::Ready => buzzer.ready_at = Some(now),
        BuzzerStatus::PickedUp => buzzer.picked_up_at = Some(now),
        _ => {}
    }
    buzzer.status = target;
    buzzer.updated_at = now;

    store.save_buzzer(buzzer.clone()).await?;
    Ok(buzzer)
}

async fn load_scoped(
    store: &Arc<dyn OrderStore>,
    business_id: Uuid,
    buzzer_id: Uuid,
) -> Result<BuzzerEntity, ServiceError> {
    store
        .find_buzzer(buzzer_id)
        .await?
        .filter(|buzzer| buzzer.business_id == business_id)
        .ok_or_else(|| ServiceError::NotFound("buzzer".into()))
}

async fn assemble_summary(
    store: &Arc<dyn OrderStore>,
    buzzer: BuzzerEntity,
) -> Result<BuzzerSummary, ServiceError> {
    let items = menu_service::resolve_menu_items(store, &buzzer.menu_item_ids).await?;
    let view = countdown::project(
        SystemTime::now(),
        buzzer.started_at,
        buzzer.eta,
        buzzer.status,
        true,
    );
    Ok(BuzzerSummary::assemble(
        buzzer,
        items.into_iter().map(Into::into).collect(),
        view,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{BusinessEntity, MenuItemEntity, StaffEntity, StaffRole},
            order_store::memory::MemoryOrderStore,
        },
        state::AppState,
    };

    struct Fixture {
        state: SharedState,
        store: MemoryOrderStore,
        user: UserEntity,
        business_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let state = AppState::new(AppConfig::default());
        let store = MemoryOrderStore::new();
        state.set_order_store(Arc::new(store.clone())).await;

        let now = SystemTime::now();
        let user = UserEntity {
            id: Uuid::new_v4(),
            email: Some("staff@cafe.example".into()),
            password_hash: None,
            created_at: now,
        };
        let business = BusinessEntity {
            id: Uuid::new_v4(),
            owner_id: user.id,
            name: "Corner Cafe".into(),
            slug: "corner-cafe".into(),
            default_eta: 7,
            show_timers: true,
            created_at: now,
            updated_at: now,
        };
        let business_id = business.id;
        store.insert_business(business).await.unwrap();
        store
            .insert_staff(StaffEntity {
                id: Uuid::new_v4(),
                business_id,
                user_id: user.id,
                role: StaffRole::Owner,
                created_at: now,
            })
            .await
            .unwrap();

        Fixture {
            state,
            store,
            user,
            business_id,
        }
    }

    async fn add_menu_item(fx: &Fixture, name: &str, estimated_time: u32) -> Uuid {
        let now = SystemTime::now();
        let item = MenuItemEntity {
            id: Uuid::new_v4(),
            business_id: fx.business_id,
            name: name.into(),
            description: None,
            estimated_time,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let id = item.id;
        fx.store.save_menu_item(item).await.unwrap();
        id
    }

    fn empty_request() -> CreateBuzzerRequest {
        CreateBuzzerRequest {
            ticket: None,
            customer_name: None,
            menu_item_ids: Vec::new(),
            custom_eta: None,
        }
    }

    #[tokio::test]
    async fn create_uses_business_default_eta() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();

        let buzzer = fx.store.buzzer(response.buzzer_id).unwrap();
        assert_eq!(buzzer.eta, 7);
        assert_eq!(buzzer.status, BuzzerStatus::Active);
        assert_eq!(buzzer.public_token.len(), PUBLIC_TOKEN_LEN);
    }

    #[tokio::test]
    async fn create_prefers_custom_eta_over_default() {
        let fx = fixture().await;
        let response = create_buzzer(
            &fx.state,
            &fx.user,
            fx.business_id,
            CreateBuzzerRequest {
                custom_eta: Some(15),
                ..empty_request()
            },
        )
        .await
        .unwrap();

        assert_eq!(fx.store.buzzer(response.buzzer_id).unwrap().eta, 15);
    }

    #[tokio::test]
    async fn create_sums_menu_item_times_over_everything_else() {
        let fx = fixture().await;
        let espresso = add_menu_item(&fx, "Espresso", 4).await;
        let toastie = add_menu_item(&fx, "Toastie", 6).await;

        let response = create_buzzer(
            &fx.state,
            &fx.user,
            fx.business_id,
            CreateBuzzerRequest {
                menu_item_ids: vec![espresso, toastie],
                custom_eta: Some(15),
                ..empty_request()
            },
        )
        .await
        .unwrap();

        assert_eq!(fx.store.buzzer(response.buzzer_id).unwrap().eta, 10);
    }

    #[tokio::test]
    async fn create_skips_unknown_menu_items() {
        let fx = fixture().await;
        let espresso = add_menu_item(&fx, "Espresso", 4).await;

        let response = create_buzzer(
            &fx.state,
            &fx.user,
            fx.business_id,
            CreateBuzzerRequest {
                menu_item_ids: vec![espresso, Uuid::new_v4()],
                ..empty_request()
            },
        )
        .await
        .unwrap();

        let buzzer = fx.store.buzzer(response.buzzer_id).unwrap();
        assert_eq!(buzzer.eta, 4);
        assert_eq!(buzzer.menu_item_ids, vec![espresso]);
    }

    #[tokio::test]
    async fn non_staff_cannot_touch_buzzers() {
        let fx = fixture().await;
        let outsider = UserEntity {
            id: Uuid::new_v4(),
            email: Some("other@cafe.example".into()),
            password_hash: None,
            created_at: SystemTime::now(),
        };

        let err = create_buzzer(&fx.state, &outsider, fx.business_id, empty_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotAuthorized));

        let err = list_open_buzzers(&fx.state, &outsider, fx.business_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotAuthorized));
    }

    #[tokio::test]
    async fn adjust_clamps_eta_to_one_minute() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();

        let summary = adjust_time(
            &fx.state,
            &fx.user,
            fx.business_id,
            response.buzzer_id,
            AdjustTimeRequest { delta_minutes: -60 },
        )
        .await
        .unwrap();

        assert_eq!(summary.eta, MIN_ETA_MINUTES);
    }

    #[tokio::test]
    async fn adjust_rejects_settled_buzzers() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();
        mark_ready(&fx.state, &fx.user, fx.business_id, response.buzzer_id)
            .await
            .unwrap();

        let err = adjust_time(
            &fx.state,
            &fx.user,
            fx.business_id,
            response.buzzer_id,
            AdjustTimeRequest { delta_minutes: 5 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn nominal_lifecycle_stamps_timestamps() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();

        let ready = mark_ready(&fx.state, &fx.user, fx.business_id, response.buzzer_id)
            .await
            .unwrap();
        assert_eq!(ready.status, BuzzerStatus::Ready);
        assert!(ready.ready_at.is_some());

        let picked = mark_picked_up(&fx.state, &fx.user, fx.business_id, response.buzzer_id)
            .await
            .unwrap();
        assert_eq!(picked.status, BuzzerStatus::PickedUp);
        assert!(picked.picked_up_at.is_some());
    }

    #[tokio::test]
    async fn cancel_is_rejected_once_ready() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();
        mark_ready(&fx.state, &fx.user, fx.business_id, response.buzzer_id)
            .await
            .unwrap();

        let err = cancel(&fx.state, &fx.user, fx.business_id, response.buzzer_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn buzzers_are_scoped_to_their_business() {
        let fx = fixture().await;
        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();

        // Same user, staff record on a second business, wrong scope.
        let other_business = Uuid::new_v4();
        let now = SystemTime::now();
        fx.store
            .insert_business(BusinessEntity {
                id: other_business,
                owner_id: fx.user.id,
                name: "Second".into(),
                slug: "second".into(),
                default_eta: 5,
                show_timers: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        fx.store
            .insert_staff(StaffEntity {
                id: Uuid::new_v4(),
                business_id: other_business,
                user_id: fx.user.id,
                role: StaffRole::Staff,
                created_at: now,
            })
            .await
            .unwrap();

        let err = mark_ready(&fx.state, &fx.user, other_business, response.buzzer_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn lifecycle_events_reach_dashboard_subscribers() {
        let fx = fixture().await;
        let mut receiver = fx.state.sse().subscribe();

        let response = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.business_id, fx.business_id);
        assert_eq!(event.public_token, response.public_token);
        assert_eq!(event.event.event.as_deref(), Some("buzzer.created"));
    }

    #[tokio::test]
    async fn list_open_excludes_settled_buzzers() {
        let fx = fixture().await;
        let first = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();
        let second = create_buzzer(&fx.state, &fx.user, fx.business_id, empty_request())
            .await
            .unwrap();
        mark_ready(&fx.state, &fx.user, fx.business_id, first.buzzer_id)
            .await
            .unwrap();
        mark_picked_up(&fx.state, &fx.user, fx.business_id, first.buzzer_id)
            .await
            .unwrap();

        let open = list_open_buzzers(&fx.state, &fx.user, fx.business_id)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.buzzer_id);
    }
}

use std::time::SystemTime;

use tracing::warn;

use crate::{
    dto::public::{PublicBuzzerResponse, PublicMenuItem},
    error::ServiceError,
    services::menu_service,
    state::{SharedState, countdown},
};

/// Fetch the customer view of a buzzer by its public token.
///
/// No authentication is involved; the unguessable token is the capability.
/// Failures resolving the business or menu items degrade the view instead of
/// failing the request, since the countdown itself only needs the buzzer.
pub async fn get_buzzer_by_token(
    state: &SharedState,
    token: &str,
) -> Result<PublicBuzzerResponse, ServiceError> {
    let store = state.require_order_store().await?;

    let buzzer = store
        .find_buzzer_by_token(token.to_owned())
        .await?
        .ok_or_else(|| ServiceError::NotFound("buzzer".into()))?;

    let (business_name, show_timers) = match store.find_business(buzzer.business_id).await {
        Ok(Some(business)) => (Some(business.name), business.show_timers),
        Ok(None) => (None, true),
        Err(err) => {
            warn!(buzzer_id = %buzzer.id, error = %err, "business lookup failed for public view");
            (None, true)
        }
    };

    let menu_items: Vec<PublicMenuItem> =
        match menu_service::resolve_menu_items(&store, &buzzer.menu_item_ids).await {
            Ok(items) => items.into_iter().map(Into::into).collect(),
            Err(err) => {
                warn!(buzzer_id = %buzzer.id, error = %err, "menu lookup failed for public view");
                Vec::new()
            }
        };

    let view = countdown::project(
        SystemTime::now(),
        buzzer.started_at,
        buzzer.eta,
        buzzer.status,
        show_timers,
    );

    Ok(PublicBuzzerResponse::assemble(
        buzzer,
        menu_items,
        business_name,
        show_timers,
        view,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::{
        config::AppConfig,
        dao::{
            models::{BusinessEntity, BuzzerEntity, BuzzerStatus},
            order_store::{OrderStore, memory::MemoryOrderStore},
        },
        state::AppState,
    };

    async fn seeded_state(show_timers: bool) -> (SharedState, String) {
        let state = AppState::new(AppConfig::default());
        let store = MemoryOrderStore::new();
        state.set_order_store(Arc::new(store.clone())).await;

        let now = SystemTime::now();
        let business = BusinessEntity {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Corner Cafe".into(),
            slug: "corner-cafe".into(),
            default_eta: 5,
            show_timers,
            created_at: now,
            updated_at: now,
        };
        let buzzer = BuzzerEntity {
            id: Uuid::new_v4(),
            business_id: business.id,
            public_token: "tok-public".into(),
            ticket: Some("A17".into()),
            customer_name: None,
            menu_item_ids: Vec::new(),
            eta: 5,
            started_at: now,
            ready_at: None,
            picked_up_at: None,
            status: BuzzerStatus::Active,
            created_at: now,
            updated_at: now,
        };
        store.insert_business(business).await.unwrap();
        store.save_buzzer(buzzer).await.unwrap();

        (state, "tok-public".into())
    }

    #[tokio::test]
    async fn resolves_business_context() {
        let (state, token) = seeded_state(true).await;
        let response = get_buzzer_by_token(&state, &token).await.unwrap();
        assert_eq!(response.business_name.as_deref(), Some("Corner Cafe"));
        assert!(response.show_timers);
        assert_eq!(response.ticket.as_deref(), Some("A17"));
    }

    #[tokio::test]
    async fn hides_numbers_when_timers_are_off() {
        let (state, token) = seeded_state(false).await;
        let response = get_buzzer_by_token(&state, &token).await.unwrap();
        assert!(!response.show_timers);
        assert_eq!(response.countdown.display, "Preparing...");
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let (state, _token) = seeded_state(true).await;
        let err = get_buzzer_by_token(&state, "no-such-token")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

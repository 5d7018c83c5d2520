use std::{sync::Arc, time::SystemTime};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    dao::{
        models::{MenuItemEntity, UserEntity},
        order_store::OrderStore,
    },
    dto::menu::{CreateMenuItemRequest, MenuItemSummary, UpdateMenuItemRequest},
    error::ServiceError,
    services::authz::ensure_staff,
    state::SharedState,
};

/// Add a menu item to a business.
pub async fn create_menu_item(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    request: CreateMenuItemRequest,
) -> Result<MenuItemSummary, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let now = SystemTime::now();
    let item = MenuItemEntity {
        id: Uuid::new_v4(),
        business_id,
        name: request.name,
        description: request.description,
        estimated_time: request.estimated_time,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    store.save_menu_item(item.clone()).await?;
    Ok(item.into())
}

/// List a business's active menu items, oldest first.
pub async fn list_menu_items(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
) -> Result<Vec<MenuItemSummary>, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let items = store.list_active_menu_items(business_id).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Update a menu item; absent fields are left unchanged.
///
/// Deactivation (`is_active: false`) hides the item from listings while
/// keeping historical buzzer references resolvable.
pub async fn update_menu_item(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    item_id: Uuid,
    request: UpdateMenuItemRequest,
) -> Result<MenuItemSummary, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let mut item = store
        .find_menu_item(item_id)
        .await?
        .filter(|item| item.business_id == business_id)
        .ok_or_else(|| ServiceError::NotFound("menu item".into()))?;

    if let Some(name) = request.name {
        item.name = name;
    }
    if let Some(description) = request.description {
        item.description = Some(description);
    }
    if let Some(estimated_time) = request.estimated_time {
        item.estimated_time = estimated_time;
    }
    if let Some(is_active) = request.is_active {
        item.is_active = is_active;
    }
    item.updated_at = SystemTime::now();

    store.save_menu_item(item.clone()).await?;
    Ok(item.into())
}

/// Resolve a buzzer's menu item ids to entities, preserving selection order.
///
/// Unknown ids are silently skipped so deleted items never break a view.
pub async fn resolve_menu_items(
    store: &Arc<dyn OrderStore>,
    ids: &[Uuid],
) -> Result<Vec<MenuItemEntity>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let fetched = store.find_menu_items_by_ids(ids.to_vec()).await?;
    let by_id: IndexMap<Uuid, MenuItemEntity> =
        fetched.into_iter().map(|item| (item.id, item)).collect();

    Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
}

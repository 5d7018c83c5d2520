use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{patch, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::menu::{CreateMenuItemRequest, MenuItemSummary, UpdateMenuItemRequest},
    error::AppError,
    routes::auth::CurrentUser,
    services::menu_service,
    state::SharedState,
};

/// Routes handling a business's menu items.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/businesses/{id}/menu-items",
            post(create_menu_item).get(list_menu_items),
        )
        .route(
            "/businesses/{id}/menu-items/{item_id}",
            patch(update_menu_item),
        )
}

/// Add a menu item.
#[utoipa::path(
    post,
    path = "/businesses/{id}/menu-items",
    tag = "menu",
    params(("id" = Uuid, Path, description = "Owning business")),
    request_body = CreateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item created", body = MenuItemSummary),
        (status = 403, description = "Requester is not staff of this business")
    )
)]
pub async fn create_menu_item(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<CreateMenuItemRequest>>,
) -> Result<Json<MenuItemSummary>, AppError> {
    let summary = menu_service::create_menu_item(&state, &current.user, id, payload).await?;
    Ok(Json(summary))
}

/// List active menu items, oldest first.
#[utoipa::path(
    get,
    path = "/businesses/{id}/menu-items",
    tag = "menu",
    params(("id" = Uuid, Path, description = "Owning business")),
    responses(
        (status = 200, description = "Active menu items", body = [MenuItemSummary]),
        (status = 403, description = "Requester is not staff of this business")
    )
)]
pub async fn list_menu_items(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MenuItemSummary>>, AppError> {
    let items = menu_service::list_menu_items(&state, &current.user, id).await?;
    Ok(Json(items))
}

/// Update or deactivate a menu item.
#[utoipa::path(
    patch,
    path = "/businesses/{id}/menu-items/{item_id}",
    tag = "menu",
    params(
        ("id" = Uuid, Path, description = "Owning business"),
        ("item_id" = Uuid, Path, description = "Menu item to update")
    ),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemSummary),
        (status = 404, description = "No such item in this business")
    )
)]
pub async fn update_menu_item(
    State(state): State<SharedState>,
    current: CurrentUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Valid(Json(payload)): Valid<Json<UpdateMenuItemRequest>>,
) -> Result<Json<MenuItemSummary>, AppError> {
    let summary =
        menu_service::update_menu_item(&state, &current.user, id, item_id, payload).await?;
    Ok(Json(summary))
}

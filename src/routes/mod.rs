use axum::Router;

use crate::state::SharedState;

pub mod auth;
pub mod business;
pub mod buzzer;
pub mod debug;
pub mod docs;
pub mod health;
pub mod menu;
pub mod public;
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let mut api_router = health::router()
        .merge(auth::router())
        .merge(business::router())
        .merge(menu::router())
        .merge(buzzer::router())
        .merge(public::router())
        .merge(sse::router());

    if state.config().debug_routes {
        api_router = api_router.merge(debug::router());
    }

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

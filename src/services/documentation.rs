use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the buzzer backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::auth::sign_up,
        crate::routes::auth::sign_in,
        crate::routes::auth::sign_in_anonymous,
        crate::routes::auth::sign_out,
        crate::routes::auth::session,
        crate::routes::business::create_business,
        crate::routes::business::my_business,
        crate::routes::business::update_business,
        crate::routes::menu::create_menu_item,
        crate::routes::menu::list_menu_items,
        crate::routes::menu::update_menu_item,
        crate::routes::buzzer::create_buzzer,
        crate::routes::buzzer::list_open_buzzers,
        crate::routes::buzzer::adjust_time,
        crate::routes::buzzer::mark_ready,
        crate::routes::buzzer::mark_picked_up,
        crate::routes::buzzer::cancel,
        crate::routes::public::get_buzzer,
        crate::routes::public::resolve_slug,
        crate::routes::sse::dashboard_stream,
        crate::routes::sse::buzzer_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::auth::SignUpRequest,
            crate::dto::auth::SignInRequest,
            crate::dto::auth::UserSummary,
            crate::dto::auth::SessionResponse,
            crate::dto::business::CreateBusinessRequest,
            crate::dto::business::UpdateBusinessRequest,
            crate::dto::business::BusinessSummary,
            crate::dto::business::PublicBusinessSummary,
            crate::dto::menu::CreateMenuItemRequest,
            crate::dto::menu::UpdateMenuItemRequest,
            crate::dto::menu::MenuItemSummary,
            crate::dto::buzzer::CreateBuzzerRequest,
            crate::dto::buzzer::CreateBuzzerResponse,
            crate::dto::buzzer::AdjustTimeRequest,
            crate::dto::buzzer::CountdownDto,
            crate::dto::buzzer::BuzzerSummary,
            crate::dto::public::PublicMenuItem,
            crate::dto::public::PublicBuzzerResponse,
            crate::dto::sse::BuzzerCreatedEvent,
            crate::dto::sse::BuzzerTimeAdjustedEvent,
            crate::dto::sse::BuzzerStatusChangedEvent,
            crate::dto::sse::SystemDegradedEvent,
            crate::dao::models::BuzzerStatus,
            crate::dao::models::StaffRole,
            crate::state::countdown::ColorToken,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Accounts and sessions"),
        (name = "business", description = "Business registration and settings"),
        (name = "menu", description = "Menu item management"),
        (name = "buzzer", description = "Staff buzzer lifecycle"),
        (name = "public", description = "Unauthenticated customer endpoints"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;

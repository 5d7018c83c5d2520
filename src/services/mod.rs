/// Account and session management.
pub mod auth_service;
/// Staff membership checks shared by business-scoped services.
pub mod authz;
/// Business registration and settings.
pub mod business_service;
/// Buzzer lifecycle operations.
pub mod buzzer_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Background task turning elapsed countdowns into status changes.
pub mod expiry_sweeper;
/// Health check service.
pub mod health_service;
/// Menu item management.
pub mod menu_service;
/// Public, token-gated order tracking.
pub mod public_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Storage connection supervision and degraded mode.
pub mod storage_supervisor;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::BusinessEntity;
use crate::dto::{format_system_time, validation::validate_slug};

/// Payload used to register a new business.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBusinessRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Business name must be 1-100 characters"))]
    pub name: String,
    /// URL-safe identifier; derived from the name when omitted.
    #[serde(default)]
    #[validate(custom(function = validate_slug))]
    pub slug: Option<String>,
    /// Default wait time in minutes applied to new buzzers.
    #[validate(range(min = 1, max = 480, message = "Default ETA must be 1-480 minutes"))]
    pub default_eta: u32,
}

/// Partial update of business settings; absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBusinessRequest {
    /// New display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Business name must be 1-100 characters"))]
    pub name: Option<String>,
    /// New slug.
    #[serde(default)]
    #[validate(custom(function = validate_slug))]
    pub slug: Option<String>,
    /// New default wait time in minutes.
    #[serde(default)]
    #[validate(range(min = 1, max = 480, message = "Default ETA must be 1-480 minutes"))]
    pub default_eta: Option<u32>,
    /// Whether customers see a live countdown.
    #[serde(default)]
    pub show_timers: Option<bool>,
}

/// Staff-facing projection of a business.
#[derive(Debug, Serialize, ToSchema)]
pub struct BusinessSummary {
    /// Stable identifier for the business.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe unique identifier.
    pub slug: String,
    /// Default wait time in minutes.
    pub default_eta: u32,
    /// Whether customers see a live countdown.
    pub show_timers: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<BusinessEntity> for BusinessSummary {
    fn from(business: BusinessEntity) -> Self {
        Self {
            id: business.id,
            name: business.name,
            slug: business.slug,
            default_eta: business.default_eta,
            show_timers: business.show_timers,
            created_at: format_system_time(business.created_at),
            updated_at: format_system_time(business.updated_at),
        }
    }
}

/// Customer-facing projection returned when resolving a slug; exposes only
/// what the public order page needs.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicBusinessSummary {
    /// Display name.
    pub name: String,
    /// Whether customers see a live countdown.
    pub show_timers: bool,
}

impl From<BusinessEntity> for PublicBusinessSummary {
    fn from(business: BusinessEntity) -> Self {
        Self {
            name: business.name,
            show_timers: business.show_timers,
        }
    }
}

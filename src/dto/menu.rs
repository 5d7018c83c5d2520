use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::MenuItemEntity;
use crate::dto::format_system_time;

/// Payload used to add a menu item to a business.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMenuItemRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub name: String,
    /// Optional description shown to customers.
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated preparation time in minutes.
    #[validate(range(min = 1, max = 480, message = "Estimated time must be 1-480 minutes"))]
    pub estimated_time: u32,
}

/// Partial update of a menu item; absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateMenuItemRequest {
    /// New display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New estimated preparation time in minutes.
    #[serde(default)]
    #[validate(range(min = 1, max = 480, message = "Estimated time must be 1-480 minutes"))]
    pub estimated_time: Option<u32>,
    /// Activate or deactivate the item.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Staff-facing projection of a menu item.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuItemSummary {
    /// Stable identifier for the item.
    pub id: Uuid,
    /// Owning business.
    pub business_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Estimated preparation time in minutes.
    pub estimated_time: u32,
    /// Whether the item is currently offered.
    pub is_active: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<MenuItemEntity> for MenuItemSummary {
    fn from(item: MenuItemEntity) -> Self {
        Self {
            id: item.id,
            business_id: item.business_id,
            name: item.name,
            description: item.description,
            estimated_time: item.estimated_time,
            is_active: item.is_active,
            created_at: format_system_time(item.created_at),
            updated_at: format_system_time(item.updated_at),
        }
    }
}

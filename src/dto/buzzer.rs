use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{BuzzerEntity, BuzzerStatus};
use crate::dto::{format_system_time, menu::MenuItemSummary};
use crate::state::countdown::{ColorToken, CountdownView};

/// Payload used by staff to start a new buzzer.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBuzzerRequest {
    /// Optional ticket label printed on the receipt.
    #[serde(default)]
    #[validate(length(max = 40, message = "Ticket label must be at most 40 characters"))]
    pub ticket: Option<String>,
    /// Optional customer name.
    #[serde(default)]
    #[validate(length(max = 100, message = "Customer name must be at most 100 characters"))]
    pub customer_name: Option<String>,
    /// Menu items included in the order; their estimated times override the
    /// business default ETA when the sum is positive.
    #[serde(default)]
    pub menu_item_ids: Vec<Uuid>,
    /// Explicit ETA in minutes, overriding the business default.
    #[serde(default)]
    #[validate(range(min = 1, max = 480, message = "ETA must be 1-480 minutes"))]
    pub custom_eta: Option<u32>,
}

/// Returned once a buzzer has been created.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBuzzerResponse {
    /// Identifier of the new buzzer.
    pub buzzer_id: Uuid,
    /// Token granting unauthenticated customer access.
    pub public_token: String,
}

/// Payload used to add or remove time from a running buzzer.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AdjustTimeRequest {
    /// Signed adjustment in minutes; the resulting ETA is clamped to at
    /// least 1 minute.
    #[validate(range(min = -480, max = 480, message = "Adjustment must be within ±480 minutes"))]
    pub delta_minutes: i32,
}

/// Countdown state derived server-side for display purposes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountdownDto {
    /// Whole seconds remaining; 0 whenever the buzzer is not active.
    pub remaining_seconds: u64,
    /// Progress of the visual indicator, within `[0, 100]`.
    pub progress_percent: f64,
    /// True exactly when an active countdown has reached zero.
    pub overdue: bool,
    /// Text shown in the center of the indicator.
    pub display: String,
    /// Indicator color token.
    pub color: ColorToken,
}

impl From<CountdownView> for CountdownDto {
    fn from(view: CountdownView) -> Self {
        Self {
            remaining_seconds: (view.remaining_minutes * 60.0).floor() as u64,
            progress_percent: view.progress_percent,
            overdue: view.overdue,
            display: view.display,
            color: view.color,
        }
    }
}

/// Staff-facing projection of a buzzer with its menu items resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct BuzzerSummary {
    /// Stable identifier for the buzzer.
    pub id: Uuid,
    /// Owning business.
    pub business_id: Uuid,
    /// Token granting unauthenticated customer access.
    pub public_token: String,
    /// Optional ticket label.
    pub ticket: Option<String>,
    /// Optional customer name.
    pub customer_name: Option<String>,
    /// Menu items attached to the order, in selection order.
    pub menu_items: Vec<MenuItemSummary>,
    /// Estimated time-to-ready in minutes.
    pub eta: u32,
    /// Current lifecycle status.
    pub status: BuzzerStatus,
    /// Instant the countdown started (RFC 3339).
    pub started_at: String,
    /// Set once the order became ready (RFC 3339).
    pub ready_at: Option<String>,
    /// Set once the order was collected (RFC 3339).
    pub picked_up_at: Option<String>,
    /// Countdown derived at response time; staff always see numbers.
    pub countdown: CountdownDto,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl BuzzerSummary {
    /// Assemble the summary from the stored entity, its resolved menu items,
    /// and a countdown view computed by the caller.
    pub fn assemble(
        buzzer: BuzzerEntity,
        menu_items: Vec<MenuItemSummary>,
        countdown: CountdownView,
    ) -> Self {
        Self {
            id: buzzer.id,
            business_id: buzzer.business_id,
            public_token: buzzer.public_token,
            ticket: buzzer.ticket,
            customer_name: buzzer.customer_name,
            menu_items,
            eta: buzzer.eta,
            status: buzzer.status,
            started_at: format_system_time(buzzer.started_at),
            ready_at: buzzer.ready_at.map(format_system_time),
            picked_up_at: buzzer.picked_up_at.map(format_system_time),
            countdown: countdown.into(),
            created_at: format_system_time(buzzer.created_at),
            updated_at: format_system_time(buzzer.updated_at),
        }
    }
}

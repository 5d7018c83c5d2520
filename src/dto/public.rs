use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::{BuzzerEntity, BuzzerStatus, MenuItemEntity};
use crate::dto::{buzzer::CountdownDto, format_system_time};
use crate::state::countdown::CountdownView;

/// Menu item fields exposed on the public order page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicMenuItem {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Estimated preparation time in minutes.
    pub estimated_time: u32,
}

impl From<MenuItemEntity> for PublicMenuItem {
    fn from(item: MenuItemEntity) -> Self {
        Self {
            name: item.name,
            description: item.description,
            estimated_time: item.estimated_time,
        }
    }
}

/// Denormalized customer view of one buzzer, fetched by public token.
///
/// The numeric countdown inside is gated by the owning business's
/// show-timers setting; the business name and menu items degrade gracefully
/// when their lookups fail.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicBuzzerResponse {
    /// Optional ticket label.
    pub ticket: Option<String>,
    /// Optional customer name.
    pub customer_name: Option<String>,
    /// Ordered items, empty when resolution failed.
    pub menu_items: Vec<PublicMenuItem>,
    /// Estimated time-to-ready in minutes.
    pub eta: u32,
    /// Current lifecycle status.
    pub status: BuzzerStatus,
    /// Instant the countdown started (RFC 3339).
    pub started_at: String,
    /// Set once the order became ready (RFC 3339).
    pub ready_at: Option<String>,
    /// Owning business name, when its lookup succeeded.
    pub business_name: Option<String>,
    /// Whether the numeric countdown is revealed to the customer.
    pub show_timers: bool,
    /// Countdown derived at response time.
    pub countdown: CountdownDto,
}

impl PublicBuzzerResponse {
    /// Assemble the public view from the stored entity and its resolved
    /// context.
    pub fn assemble(
        buzzer: BuzzerEntity,
        menu_items: Vec<PublicMenuItem>,
        business_name: Option<String>,
        show_timers: bool,
        countdown: CountdownView,
    ) -> Self {
        Self {
            ticket: buzzer.ticket,
            customer_name: buzzer.customer_name,
            menu_items,
            eta: buzzer.eta,
            status: buzzer.status,
            started_at: format_system_time(buzzer.started_at),
            ready_at: buzzer.ready_at.map(format_system_time),
            business_name,
            show_timers,
            countdown: countdown.into(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account able to open a staff session. Anonymous users carry no email or
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Sign-in email, absent for anonymous users.
    pub email: Option<String>,
    /// Argon2 password hash, absent for anonymous users.
    pub password_hash: Option<String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

impl UserEntity {
    /// Whether this account was created through anonymous sign-in.
    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}

/// Bearer session granting a user access until it expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEntity {
    /// Opaque bearer token presented by clients.
    pub token: String,
    /// Owner of the session.
    pub user_id: Uuid,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Instant after which the session is rejected.
    pub expires_at: SystemTime,
}

/// Role attached to a staff record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Business creator, added automatically at business creation.
    Owner,
    /// Regular staff member.
    Staff,
}

/// Authorization join between a user and a business. Possession of a staff
/// record is the sole gate for business-scoped operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffEntity {
    /// Stable identifier for the record.
    pub id: Uuid,
    /// Business the user belongs to.
    pub business_id: Uuid,
    /// User granted access.
    pub user_id: Uuid,
    /// Role within the business.
    pub role: StaffRole,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// A cafe registered in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessEntity {
    /// Stable identifier for the business.
    pub id: Uuid,
    /// User who created the business.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe unique identifier derived from the name.
    pub slug: String,
    /// Default wait time in minutes applied to new buzzers.
    pub default_eta: u32,
    /// Whether customers see a live countdown or only a coarse status word.
    pub show_timers: bool,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last update timestamp.
    pub updated_at: SystemTime,
}

/// Orderable item with an estimated preparation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItemEntity {
    /// Stable identifier for the item.
    pub id: Uuid,
    /// Owning business.
    pub business_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description shown to customers.
    pub description: Option<String>,
    /// Estimated preparation time in minutes.
    pub estimated_time: u32,
    /// Inactive items are hidden from listings but keep historical references.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last update timestamp.
    pub updated_at: SystemTime,
}

/// Lifecycle status of a buzzer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BuzzerStatus {
    /// Order in preparation, countdown running.
    Active,
    /// Order ready for pickup.
    Ready,
    /// Order collected by the customer.
    PickedUp,
    /// Order canceled by staff.
    Canceled,
    /// Order abandoned; set by the expiry sweeper.
    Expired,
}

impl BuzzerStatus {
    /// Stable snake_case form, used in storage filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuzzerStatus::Active => "active",
            BuzzerStatus::Ready => "ready",
            BuzzerStatus::PickedUp => "picked_up",
            BuzzerStatus::Canceled => "canceled",
            BuzzerStatus::Expired => "expired",
        }
    }

    /// Whether the lifecycle permits moving from `self` to `to`.
    ///
    /// `active → ready → picked_up` is the nominal path; `canceled` is a
    /// terminal alternative from `active`, and the sweeper may expire both
    /// `active` and `ready` buzzers.
    pub fn can_transition(&self, to: BuzzerStatus) -> bool {
        matches!(
            (self, to),
            (BuzzerStatus::Active, BuzzerStatus::Ready)
                | (BuzzerStatus::Active, BuzzerStatus::Canceled)
                | (BuzzerStatus::Active, BuzzerStatus::Expired)
                | (BuzzerStatus::Ready, BuzzerStatus::PickedUp)
                | (BuzzerStatus::Ready, BuzzerStatus::Expired)
        )
    }
}

/// A single customer order-tracking record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuzzerEntity {
    /// Stable identifier for the buzzer.
    pub id: Uuid,
    /// Owning business.
    pub business_id: Uuid,
    /// Unguessable token granting unauthenticated read access.
    pub public_token: String,
    /// Optional ticket label printed on the receipt.
    pub ticket: Option<String>,
    /// Optional customer name.
    pub customer_name: Option<String>,
    /// Menu items attached to the order.
    pub menu_item_ids: Vec<Uuid>,
    /// Estimated time-to-ready in minutes.
    pub eta: u32,
    /// Instant the countdown started.
    pub started_at: SystemTime,
    /// Set only on transition into `ready`.
    pub ready_at: Option<SystemTime>,
    /// Set only on transition into `picked_up`.
    pub picked_up_at: Option<SystemTime>,
    /// Current lifecycle status.
    pub status: BuzzerStatus,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last update timestamp.
    pub updated_at: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_lifecycle_is_allowed() {
        assert!(BuzzerStatus::Active.can_transition(BuzzerStatus::Ready));
        assert!(BuzzerStatus::Ready.can_transition(BuzzerStatus::PickedUp));
    }

    #[test]
    fn terminal_alternatives_from_active() {
        assert!(BuzzerStatus::Active.can_transition(BuzzerStatus::Canceled));
        assert!(BuzzerStatus::Active.can_transition(BuzzerStatus::Expired));
    }

    #[test]
    fn sweeper_can_expire_ready_orders() {
        assert!(BuzzerStatus::Ready.can_transition(BuzzerStatus::Expired));
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [
            BuzzerStatus::PickedUp,
            BuzzerStatus::Canceled,
            BuzzerStatus::Expired,
        ] {
            for target in [
                BuzzerStatus::Active,
                BuzzerStatus::Ready,
                BuzzerStatus::PickedUp,
                BuzzerStatus::Canceled,
                BuzzerStatus::Expired,
            ] {
                assert!(!terminal.can_transition(target), "{terminal:?} -> {target:?}");
            }
        }
    }

    #[test]
    fn no_backwards_or_skipping_transitions() {
        assert!(!BuzzerStatus::Active.can_transition(BuzzerStatus::PickedUp));
        assert!(!BuzzerStatus::Ready.can_transition(BuzzerStatus::Active));
        assert!(!BuzzerStatus::Ready.can_transition(BuzzerStatus::Canceled));
    }
}

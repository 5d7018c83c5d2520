//! Abstraction over the persistence layer for cafe, menu, buzzer, and
//! session data.

#[cfg(test)]
pub mod memory;
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{
    BusinessEntity, BuzzerEntity, BuzzerStatus, MenuItemEntity, SessionEntity, StaffEntity,
    UserEntity,
};
use crate::dao::storage::StorageResult;

/// Storage operations required by the service layer.
///
/// Each method is a single filtered query or mutation; multi-step flows
/// (e.g. business creation plus the owner staff record) are composed in the
/// service layer, which also owns compensation on partial failure.
pub trait OrderStore: Send + Sync {
    /// Insert a new user; fails with a conflict when the email is taken.
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a user by id.
    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// Look up a user by sign-in email.
    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;

    /// Persist a new session.
    fn insert_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a session by bearer token.
    fn find_session(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>>;
    /// Remove a session; missing tokens are not an error.
    fn delete_session(&self, token: String) -> BoxFuture<'static, StorageResult<()>>;

    /// Insert a new business; fails with a conflict when the slug is taken.
    fn insert_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Replace an existing business; slug uniqueness still applies.
    fn save_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete a business row, reporting whether it existed.
    fn delete_business(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Look up a business by id.
    fn find_business(&self, id: Uuid)
    -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>>;
    /// Look up a business by slug.
    fn find_business_by_slug(
        &self,
        slug: String,
    ) -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>>;

    /// Insert a staff record; fails with a conflict when the pair exists.
    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up the staff record linking a user to a business.
    fn find_staff(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>>;
    /// Look up any staff record for a user (a user belongs to one business).
    fn find_staff_for_user(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>>;

    /// Insert or replace a menu item.
    fn save_menu_item(&self, item: MenuItemEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a menu item by id.
    fn find_menu_item(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MenuItemEntity>>>;
    /// List a business's active menu items, oldest first.
    fn list_active_menu_items(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>>;
    /// Resolve menu items by id list; unknown ids are silently skipped.
    fn find_menu_items_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>>;

    /// Insert or replace a buzzer.
    fn save_buzzer(&self, buzzer: BuzzerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a buzzer by id.
    fn find_buzzer(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>>;
    /// Look up a buzzer by its public token.
    fn find_buzzer_by_token(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>>;
    /// List a business's active and ready buzzers, newest first.
    fn list_open_buzzers(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>>;
    /// List buzzers across all businesses in the given status.
    fn list_buzzers_by_status(
        &self,
        status: BuzzerStatus,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>>;
    /// Delete every buzzer of a business, returning the removed count.
    /// Used only by the operator debug surface.
    fn delete_buzzers_for_business(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<u64>>;

    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    dao::{models::StaffEntity, order_store::OrderStore},
    error::ServiceError,
};

/// Require a staff record linking `user_id` to `business_id`.
///
/// Possession of a staff record is the sole authorization gate for
/// business-scoped operations; the role field does not grant extra rights.
pub async fn ensure_staff(
    store: &Arc<dyn OrderStore>,
    user_id: Uuid,
    business_id: Uuid,
) -> Result<StaffEntity, ServiceError> {
    store
        .find_staff(user_id, business_id)
        .await?
        .ok_or(ServiceError::NotAuthorized)
}

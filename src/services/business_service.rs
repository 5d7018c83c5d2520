use std::time::SystemTime;

use tracing::{error, info};
use uuid::Uuid;

use crate::{
    dao::models::{BusinessEntity, StaffEntity, StaffRole, UserEntity},
    dto::{
        business::{
            BusinessSummary, CreateBusinessRequest, PublicBusinessSummary, UpdateBusinessRequest,
        },
        validation::{SLUG_MIN_LEN, slugify},
    },
    error::ServiceError,
    services::authz::ensure_staff,
    state::SharedState,
};

/// Register a new business and make the creator its owner.
///
/// The business row and the owner staff record are two separate writes; when
/// the second one fails the first is rolled back so no orphaned business
/// survives.
pub async fn create_business(
    state: &SharedState,
    user: &UserEntity,
    request: CreateBusinessRequest,
) -> Result<BusinessSummary, ServiceError> {
    let store = state.require_order_store().await?;

    if store.find_staff_for_user(user.id).await?.is_some() {
        return Err(ServiceError::Conflict(
            "you already belong to a business".into(),
        ));
    }

    let slug = match request.slug {
        Some(slug) => slug,
        None => derive_slug(&request.name),
    };

    let now = SystemTime::now();
    let business = BusinessEntity {
        id: Uuid::new_v4(),
        owner_id: user.id,
        name: request.name,
        slug,
        default_eta: request.default_eta,
        show_timers: true,
        created_at: now,
        updated_at: now,
    };
    store.insert_business(business.clone()).await?;

    let staff = StaffEntity {
        id: Uuid::new_v4(),
        business_id: business.id,
        user_id: user.id,
        role: StaffRole::Owner,
        created_at: now,
    };
    if let Err(err) = store.insert_staff(staff).await {
        // Roll back the business so the slug is freed and no unreachable
        // business survives.
        if let Err(rollback_err) = store.delete_business(business.id).await {
            error!(
                business_id = %business.id,
                error = %rollback_err,
                "failed to roll back business after staff insert failure"
            );
        }
        return Err(err.into());
    }

    info!(business_id = %business.id, slug = %business.slug, "business registered");
    Ok(business.into())
}

/// The business the user belongs to, when any.
pub async fn my_business(
    state: &SharedState,
    user: &UserEntity,
) -> Result<Option<BusinessSummary>, ServiceError> {
    let store = state.require_order_store().await?;

    let Some(staff) = store.find_staff_for_user(user.id).await? else {
        return Ok(None);
    };

    let business = store
        .find_business(staff.business_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("business".into()))?;

    Ok(Some(business.into()))
}

/// Update business settings; absent fields are left unchanged.
pub async fn update_business(
    state: &SharedState,
    user: &UserEntity,
    business_id: Uuid,
    request: UpdateBusinessRequest,
) -> Result<BusinessSummary, ServiceError> {
    let store = state.require_order_store().await?;
    ensure_staff(&store, user.id, business_id).await?;

    let mut business = store
        .find_business(business_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("business".into()))?;

    if let Some(name) = request.name {
        business.name = name;
    }
    if let Some(slug) = request.slug {
        business.slug = slug;
    }
    if let Some(default_eta) = request.default_eta {
        business.default_eta = default_eta;
    }
    if let Some(show_timers) = request.show_timers {
        business.show_timers = show_timers;
    }
    business.updated_at = SystemTime::now();

    store.save_business(business.clone()).await?;
    Ok(business.into())
}

/// Resolve a slug to the public projection of its business.
pub async fn resolve_slug(
    state: &SharedState,
    slug: &str,
) -> Result<PublicBusinessSummary, ServiceError> {
    let store = state.require_order_store().await?;

    let business = store
        .find_business_by_slug(slug.to_owned())
        .await?
        .ok_or_else(|| ServiceError::NotFound("business".into()))?;

    Ok(business.into())
}

/// Derive a slug from the display name, padding names that reduce to
/// something too short to be routable.
fn derive_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.len() >= SLUG_MIN_LEN {
        return slug;
    }

    let suffix = Uuid::new_v4().simple().to_string();
    if slug.is_empty() {
        format!("cafe-{}", &suffix[..8])
    } else {
        format!("{}-{}", slug, &suffix[..8])
    }
}

use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    BusinessEntity, BuzzerEntity, BuzzerStatus, MenuItemEntity, SessionEntity, StaffEntity,
    StaffRole, UserEntity,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoUserDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    email: Option<String>,
    password_hash: Option<String>,
    created_at: DateTime,
}

impl From<UserEntity> for MongoUserDocument {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            email: value.email,
            password_hash: value.password_hash,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoUserDocument> for UserEntity {
    fn from(value: MongoUserDocument) -> Self {
        Self {
            id: value.id,
            email: value.email,
            password_hash: value.password_hash,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Session document keyed by the bearer token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSessionDocument {
    #[serde(rename = "_id")]
    token: String,
    user_id: Uuid,
    created_at: DateTime,
    expires_at: DateTime,
}

impl From<SessionEntity> for MongoSessionDocument {
    fn from(value: SessionEntity) -> Self {
        Self {
            token: value.token,
            user_id: value.user_id,
            created_at: DateTime::from_system_time(value.created_at),
            expires_at: DateTime::from_system_time(value.expires_at),
        }
    }
}

impl From<MongoSessionDocument> for SessionEntity {
    fn from(value: MongoSessionDocument) -> Self {
        Self {
            token: value.token,
            user_id: value.user_id,
            created_at: value.created_at.to_system_time(),
            expires_at: value.expires_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoBusinessDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    owner_id: Uuid,
    name: String,
    slug: String,
    default_eta: u32,
    show_timers: bool,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<BusinessEntity> for MongoBusinessDocument {
    fn from(value: BusinessEntity) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            name: value.name,
            slug: value.slug,
            default_eta: value.default_eta,
            show_timers: value.show_timers,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoBusinessDocument> for BusinessEntity {
    fn from(value: MongoBusinessDocument) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            name: value.name,
            slug: value.slug,
            default_eta: value.default_eta,
            show_timers: value.show_timers,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStaffDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    role: StaffRole,
    created_at: DateTime,
}

impl From<StaffEntity> for MongoStaffDocument {
    fn from(value: StaffEntity) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            user_id: value.user_id,
            role: value.role,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoStaffDocument> for StaffEntity {
    fn from(value: MongoStaffDocument) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            user_id: value.user_id,
            role: value.role,
            created_at: value.created_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMenuItemDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    business_id: Uuid,
    name: String,
    description: Option<String>,
    estimated_time: u32,
    is_active: bool,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<MenuItemEntity> for MongoMenuItemDocument {
    fn from(value: MenuItemEntity) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            name: value.name,
            description: value.description,
            estimated_time: value.estimated_time,
            is_active: value.is_active,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoMenuItemDocument> for MenuItemEntity {
    fn from(value: MongoMenuItemDocument) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            name: value.name,
            description: value.description,
            estimated_time: value.estimated_time,
            is_active: value.is_active,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoBuzzerDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    business_id: Uuid,
    public_token: String,
    ticket: Option<String>,
    customer_name: Option<String>,
    menu_item_ids: Vec<Uuid>,
    eta: u32,
    started_at: DateTime,
    ready_at: Option<DateTime>,
    picked_up_at: Option<DateTime>,
    status: BuzzerStatus,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<BuzzerEntity> for MongoBuzzerDocument {
    fn from(value: BuzzerEntity) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            public_token: value.public_token,
            ticket: value.ticket,
            customer_name: value.customer_name,
            menu_item_ids: value.menu_item_ids,
            eta: value.eta,
            started_at: DateTime::from_system_time(value.started_at),
            ready_at: value.ready_at.map(DateTime::from_system_time),
            picked_up_at: value.picked_up_at.map(DateTime::from_system_time),
            status: value.status,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoBuzzerDocument> for BuzzerEntity {
    fn from(value: MongoBuzzerDocument) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            public_token: value.public_token,
            ticket: value.ticket,
            customer_name: value.customer_name,
            menu_item_ids: value.menu_item_ids,
            eta: value.eta,
            started_at: value.started_at.to_system_time(),
            ready_at: value.ready_at.map(|at| at.to_system_time()),
            picked_up_at: value.picked_up_at.map(|at| at.to_system_time()),
            status: value.status,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

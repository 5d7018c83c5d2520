use std::sync::Arc;
use std::time::Duration;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Bson, doc},
    options::IndexOptions,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoBusinessDocument, MongoBuzzerDocument, MongoMenuItemDocument, MongoSessionDocument,
        MongoStaffDocument, MongoUserDocument, doc_id, uuid_as_binary,
    },
};
use crate::dao::{
    models::{
        BusinessEntity, BuzzerEntity, BuzzerStatus, MenuItemEntity, SessionEntity, StaffEntity,
        UserEntity,
    },
    order_store::OrderStore,
    storage::StorageResult,
};

const USER_COLLECTION_NAME: &str = "users";
const SESSION_COLLECTION_NAME: &str = "sessions";
const BUSINESS_COLLECTION_NAME: &str = "businesses";
const STAFF_COLLECTION_NAME: &str = "staff";
const MENU_ITEM_COLLECTION_NAME: &str = "menu_items";
const BUZZER_COLLECTION_NAME: &str = "buzzers";

/// MongoDB-backed [`OrderStore`] sharing one client across clones.
#[derive(Clone)]
pub struct MongoOrderStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

fn status_bson(status: BuzzerStatus) -> Bson {
    Bson::String(status.as_str().to_owned())
}

impl MongoOrderStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // Unique sign-in email, ignoring anonymous users without one.
        let user_index = IndexModel::builder()
            .keys(doc! {"email": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("user_email_idx".to_owned()))
                    .unique(Some(true))
                    .partial_filter_expression(Some(doc! {"email": {"$type": "string"}}))
                    .build(),
            )
            .build();
        database
            .collection::<MongoUserDocument>(USER_COLLECTION_NAME)
            .create_index(user_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: USER_COLLECTION_NAME,
                index: "email",
                source,
            })?;

        // Sessions expire server-side once past their deadline.
        let session_index = IndexModel::builder()
            .keys(doc! {"expires_at": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("session_ttl_idx".to_owned()))
                    .expire_after(Some(Duration::ZERO))
                    .build(),
            )
            .build();
        database
            .collection::<MongoSessionDocument>(SESSION_COLLECTION_NAME)
            .create_index(session_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SESSION_COLLECTION_NAME,
                index: "expires_at",
                source,
            })?;

        let slug_index = IndexModel::builder()
            .keys(doc! {"slug": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("business_slug_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        database
            .collection::<MongoBusinessDocument>(BUSINESS_COLLECTION_NAME)
            .create_index(slug_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: BUSINESS_COLLECTION_NAME,
                index: "slug",
                source,
            })?;

        let staff_index = IndexModel::builder()
            .keys(doc! {"user_id": 1, "business_id": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("staff_membership_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        database
            .collection::<MongoStaffDocument>(STAFF_COLLECTION_NAME)
            .create_index(staff_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: STAFF_COLLECTION_NAME,
                index: "user_id,business_id",
                source,
            })?;

        let menu_index = IndexModel::builder()
            .keys(doc! {"business_id": 1, "is_active": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("menu_business_idx".to_owned()))
                    .build(),
            )
            .build();
        database
            .collection::<MongoMenuItemDocument>(MENU_ITEM_COLLECTION_NAME)
            .create_index(menu_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MENU_ITEM_COLLECTION_NAME,
                index: "business_id,is_active",
                source,
            })?;

        let buzzer_collection =
            database.collection::<MongoBuzzerDocument>(BUZZER_COLLECTION_NAME);
        let token_index = IndexModel::builder()
            .keys(doc! {"public_token": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("buzzer_token_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        buzzer_collection
            .create_index(token_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: BUZZER_COLLECTION_NAME,
                index: "public_token",
                source,
            })?;

        let open_index = IndexModel::builder()
            .keys(doc! {"business_id": 1, "status": 1, "created_at": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("buzzer_open_idx".to_owned()))
                    .build(),
            )
            .build();
        buzzer_collection
            .create_index(open_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: BUZZER_COLLECTION_NAME,
                index: "business_id,status,created_at",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn user_collection(&self) -> Collection<MongoUserDocument> {
        self.database()
            .await
            .collection::<MongoUserDocument>(USER_COLLECTION_NAME)
    }

    async fn session_collection(&self) -> Collection<MongoSessionDocument> {
        self.database()
            .await
            .collection::<MongoSessionDocument>(SESSION_COLLECTION_NAME)
    }

    async fn business_collection(&self) -> Collection<MongoBusinessDocument> {
        self.database()
            .await
            .collection::<MongoBusinessDocument>(BUSINESS_COLLECTION_NAME)
    }

    async fn staff_collection(&self) -> Collection<MongoStaffDocument> {
        self.database()
            .await
            .collection::<MongoStaffDocument>(STAFF_COLLECTION_NAME)
    }

    async fn menu_item_collection(&self) -> Collection<MongoMenuItemDocument> {
        self.database()
            .await
            .collection::<MongoMenuItemDocument>(MENU_ITEM_COLLECTION_NAME)
    }

    async fn buzzer_collection(&self) -> Collection<MongoBuzzerDocument> {
        self.database()
            .await
            .collection::<MongoBuzzerDocument>(BUZZER_COLLECTION_NAME)
    }

    async fn insert_user(&self, user: UserEntity) -> MongoResult<()> {
        let id = user.id;
        let document: MongoUserDocument = user.into();
        self.user_collection()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    USER_COLLECTION_NAME,
                    id,
                    "an account with this email already exists",
                    source,
                )
            })?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> MongoResult<Option<UserEntity>> {
        let document = self
            .user_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: USER_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn find_user_by_email(&self, email: String) -> MongoResult<Option<UserEntity>> {
        let document = self
            .user_collection()
            .await
            .find_one(doc! {"email": email})
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: USER_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn insert_session(&self, session: SessionEntity) -> MongoResult<()> {
        let token = session.token.clone();
        let document: MongoSessionDocument = session.into();
        self.session_collection()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    SESSION_COLLECTION_NAME,
                    token,
                    "session token collision",
                    source,
                )
            })?;
        Ok(())
    }

    async fn find_session(&self, token: String) -> MongoResult<Option<SessionEntity>> {
        let document = self
            .session_collection()
            .await
            .find_one(doc! {"_id": token})
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: SESSION_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn delete_session(&self, token: String) -> MongoResult<()> {
        self.session_collection()
            .await
            .delete_one(doc! {"_id": token})
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: SESSION_COLLECTION_NAME,
                source,
            })?;
        Ok(())
    }

    async fn insert_business(&self, business: BusinessEntity) -> MongoResult<()> {
        let id = business.id;
        let document: MongoBusinessDocument = business.into();
        self.business_collection()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    BUSINESS_COLLECTION_NAME,
                    id,
                    "this web address is already taken",
                    source,
                )
            })?;
        Ok(())
    }

    async fn save_business(&self, business: BusinessEntity) -> MongoResult<()> {
        let id = business.id;
        let document: MongoBusinessDocument = business.into();
        self.business_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    BUSINESS_COLLECTION_NAME,
                    id,
                    "this web address is already taken",
                    source,
                )
            })?;
        Ok(())
    }

    async fn delete_business(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .business_collection()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: BUSINESS_COLLECTION_NAME,
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn find_business(&self, id: Uuid) -> MongoResult<Option<BusinessEntity>> {
        let document = self
            .business_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: BUSINESS_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn find_business_by_slug(&self, slug: String) -> MongoResult<Option<BusinessEntity>> {
        let document = self
            .business_collection()
            .await
            .find_one(doc! {"slug": slug})
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: BUSINESS_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn insert_staff(&self, staff: StaffEntity) -> MongoResult<()> {
        let id = staff.id;
        let document: MongoStaffDocument = staff.into();
        self.staff_collection()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    STAFF_COLLECTION_NAME,
                    id,
                    "you are already a member of this business",
                    source,
                )
            })?;
        Ok(())
    }

    async fn find_staff(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> MongoResult<Option<StaffEntity>> {
        let document = self
            .staff_collection()
            .await
            .find_one(doc! {
                "user_id": uuid_as_binary(user_id),
                "business_id": uuid_as_binary(business_id),
            })
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: STAFF_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn find_staff_for_user(&self, user_id: Uuid) -> MongoResult<Option<StaffEntity>> {
        let document = self
            .staff_collection()
            .await
            .find_one(doc! {"user_id": uuid_as_binary(user_id)})
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: STAFF_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn save_menu_item(&self, item: MenuItemEntity) -> MongoResult<()> {
        let id = item.id;
        let document: MongoMenuItemDocument = item.into();
        self.menu_item_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| {
                MongoDaoError::write(MENU_ITEM_COLLECTION_NAME, id, "menu item conflict", source)
            })?;
        Ok(())
    }

    async fn find_menu_item(&self, id: Uuid) -> MongoResult<Option<MenuItemEntity>> {
        let document = self
            .menu_item_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: MENU_ITEM_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn list_active_menu_items(
        &self,
        business_id: Uuid,
    ) -> MongoResult<Vec<MenuItemEntity>> {
        let documents: Vec<MongoMenuItemDocument> = self
            .menu_item_collection()
            .await
            .find(doc! {"business_id": uuid_as_binary(business_id), "is_active": true})
            .sort(doc! {"created_at": 1})
            .await
            .map_err(|source| MongoDaoError::List {
                collection: MENU_ITEM_COLLECTION_NAME,
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::List {
                collection: MENU_ITEM_COLLECTION_NAME,
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_menu_items_by_ids(&self, ids: Vec<Uuid>) -> MongoResult<Vec<MenuItemEntity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let id_filters: Vec<Bson> = ids
            .into_iter()
            .map(|id| Bson::Binary(uuid_as_binary(id)))
            .collect();
        let documents: Vec<MongoMenuItemDocument> = self
            .menu_item_collection()
            .await
            .find(doc! {"_id": {"$in": id_filters}})
            .await
            .map_err(|source| MongoDaoError::List {
                collection: MENU_ITEM_COLLECTION_NAME,
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::List {
                collection: MENU_ITEM_COLLECTION_NAME,
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn save_buzzer(&self, buzzer: BuzzerEntity) -> MongoResult<()> {
        let id = buzzer.id;
        let document: MongoBuzzerDocument = buzzer.into();
        self.buzzer_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| {
                MongoDaoError::write(
                    BUZZER_COLLECTION_NAME,
                    id,
                    "tracking token collision",
                    source,
                )
            })?;
        Ok(())
    }

    async fn find_buzzer(&self, id: Uuid) -> MongoResult<Option<BuzzerEntity>> {
        let document = self
            .buzzer_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn find_buzzer_by_token(&self, token: String) -> MongoResult<Option<BuzzerEntity>> {
        let document = self
            .buzzer_collection()
            .await
            .find_one(doc! {"public_token": token})
            .await
            .map_err(|source| MongoDaoError::Load {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn list_open_buzzers(&self, business_id: Uuid) -> MongoResult<Vec<BuzzerEntity>> {
        let open_statuses = vec![
            status_bson(BuzzerStatus::Active),
            status_bson(BuzzerStatus::Ready),
        ];
        let documents: Vec<MongoBuzzerDocument> = self
            .buzzer_collection()
            .await
            .find(doc! {
                "business_id": uuid_as_binary(business_id),
                "status": {"$in": open_statuses},
            })
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| MongoDaoError::List {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::List {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn list_buzzers_by_status(
        &self,
        status: BuzzerStatus,
    ) -> MongoResult<Vec<BuzzerEntity>> {
        let documents: Vec<MongoBuzzerDocument> = self
            .buzzer_collection()
            .await
            .find(doc! {"status": status_bson(status)})
            .await
            .map_err(|source| MongoDaoError::List {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::List {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn delete_buzzers_for_business(&self, business_id: Uuid) -> MongoResult<u64> {
        let result = self
            .buzzer_collection()
            .await
            .delete_many(doc! {"business_id": uuid_as_binary(business_id)})
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: BUZZER_COLLECTION_NAME,
                source,
            })?;
        Ok(result.deleted_count)
    }
}

impl OrderStore for MongoOrderStore {
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_user(user).await.map_err(Into::into) })
    }

    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user(id).await.map_err(Into::into) })
    }

    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user_by_email(email).await.map_err(Into::into) })
    }

    fn insert_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_session(session).await.map_err(Into::into) })
    }

    fn find_session(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_session(token).await.map_err(Into::into) })
    }

    fn delete_session(&self, token: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete_session(token).await.map_err(Into::into) })
    }

    fn insert_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_business(business).await.map_err(Into::into) })
    }

    fn save_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_business(business).await.map_err(Into::into) })
    }

    fn delete_business(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_business(id).await.map_err(Into::into) })
    }

    fn find_business(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_business(id).await.map_err(Into::into) })
    }

    fn find_business_by_slug(
        &self,
        slug: String,
    ) -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_business_by_slug(slug)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_staff(staff).await.map_err(Into::into) })
    }

    fn find_staff(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_staff(user_id, business_id)
                .await
                .map_err(Into::into)
        })
    }

    fn find_staff_for_user(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_staff_for_user(user_id)
                .await
                .map_err(Into::into)
        })
    }

    fn save_menu_item(&self, item: MenuItemEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_menu_item(item).await.map_err(Into::into) })
    }

    fn find_menu_item(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_menu_item(id).await.map_err(Into::into) })
    }

    fn list_active_menu_items(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_active_menu_items(business_id)
                .await
                .map_err(Into::into)
        })
    }

    fn find_menu_items_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_menu_items_by_ids(ids)
                .await
                .map_err(Into::into)
        })
    }

    fn save_buzzer(&self, buzzer: BuzzerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_buzzer(buzzer).await.map_err(Into::into) })
    }

    fn find_buzzer(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_buzzer(id).await.map_err(Into::into) })
    }

    fn find_buzzer_by_token(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_buzzer_by_token(token)
                .await
                .map_err(Into::into)
        })
    }

    fn list_open_buzzers(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_open_buzzers(business_id)
                .await
                .map_err(Into::into)
        })
    }

    fn list_buzzers_by_status(
        &self,
        status: BuzzerStatus,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_buzzers_by_status(status)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_buzzers_for_business(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_buzzers_for_business(business_id)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}

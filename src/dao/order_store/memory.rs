//! In-memory [`OrderStore`] used by service-layer tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{
        BusinessEntity, BuzzerEntity, BuzzerStatus, MenuItemEntity, SessionEntity, StaffEntity,
        UserEntity,
    },
    order_store::OrderStore,
    storage::{StorageError, StorageResult},
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, UserEntity>,
    sessions: HashMap<String, SessionEntity>,
    businesses: HashMap<Uuid, BusinessEntity>,
    staff: HashMap<Uuid, StaffEntity>,
    menu_items: HashMap<Uuid, MenuItemEntity>,
    buzzers: HashMap<Uuid, BuzzerEntity>,
}

/// Hash-map backed store with switches to inject failures.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    state: Arc<Mutex<MemoryState>>,
    fail_staff_inserts: Arc<AtomicBool>,
    fail_buzzer_saves: Arc<AtomicBool>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent staff insert fail as unavailable.
    pub fn fail_staff_inserts(&self, fail: bool) {
        self.fail_staff_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent buzzer save fail as unavailable.
    pub fn fail_buzzer_saves(&self, fail: bool) {
        self.fail_buzzer_saves.store(fail, Ordering::SeqCst);
    }

    pub fn business_count(&self) -> usize {
        self.state.lock().unwrap().businesses.len()
    }

    pub fn buzzer(&self, id: Uuid) -> Option<BuzzerEntity> {
        self.state.lock().unwrap().buzzers.get(&id).cloned()
    }

    fn unavailable(what: &str) -> StorageError {
        StorageError::unavailable(
            format!("injected {what} failure"),
            std::io::Error::other(what.to_owned()),
        )
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut state = store.state.lock().unwrap();
            if let Some(email) = &user.email
                && state.users.values().any(|u| u.email.as_ref() == Some(email))
            {
                return Err(StorageError::conflict(
                    "an account with this email already exists",
                ));
            }
            state.users.insert(user.id, user);
            Ok(())
        })
    }

    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.state.lock().unwrap().users.get(&id).cloned()) })
    }

    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state
                .users
                .values()
                .find(|u| u.email.as_deref() == Some(email.as_str()))
                .cloned())
        })
    }

    fn insert_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .state
                .lock()
                .unwrap()
                .sessions
                .insert(session.token.clone(), session);
            Ok(())
        })
    }

    fn find_session(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.state.lock().unwrap().sessions.get(&token).cloned()) })
    }

    fn delete_session(&self, token: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.state.lock().unwrap().sessions.remove(&token);
            Ok(())
        })
    }

    fn insert_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut state = store.state.lock().unwrap();
            if state.businesses.values().any(|b| b.slug == business.slug) {
                return Err(StorageError::conflict("this web address is already taken"));
            }
            state.businesses.insert(business.id, business);
            Ok(())
        })
    }

    fn save_business(&self, business: BusinessEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut state = store.state.lock().unwrap();
            if state
                .businesses
                .values()
                .any(|b| b.slug == business.slug && b.id != business.id)
            {
                return Err(StorageError::conflict("this web address is already taken"));
            }
            state.businesses.insert(business.id, business);
            Ok(())
        })
    }

    fn delete_business(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .state
                .lock()
                .unwrap()
                .businesses
                .remove(&id)
                .is_some())
        })
    }

    fn find_business(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.state.lock().unwrap().businesses.get(&id).cloned()) })
    }

    fn find_business_by_slug(
        &self,
        slug: String,
    ) -> BoxFuture<'static, StorageResult<Option<BusinessEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state.businesses.values().find(|b| b.slug == slug).cloned())
        })
    }

    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if store.fail_staff_inserts.load(Ordering::SeqCst) {
                return Err(Self::unavailable("staff insert"));
            }
            let mut state = store.state.lock().unwrap();
            if state
                .staff
                .values()
                .any(|s| s.user_id == staff.user_id && s.business_id == staff.business_id)
            {
                return Err(StorageError::conflict(
                    "you are already a member of this business",
                ));
            }
            state.staff.insert(staff.id, staff);
            Ok(())
        })
    }

    fn find_staff(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state
                .staff
                .values()
                .find(|s| s.user_id == user_id && s.business_id == business_id)
                .cloned())
        })
    }

    fn find_staff_for_user(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state.staff.values().find(|s| s.user_id == user_id).cloned())
        })
    }

    fn save_menu_item(&self, item: MenuItemEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.state.lock().unwrap().menu_items.insert(item.id, item);
            Ok(())
        })
    }

    fn find_menu_item(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.state.lock().unwrap().menu_items.get(&id).cloned()) })
    }

    fn list_active_menu_items(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            let mut items: Vec<_> = state
                .menu_items
                .values()
                .filter(|i| i.business_id == business_id && i.is_active)
                .cloned()
                .collect();
            items.sort_by_key(|i| i.created_at);
            Ok(items)
        })
    }

    fn find_menu_items_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<MenuItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(ids
                .iter()
                .filter_map(|id| state.menu_items.get(id).cloned())
                .collect())
        })
    }

    fn save_buzzer(&self, buzzer: BuzzerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if store.fail_buzzer_saves.load(Ordering::SeqCst) {
                return Err(Self::unavailable("buzzer save"));
            }
            store.state.lock().unwrap().buzzers.insert(buzzer.id, buzzer);
            Ok(())
        })
    }

    fn find_buzzer(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.state.lock().unwrap().buzzers.get(&id).cloned()) })
    }

    fn find_buzzer_by_token(
        &self,
        token: String,
    ) -> BoxFuture<'static, StorageResult<Option<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state
                .buzzers
                .values()
                .find(|b| b.public_token == token)
                .cloned())
        })
    }

    fn list_open_buzzers(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            let mut buzzers: Vec<_> = state
                .buzzers
                .values()
                .filter(|b| {
                    b.business_id == business_id
                        && matches!(b.status, BuzzerStatus::Active | BuzzerStatus::Ready)
                })
                .cloned()
                .collect();
            buzzers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(buzzers)
        })
    }

    fn list_buzzers_by_status(
        &self,
        status: BuzzerStatus,
    ) -> BoxFuture<'static, StorageResult<Vec<BuzzerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let state = store.state.lock().unwrap();
            Ok(state
                .buzzers
                .values()
                .filter(|b| b.status == status)
                .cloned()
                .collect())
        })
    }

    fn delete_buzzers_for_business(
        &self,
        business_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            let mut state = store.state.lock().unwrap();
            let before = state.buzzers.len();
            state.buzzers.retain(|_, b| b.business_id != business_id);
            Ok((before - state.buzzers.len()) as u64)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

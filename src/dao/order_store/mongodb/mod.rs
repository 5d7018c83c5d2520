//! MongoDB implementation of the order store.

mod connection;
mod error;
mod models;
/// Store configuration loading.
pub mod config;
/// MongoDB-backed [`crate::dao::order_store::OrderStore`] implementation.
pub mod store;

pub use error::MongoDaoError;
pub use store::MongoOrderStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::Duplicate { message, .. } => StorageError::conflict(message),
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}

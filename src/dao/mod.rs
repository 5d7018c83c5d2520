//! Persistence layer: entities, storage abstraction, and backends.

/// Database model definitions.
pub mod models;
/// Order data storage and retrieval operations.
pub mod order_store;
/// Storage abstraction layer for database operations.
pub mod storage;

//! Storage crate: the key-value state the faucet keeps per user.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – RateLimitRecord, UserLocale
//! - [`repository`] – RateLimitStore and LocaleStore traits
//! - [`inmemory`] – InMemoryStore (process-local, lost on restart)
//! - [`sqlite_store`] – SqliteStore (durable)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod inmemory;
mod models;
mod repository;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use inmemory::InMemoryStore;
pub use models::{RateLimitRecord, UserLocale};
pub use repository::{LocaleStore, RateLimitStore};
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteStore;

//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryProductService;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteGateway, SqliteProductService, StoreHandle};

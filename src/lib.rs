//! In-memory item CRUD service.
//!
//! Exposes a JSON API over a volatile item repository and serves a static
//! front end that consumes it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Item, ItemPatch, ItemRepository, MemoryItemRepository, NewItem};

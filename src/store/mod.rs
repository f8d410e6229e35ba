//! Item storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → ItemRepository trait (repository.rs)
//!     → MemoryItemRepository (memory.rs)
//!         - single mutex over the item list and id sequence
//!         - validation of required fields on create
//!     → Item / StoreError (item.rs, error.rs)
//! ```
//!
//! # Design Decisions
//! - Repository is an owned object injected into handlers, never a global
//! - Ids come from a monotonic sequence and are never reused after delete
//! - Storage is volatile; the collection resets on restart

pub mod error;
pub mod item;
pub mod memory;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use item::{Item, ItemPatch, NewItem, DEFAULT_STATUS};
pub use memory::MemoryItemRepository;
pub use repository::ItemRepository;

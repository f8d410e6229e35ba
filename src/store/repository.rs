//! Repository contract for item persistence.

use crate::store::error::StoreResult;
use crate::store::item::{Item, ItemPatch, NewItem};

/// Data access interface for items.
///
/// Implementations must serialize all operations so that the id sequence
/// and the collection are never observed half-updated.
pub trait ItemRepository: Send + Sync {
    /// All items in insertion order.
    fn list_all(&self) -> Vec<Item>;

    /// Look up a single item.
    fn get_by_id(&self, id: u64) -> StoreResult<Item>;

    /// Validate and append a new item, assigning the next id.
    fn create(&self, new_item: NewItem) -> StoreResult<Item>;

    /// Overwrite the present, non-empty fields of an existing item.
    fn update(&self, id: u64, patch: ItemPatch) -> StoreResult<Item>;

    /// Remove an item permanently.
    fn delete(&self, id: u64) -> StoreResult<()>;

    /// Number of items currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! In-memory item repository.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::metrics;
use crate::store::error::{StoreError, StoreResult};
use crate::store::item::{non_empty, Item, ItemPatch, NewItem, DEFAULT_STATUS};
use crate::store::repository::ItemRepository;

/// Items plus the next id to hand out. Guarded together so a create can
/// never observe a stale sequence.
#[derive(Debug)]
struct Inventory {
    items: Vec<Item>,
    next_id: u64,
}

/// A volatile repository holding items in insertion order.
#[derive(Debug)]
pub struct MemoryItemRepository {
    inner: Mutex<Inventory>,
}

impl MemoryItemRepository {
    /// Create an empty repository whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an empty repository whose first id is `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            inner: Mutex::new(Inventory {
                items: Vec::new(),
                next_id: first_id,
            }),
        }
    }

    /// Create a repository pre-populated with the two sample items.
    /// The sequence continues at 3.
    pub fn with_samples() -> Self {
        let items = vec![
            Item {
                id: 1,
                name: "Sample Item 1".to_string(),
                description: "This is a sample item".to_string(),
                status: "active".to_string(),
            },
            Item {
                id: 2,
                name: "Sample Item 2".to_string(),
                description: "Another sample item".to_string(),
                status: "inactive".to_string(),
            },
        ];
        Self {
            inner: Mutex::new(Inventory { items, next_id: 3 }),
        }
    }

    // Every operation either completes or leaves the inventory untouched,
    // so a poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for MemoryItemRepository {
    fn list_all(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    fn get_by_id(&self, id: u64) -> StoreResult<Item> {
        self.lock()
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, new_item: NewItem) -> StoreResult<Item> {
        let (Some(name), Some(description)) =
            (non_empty(new_item.name), non_empty(new_item.description))
        else {
            return Err(StoreError::Validation);
        };

        let mut inventory = self.lock();
        let item = Item {
            id: inventory.next_id,
            name,
            description,
            status: non_empty(new_item.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        };
        inventory.next_id += 1;
        inventory.items.push(item.clone());
        metrics::record_item_count(inventory.items.len());

        tracing::debug!(id = item.id, "Item created");
        Ok(item)
    }

    fn update(&self, id: u64, patch: ItemPatch) -> StoreResult<Item> {
        let mut inventory = self.lock();
        let item = inventory
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;

        patch.apply(item);

        tracing::debug!(id, "Item updated");
        Ok(item.clone())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut inventory = self.lock();
        let index = inventory
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;

        inventory.items.remove(index);
        metrics::record_item_count(inventory.items.len());

        tracing::debug!(id, "Item deleted");
        Ok(())
    }

    fn len(&self) -> usize {
        self.lock().items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_create_defaults_status_to_active() {
        let repo = MemoryItemRepository::new();
        let item = repo.create(NewItem::new("Test", "Desc")).unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.name, "Test");
        assert_eq!(item.description, "Desc");
        assert_eq!(item.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_create_keeps_explicit_status() {
        let repo = MemoryItemRepository::new();
        let item = repo
            .create(NewItem::new("Test", "Desc").with_status("archived"))
            .unwrap();
        assert_eq!(item.status, "archived");

        // An empty status falls back to the default.
        let item = repo
            .create(NewItem::new("Test", "Desc").with_status(""))
            .unwrap();
        assert_eq!(item.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_create_rejects_missing_fields_without_mutation() {
        let repo = MemoryItemRepository::new();

        let empty_name = NewItem::new("", "Desc");
        assert_eq!(repo.create(empty_name), Err(StoreError::Validation));

        let missing_description = NewItem {
            name: Some("Test".into()),
            ..Default::default()
        };
        assert_eq!(repo.create(missing_description), Err(StoreError::Validation));

        assert!(repo.is_empty());

        // Rejected creates do not consume ids.
        let item = repo.create(NewItem::new("Test", "Desc")).unwrap();
        assert_eq!(item.id, 1);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let repo = MemoryItemRepository::with_samples();

        assert_eq!(repo.get_by_id(999), Err(StoreError::NotFound(999)));
        assert_eq!(
            repo.update(999, ItemPatch::default()),
            Err(StoreError::NotFound(999))
        );
        assert_eq!(repo.delete(999), Err(StoreError::NotFound(999)));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_partial_update() {
        let repo = MemoryItemRepository::new();
        let created = repo.create(NewItem::new("Test", "Desc")).unwrap();

        let updated = repo
            .update(
                created.id,
                ItemPatch {
                    status: Some("inactive".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Test");
        assert_eq!(updated.description, "Desc");
        assert_eq!(updated.status, "inactive");
        assert_eq!(repo.get_by_id(created.id).unwrap(), updated);
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let repo = MemoryItemRepository::new();
        let first = repo.create(NewItem::new("a", "a")).unwrap();
        let second = repo.create(NewItem::new("b", "b")).unwrap();

        repo.delete(second.id).unwrap();
        assert!(repo.list_all().iter().all(|item| item.id != second.id));

        let third = repo.create(NewItem::new("c", "c")).unwrap();
        assert!(third.id > second.id);
        assert_eq!(
            repo.list_all().iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![first.id, third.id]
        );
    }

    #[test]
    fn test_round_trip() {
        let repo = MemoryItemRepository::new();
        let created = repo
            .create(NewItem::new("Widget", "Blue widget").with_status("pending"))
            .unwrap();
        assert_eq!(repo.get_by_id(created.id).unwrap(), created);
    }

    #[test]
    fn test_samples_and_sequence() {
        let repo = MemoryItemRepository::with_samples();
        let items = repo.list_all();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Sample Item 1");
        assert_eq!(items[1].status, "inactive");

        let next = repo.create(NewItem::new("Test", "Desc")).unwrap();
        assert_eq!(next.id, 3);

        let custom = MemoryItemRepository::starting_at(100);
        assert_eq!(custom.create(NewItem::new("x", "y")).unwrap().id, 100);
    }

    #[test]
    fn test_concurrent_creates_assign_unique_increasing_ids() {
        let repo = Arc::new(MemoryItemRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = repo.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| {
                            repo.create(NewItem::new(format!("{t}-{i}"), "load"))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            let ids = handle.join().unwrap();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            all.extend(ids);
        }
        assert_eq!(all.len(), 400);
        assert_eq!(repo.len(), 400);
    }
}

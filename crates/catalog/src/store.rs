//! The catalog store: create/read/update/delete plus the atomic stock
//! adjustment primitive.
//!
//! Concurrency discipline: the id → slot index takes a short-lived `RwLock`
//! for insert/remove/lookup only. Every field mutation serializes on the
//! item's own mutex, so adjustments on distinct ids never contend and two
//! concurrent purchases of the last unit can never both succeed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::Utc;

use sweetshop_core::{DomainError, DomainResult, ItemId};

use crate::item::{Item, ItemPatch, NewItem};

/// Converts a lock poison error to an internal error.
fn poison_err<T>(_: PoisonError<T>) -> DomainError {
    DomainError::internal("catalog lock poisoned")
}

/// Store abstraction over the authoritative item set.
///
/// Implementations must make [`adjust`](CatalogStore::adjust) linearizable per
/// id: all mutating operations on one id take effect in a single total order.
/// No cross-id ordering is promised.
pub trait CatalogStore: Send + Sync {
    /// Validate and store a new item under a fresh id.
    ///
    /// The item is visible to subsequent reads and searches. Ids are never
    /// reused, even after deletion.
    fn create(&self, new: NewItem) -> DomainResult<Item>;

    /// Fetch a copy of one item.
    fn get(&self, item_id: ItemId) -> DomainResult<Item>;

    /// Replace the fields present in the patch, leaving absent fields
    /// unchanged. Plain replacement: use [`adjust`](CatalogStore::adjust) for
    /// purchase/restock semantics.
    fn update(&self, item_id: ItemId, patch: ItemPatch) -> DomainResult<Item>;

    /// Remove the item permanently.
    fn delete(&self, item_id: ItemId) -> DomainResult<()>;

    /// Atomically apply `quantity += delta` (negative for purchase, positive
    /// for restock) and return the new state.
    ///
    /// Fails with `InsufficientStock` when the result would be negative; the
    /// item is left completely unmodified in that case.
    fn adjust(&self, item_id: ItemId, delta: i64) -> DomainResult<Item>;

    /// Point-in-time copy of all items in insertion (creation) order.
    ///
    /// Mutations after the snapshot is taken are not reflected in it.
    fn snapshot(&self) -> DomainResult<Vec<Item>>;

    /// Purchase one unit: `adjust(id, -1)`.
    fn purchase(&self, item_id: ItemId) -> DomainResult<Item> {
        self.adjust(item_id, -1)
    }

    /// Restock by `n` units, `n >= 1`.
    fn restock(&self, item_id: ItemId, n: u64) -> DomainResult<Item> {
        if n == 0 {
            return Err(DomainError::validation("restock quantity must be at least 1"));
        }
        let delta = i64::try_from(n)
            .map_err(|_| DomainError::validation("restock quantity too large"))?;
        self.adjust(item_id, delta)
    }
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn create(&self, new: NewItem) -> DomainResult<Item> {
        (**self).create(new)
    }

    fn get(&self, item_id: ItemId) -> DomainResult<Item> {
        (**self).get(item_id)
    }

    fn update(&self, item_id: ItemId, patch: ItemPatch) -> DomainResult<Item> {
        (**self).update(item_id, patch)
    }

    fn delete(&self, item_id: ItemId) -> DomainResult<()> {
        (**self).delete(item_id)
    }

    fn adjust(&self, item_id: ItemId, delta: i64) -> DomainResult<Item> {
        (**self).adjust(item_id, delta)
    }

    fn snapshot(&self) -> DomainResult<Vec<Item>> {
        (**self).snapshot()
    }
}

/// One stored item plus its insertion sequence (snapshot ordering) and a
/// tombstone flag so a mutation racing a delete observes `NotFound`.
#[derive(Debug)]
struct Slot {
    seq: u64,
    state: Mutex<SlotState>,
}

#[derive(Debug)]
struct SlotState {
    item: Item,
    deleted: bool,
}

/// In-memory catalog store.
///
/// The authoritative copy of every item lives here; `get` and `snapshot`
/// return clones.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    index: RwLock<HashMap<ItemId, Arc<Slot>>>,
    next_seq: AtomicU64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a slot, holding the index lock only long enough to clone the Arc.
    fn slot(&self, item_id: ItemId) -> DomainResult<Arc<Slot>> {
        let index = self.index.read().map_err(poison_err)?;
        index
            .get(&item_id)
            .cloned()
            .ok_or(DomainError::NotFound { item_id })
    }
}

impl CatalogStore for InMemoryCatalog {
    fn create(&self, new: NewItem) -> DomainResult<Item> {
        let item = Item::new(ItemId::new(), new, Utc::now())?;
        let slot = Arc::new(Slot {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            state: Mutex::new(SlotState {
                item: item.clone(),
                deleted: false,
            }),
        });

        let mut index = self.index.write().map_err(poison_err)?;
        index.insert(item.id_typed(), slot);
        drop(index);

        tracing::debug!(item_id = %item.id_typed(), "item created");
        Ok(item)
    }

    fn get(&self, item_id: ItemId) -> DomainResult<Item> {
        let slot = self.slot(item_id)?;
        let state = slot.state.lock().map_err(poison_err)?;
        if state.deleted {
            return Err(DomainError::NotFound { item_id });
        }
        Ok(state.item.clone())
    }

    fn update(&self, item_id: ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let slot = self.slot(item_id)?;
        let mut state = slot.state.lock().map_err(poison_err)?;
        if state.deleted {
            return Err(DomainError::NotFound { item_id });
        }
        state.item.apply_patch(patch)?;
        tracing::debug!(item_id = %item_id, "item updated");
        Ok(state.item.clone())
    }

    fn delete(&self, item_id: ItemId) -> DomainResult<()> {
        let slot = {
            let mut index = self.index.write().map_err(poison_err)?;
            index
                .remove(&item_id)
                .ok_or(DomainError::NotFound { item_id })?
        };

        // Tombstone the slot after removal: a mutation that cloned the Arc
        // before the removal either completes first (it linearizes before the
        // delete) or sees the flag and reports NotFound.
        let mut state = slot.state.lock().map_err(poison_err)?;
        state.deleted = true;
        tracing::debug!(item_id = %item_id, "item deleted");
        Ok(())
    }

    fn adjust(&self, item_id: ItemId, delta: i64) -> DomainResult<Item> {
        let slot = self.slot(item_id)?;
        let mut state = slot.state.lock().map_err(poison_err)?;
        if state.deleted {
            return Err(DomainError::NotFound { item_id });
        }
        state.item.adjust_quantity(delta)?;
        tracing::debug!(
            item_id = %item_id,
            delta,
            quantity = state.item.quantity(),
            "stock adjusted"
        );
        Ok(state.item.clone())
    }

    fn snapshot(&self) -> DomainResult<Vec<Item>> {
        let slots: Vec<Arc<Slot>> = {
            let index = self.index.read().map_err(poison_err)?;
            index.values().cloned().collect()
        };

        let mut items = Vec::with_capacity(slots.len());
        for slot in &slots {
            let state = slot.state.lock().map_err(poison_err)?;
            if !state.deleted {
                items.push((slot.seq, state.item.clone()));
            }
        }

        // Deterministic insertion order, matching creation order.
        items.sort_by_key(|(seq, _)| *seq);
        Ok(items.into_iter().map(|(_, item)| item).collect())
    }
}

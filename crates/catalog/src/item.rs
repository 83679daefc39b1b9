use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sweetshop_core::{DomainError, DomainResult, Entity, ItemId, Price};

/// A catalog entry ("sweet").
///
/// The canonical copy of every item lives inside the store; callers only ever
/// receive clones, so quantity can only change through the store's
/// update/adjust operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    price: Price,
    quantity: u64,
    created_at: DateTime<Utc>,
}

/// Input for creating an item; the store assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u64,
}

/// Partial update: each field is present-with-value or absent, and only
/// present fields are applied. Not a delta — callers must not use `quantity`
/// here for purchase/restock semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

fn non_empty(field: &str, value: String) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

impl Item {
    /// Validate creation input and build the item. Store-internal: ids and
    /// timestamps are assigned by the store, never by callers.
    pub(crate) fn new(id: ItemId, new: NewItem, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = non_empty("name", new.name)?;
        let category = non_empty("category", new.category)?;
        Ok(Self {
            id,
            name,
            category,
            price: new.price,
            quantity: new.quantity,
            created_at,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a partial update. Validation happens before any field changes,
    /// so an invalid patch leaves the item completely unmodified.
    pub(crate) fn apply_patch(&mut self, patch: ItemPatch) -> DomainResult<()> {
        let name = patch.name.map(|n| non_empty("name", n)).transpose()?;
        let category = patch
            .category
            .map(|c| non_empty("category", c))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    /// Apply `quantity += delta` with checked arithmetic.
    ///
    /// The quantity is only assigned after the new value is known to be valid,
    /// so a failed adjustment is a strict no-op. The store serializes calls
    /// per id, which makes the check-then-write atomic for callers.
    pub(crate) fn adjust_quantity(&mut self, delta: i64) -> DomainResult<()> {
        let next = if delta >= 0 {
            self.quantity
                .checked_add(delta as u64)
                .ok_or_else(|| DomainError::validation("quantity overflow"))?
        } else {
            self.quantity
                .checked_sub(delta.unsigned_abs())
                .ok_or_else(|| {
                    DomainError::insufficient_stock(self.id, delta, self.quantity)
                })?
        };
        self.quantity = next;
        Ok(())
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

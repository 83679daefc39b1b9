//! Catalog store: the single source of truth for sellable items.
//!
//! Pure in-process engine (no HTTP, no durable storage wiring). Transports
//! call the [`CatalogStore`] trait; the search crate reads through
//! [`CatalogStore::snapshot`] only.

pub mod item;
pub mod store;

pub use item::{Item, ItemPatch, NewItem};
pub use store::{CatalogStore, InMemoryCatalog};

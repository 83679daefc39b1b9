use serde::{Deserialize, Serialize};

use sweetshop_catalog::{CatalogStore, Item};
use sweetshop_core::{DomainResult, Price};

/// Filter criteria for catalog searches.
///
/// Every criterion is independently optional; absent means "no constraint".
/// The default filter matches every item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Substring match on the item name (case-sensitive).
    pub name_contains: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
}

impl SearchFilter {
    /// True when the item satisfies every present criterion.
    ///
    /// Inverted price bounds (`min > max`) cannot both hold, so they match
    /// nothing rather than erroring.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(pattern) = &self.name_contains {
            if !item.name().contains(pattern.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if item.category() != category.as_str() {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price() > max {
                return false;
            }
        }
        true
    }

    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }
}

/// Read-only search engine over a catalog store.
///
/// Works like the catalog's other consumers: generic over the store trait, so
/// it accepts the store directly or behind an `Arc`.
#[derive(Debug)]
pub struct SearchEngine<S>
where
    S: CatalogStore,
{
    catalog: S,
}

impl<S> SearchEngine<S>
where
    S: CatalogStore,
{
    pub fn new(catalog: S) -> Self {
        Self { catalog }
    }

    /// All items matching the conjunction of present criteria, in snapshot
    /// insertion order (i.e. creation order). No re-sorting.
    pub fn search(&self, filter: &SearchFilter) -> DomainResult<Vec<Item>> {
        let snapshot = self.catalog.snapshot()?;
        Ok(snapshot
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }
}

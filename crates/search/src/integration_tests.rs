//! Integration tests for the full catalog pipeline.
//!
//! Tests: CatalogStore mutations → snapshot → SearchEngine results.

use std::sync::Arc;
use std::thread;

use sweetshop_catalog::{CatalogStore, InMemoryCatalog, ItemPatch, NewItem};
use sweetshop_core::{DomainError, Price};

use crate::{SearchEngine, SearchFilter};

fn setup() -> (Arc<InMemoryCatalog>, SearchEngine<Arc<InMemoryCatalog>>) {
    sweetshop_observability::init();
    let store = Arc::new(InMemoryCatalog::new());
    let engine = SearchEngine::new(store.clone());
    (store, engine)
}

fn ladoo() -> NewItem {
    NewItem {
        name: "Ladoo".to_string(),
        category: "Indian".to_string(),
        price: Price::from_major_minor(2, 50),
        quantity: 5,
    }
}

#[test]
fn purchase_restock_and_search_scenario() {
    let (store, engine) = setup();
    let item = store.create(ladoo()).unwrap();
    let item_id = item.id_typed();

    // Sell out completely.
    let drained = store.adjust(item_id, -5).unwrap();
    assert_eq!(drained.quantity(), 0);

    // One more purchase must fail and leave the quantity at zero.
    let err = store.adjust(item_id, -1).unwrap_err();
    assert_eq!(
        err,
        DomainError::InsufficientStock {
            item_id,
            requested: -1,
            available: 0,
        }
    );
    assert_eq!(store.get(item_id).unwrap().quantity(), 0);

    // Restock and find it again through the search engine.
    let restocked = store.adjust(item_id, 3).unwrap();
    assert_eq!(restocked.quantity(), 3);

    let results = engine
        .search(&SearchFilter {
            category: Some("Indian".to_string()),
            min_price: Some(Price::from_major_minor(1, 0)),
            max_price: Some(Price::from_major_minor(3, 0)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id_typed(), item_id);
    assert_eq!(results[0].quantity(), 3);
}

#[test]
fn created_items_are_immediately_searchable() {
    let (store, engine) = setup();
    let item = store.create(ladoo()).unwrap();

    let results = engine.search(&SearchFilter::default()).unwrap();
    assert_eq!(results, vec![item]);
}

#[test]
fn deleted_items_disappear_from_search() {
    let (store, engine) = setup();
    let keep = store.create(ladoo()).unwrap();
    let gone = store
        .create(NewItem {
            name: "Baklava".to_string(),
            category: "Turkish".to_string(),
            price: Price::from_major_minor(4, 0),
            quantity: 2,
        })
        .unwrap();

    store.delete(gone.id_typed()).unwrap();
    assert_eq!(
        store.get(gone.id_typed()).unwrap_err(),
        DomainError::NotFound {
            item_id: gone.id_typed()
        }
    );

    let results = engine.search(&SearchFilter::default()).unwrap();
    assert_eq!(results, vec![keep]);
}

#[test]
fn updates_are_reflected_in_search_results() {
    let (store, engine) = setup();
    let item = store.create(ladoo()).unwrap();

    store
        .update(
            item.id_typed(),
            ItemPatch {
                category: Some("Festive".to_string()),
                price: Some(Price::from_major_minor(3, 25)),
                ..Default::default()
            },
        )
        .unwrap();

    let stale = engine
        .search(&SearchFilter {
            category: Some("Indian".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(stale.is_empty());

    let fresh = engine
        .search(&SearchFilter {
            category: Some("Festive".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].price(), Price::from_minor_units(325));
    assert_eq!(fresh[0].name(), "Ladoo");
}

#[test]
fn search_stays_consistent_while_stock_moves_concurrently() {
    let (store, engine) = setup();
    let item = store.create(ladoo()).unwrap();
    let item_id = item.id_typed();
    store.restock(item_id, 995).unwrap(); // 1000 total

    let mutator = {
        let store = store.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                store.purchase(item_id).unwrap();
            }
        })
    };

    // Every observed quantity is a valid point-in-time value, never negative
    // and never above the starting stock.
    for _ in 0..50 {
        let results = engine.search(&SearchFilter::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].quantity() <= 1000);
    }

    mutator.join().unwrap();
    assert_eq!(store.get(item_id).unwrap().quantity(), 500);
}

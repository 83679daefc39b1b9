//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value
/// objects with the same attribute values are equal. Contrast with an
/// [`Entity`](crate::entity::Entity), which is identified by its id.
///
/// Example: `Price::from_minor_units(250)` equals any other 2.50 price, while
/// two items that both cost 2.50 are still distinct entities.
///
/// The bounds keep value objects cheap to copy, comparable, and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Exact-precision price value object.
//!
//! Prices are stored in minor currency units (e.g. cents), never floating
//! point, so comparisons and range filtering never suffer rounding drift.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A non-negative, exact-precision price in minor currency units.
///
/// `Ord` follows the numeric value, so inclusive range bounds compare the way
/// callers expect (`min <= price <= max`).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Build a price from minor units: `Price::from_minor_units(250)` is 2.50.
    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// Build a price from major and minor units: `from_major_minor(2, 50)` is 2.50.
    ///
    /// `minor` must be a fraction of one major unit (0..=99).
    pub const fn from_major_minor(major: u64, minor: u64) -> Self {
        Self(major * 100 + minor)
    }

    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Price {}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

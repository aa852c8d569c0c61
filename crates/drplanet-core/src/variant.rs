//! # Variant Stock Matrix
//!
//! Per color/size inventory for apparel products.
//!
//! ## Shape
//! ```text
//! {
//!   "Ceil Blue": { "S": 4, "M": 7, "L": 2 },
//!   "Navy":      { "M": 3, "XL": 1 }
//! }
//! ```
//!
//! A scrub top comes in colors, each color in sizes. The matrix stores the
//! count per (color, size) cell; the product's flat `stock` field is kept
//! equal to the sum of all cells by the sale recording flow.
//!
//! ## Usage
//! ```rust
//! use drplanet_core::variant::VariantMatrix;
//!
//! let mut matrix = VariantMatrix::new();
//! matrix.set("Ceil Blue", "M", 7);
//! matrix.set("Navy", "XL", 1);
//!
//! assert_eq!(matrix.total(), 8);
//!
//! let removed = matrix.decrement_clamped("Ceil Blue", "M", 3);
//! assert_eq!(removed, 3);
//! assert_eq!(matrix.get("Ceil Blue", "M"), Some(4));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Nested color → size → count inventory map.
///
/// BTreeMap keeps iteration and JSON output deterministic, so the stored
/// form is stable across rewrites.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct VariantMatrix(BTreeMap<String, BTreeMap<String, i64>>);

impl VariantMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        VariantMatrix(BTreeMap::new())
    }

    /// Sets the count for a (color, size) cell, creating it if needed.
    pub fn set(&mut self, color: &str, size: &str, count: i64) {
        self.0
            .entry(color.to_string())
            .or_default()
            .insert(size.to_string(), count);
    }

    /// Returns the count for a (color, size) cell, if present.
    pub fn get(&self, color: &str, size: &str) -> Option<i64> {
        self.0.get(color).and_then(|sizes| sizes.get(size)).copied()
    }

    /// Sum of every cell. The product's flat stock mirrors this value.
    pub fn total(&self) -> i64 {
        self.0
            .values()
            .flat_map(|sizes| sizes.values())
            .sum()
    }

    /// Checks whether the matrix has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|sizes| sizes.is_empty())
    }

    /// Decrements a cell by `quantity`, floored at zero.
    ///
    /// Returns the number of units actually removed, which is less than
    /// `quantity` when the cell held fewer units (oversell is clamped, not
    /// rejected). A missing cell removes nothing and is not created; the
    /// caller decides whether that deserves a warning.
    pub fn decrement_clamped(&mut self, color: &str, size: &str, quantity: i64) -> i64 {
        let Some(cell) = self.0.get_mut(color).and_then(|sizes| sizes.get_mut(size)) else {
            return 0;
        };

        let removed = quantity.min(*cell).max(0);
        *cell -= removed;
        removed
    }

    /// Iterates (color, size, count) cells in deterministic order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, i64)> {
        self.0.iter().flat_map(|(color, sizes)| {
            sizes
                .iter()
                .map(move |(size, count)| (color.as_str(), size.as_str(), *count))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

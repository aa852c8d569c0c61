//! # drplanet-core: Pure Business Logic for Doctor Planet
//!
//! This crate is the **heart** of the Doctor Planet backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Doctor Planet Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront / POS screens / Admin dashboard         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP + JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    product search, record_sale, revenue report, discount        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ drplanet-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │  │  types  │ │  money  │ │ pricing │ │ variant │ │  window  │ │   │
//! │  │  │ Product │ │  Money  │ │  sale   │ │ color × │ │ today /  │ │   │
//! │  │  │  Sale   │ │  paisa  │ │ totals  │ │  size   │ │  month   │ │   │
//! │  │  │  Order  │ │   bps   │ │discount │ │  stock  │ │  bounds  │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 drplanet-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Order, UdharPayment, ...)
//! - [`money`] - Money type with integer paisa arithmetic (no floating point!)
//! - [`pricing`] - Sale pricing: unit price selection, subtotal, discount
//! - [`variant`] - Color × size stock matrix with clamped decrements
//! - [`window`] - Revenue window boundaries (today, this month)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paisa (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use drplanet_core::money::Money;
//!
//! // Create money from paisa (never from floats!)
//! let price = Money::from_paisa(149_900); // Rs 1,499.00
//!
//! // 10% of it, using basis point math
//! let discount = price.percentage_of(1000);
//! assert_eq!(discount.paisa(), 14_990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod variant;
pub mod window;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use drplanet_core::Money` instead of
// `use drplanet_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;
pub use variant::VariantMatrix;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable in future versions.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Prefix for POS receipt numbers: POS-YYYYMMDD-NNNN
pub const RECEIPT_PREFIX: &str = "POS";

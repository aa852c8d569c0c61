//! # Validation Module
//!
//! Input validation utilities for Doctor Planet.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (storefront / POS terminal)                         │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use drplanet_core::validation::{validate_quantity, validate_sale_items};
//!
//! // Validate line count before pricing
//! validate_sale_items(3).unwrap();
//!
//! // Validate quantity before stock work
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_SALE_ITEMS};
use chrono::{DateTime, Utc};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates the number of line items on a submitted sale.
///
/// ## Rules
/// - Must have at least one line
/// - Must not exceed MAX_SALE_ITEMS (100)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  POS: Complete Sale                                                     │
/// │                                                                         │
/// │  Cashier hits "Checkout" with N lines                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_sale_items(N) ← THIS FUNCTION                                │
/// │       │                                                                 │
/// │       ├── N == 0? → Error: "items is required"                         │
/// │       │                                                                 │
/// │       ├── N > 100? → Error: "items must be between 1 and 100"          │
/// │       │                                                                 │
/// │       └── OK → Proceed with pricing + stock decrement                  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale_items(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if count > MAX_SALE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a per-sale discount value (flat paisa or raw percentage).
///
/// ## Rules
/// - Must be non-negative
/// - Deliberately no upper bound: a discount larger than the subtotal is
///   recorded with a negative total
pub fn validate_discount_value(value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount received (cash tendered) in paisa.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (nothing tendered yet on credit-style sales)
pub fn validate_amount_received(paisa: i64) -> ValidationResult<()> {
    if paisa < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "amount received".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Discount Window Validators
// =============================================================================

/// Validates the storewide discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 (inclusive)
///
/// ## Example
/// ```rust
/// use drplanet_core::validation::validate_global_discount_percentage;
///
/// assert!(validate_global_discount_percentage(15.0).is_ok());
/// assert!(validate_global_discount_percentage(100.0).is_ok());
/// assert!(validate_global_discount_percentage(101.0).is_err());
/// assert!(validate_global_discount_percentage(-1.0).is_err());
/// ```
pub fn validate_global_discount_percentage(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "percentage".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates the storewide discount window bounds.
///
/// ## Rules
/// - Either bound may be missing (open-ended window)
/// - When both are present, start must not come after end
pub fn validate_discount_window(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> ValidationResult<()> {
    if let (Some(starts), Some(ends)) = (starts_at, ends_at) {
        if starts > ends {
            return Err(ValidationError::InvalidDateRange {
                field: "discount window".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Udhar Validators
// =============================================================================

/// Validates an udhar payment amount in paisa.
///
/// ## Rules
/// - Must be positive (> 0); recording a zero payment is meaningless
pub fn validate_udhar_amount(paisa: i64) -> ValidationResult<()> {
    if paisa <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an optional customer name.
///
/// ## Rules
/// - Maximum 100 characters (empty is fine; the field is optional)
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an optional customer phone number.
///
/// ## Rules
/// - Maximum 30 characters
/// - Digits plus the usual separators: + - ( ) and spaces
pub fn validate_customer_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "customer phone".to_string(),
            max: 30,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        return Err(ValidationError::InvalidFormat {
            field: "customer phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(())
}

/// Validates free-text notes.
///
/// ## Rules
/// - Maximum 500 characters
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID v4 format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use drplanet_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    // Try to parse as UUID
    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

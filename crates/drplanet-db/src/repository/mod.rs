//! # Repository Module
//!
//! Database repository implementations for Doctor Planet.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().search("scrub", 20)                             │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, query, limit)                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── get_by_barcode(&self, barcode)                                    │
//! │  └── insert(&self, product)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory SQLite per test)                            │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog reads, search, inserts
//! - [`sale::SaleRepository`] - POS checkout (pricing + stock + receipt)
//! - [`order::OrderRepository`] - Web orders and status transitions
//! - [`udhar::UdharRepository`] - Credit payment entries
//! - [`discount::DiscountRepository`] - Storewide discount singleton
//! - [`reporting::ReportingRepository`] - Dashboard revenue sums

pub mod discount;
pub mod order;
pub mod product;
pub mod reporting;
pub mod sale;
pub mod udhar;

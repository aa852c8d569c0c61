//! # Doctor Planet Server
//!
//! HTTP API for the Doctor Planet shop: storefront catalog, POS checkout,
//! order fulfillment, udhar ledger, and the admin dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Doctor Planet Server                            │
//! │                                                                         │
//! │  Storefront ──┐                                                         │
//! │  POS Counter ─┼──► axum Router ──► Handlers ──► Repositories ──► SQLite│
//! │  Back Office ─┘         │                                               │
//! │                         ▼                                               │
//! │                   TraceLayer (request logging)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

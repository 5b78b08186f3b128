//! # apothecart-store: Storage Adapter for Apothecart
//!
//! This crate persists cart line items to SQLite with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Apothecart Data Flow                                │
//! │                                                                         │
//! │  CartSession (apothecart-session)                                      │
//! │       │  after every engine mutation                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apothecart-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (cart.rs)    │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (one row per line item, ordered by position)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - The cart repository (load/save/delete)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apothecart_store::{CartStore, StoreConfig};
//!
//! let store = CartStore::new(StoreConfig::new("./apothecart.db")).await?;
//!
//! let items = store.carts().load("session-42").await?;
//! // ... mutate the engine ...
//! store.carts().save("session-42", &snapshot).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{CartStore, StoreConfig};

// Repository re-export for convenience
pub use repository::cart::CartRepository;

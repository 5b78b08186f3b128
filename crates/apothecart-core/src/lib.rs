//! # apothecart-core: Pure Pricing Logic for Apothecart
//!
//! This crate is the **heart** of the Apothecart cart subsystem. It contains
//! the whole cart pricing engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Apothecart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Marketplace Frontend                         │   │
//! │  │    Product Search ──► Cart UI ──► Checkout Handoff             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apothecart-session                             │   │
//! │  │    one engine per user session, save-through persistence        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ apothecart-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ shipping  │  │   │
//! │  │   │ PromoCode │  │  TaxCalc  │  │ grouping  │  │  promos   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apothecart-store (Storage Adapter)             │   │
//! │  │              SQLite persistence of cart line items              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, SellerGroup, PromoCode, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart pricing engine itself
//! - [`catalog`] - Static shipping and promo catalogs
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every derivation is deterministic - same input =
//!    same output, recomputation is idempotent
//! 2. **No I/O**: persistence goes through the `snapshot_items`/`hydrate`
//!    contract points; the engine never touches storage itself
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Total Operations**: unknown keys are silent no-ops; the only
//!    typed failures are the two promo-code conditions
//!
//! ## Example Usage
//!
//! ```rust
//! use apothecart_core::cart::Cart;
//! use apothecart_core::types::LineItem;
//!
//! let mut cart = Cart::new();
//! cart.add_item(
//!     LineItem {
//!         id: "amoxi-500".to_string(),
//!         name: "Amoxicillin 500mg".to_string(),
//!         price_cents: 4550,
//!         quantity: 0,
//!         seller_id: Some("ph-central".to_string()),
//!         seller_name: Some("Central Pharmacy".to_string()),
//!         max_quantity: None,
//!     },
//!     2,
//! );
//!
//! let totals = cart.compute_totals();
//! assert_eq!(totals.subtotal_cents, 9100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use apothecart_core::Money` instead of
// `use apothecart_core::money::Money`

pub use cart::{Cart, CartListener};
pub use error::{CartError, CartResult, PromoError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name for the group of items sold directly by the marketplace
/// (line items whose seller id is `None`).
pub const DIRECT_SELLER_NAME: &str = "Apothecart Direct";

/// Default tax rate in basis points, applied to the order subtotal.
///
/// 1400 bps = 14% VAT. Deployments in other jurisdictions construct the
/// cart with their own rate via `Cart::with_catalogs`.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1400;

/// Maximum unique lines allowed in a single cart.
///
/// Enforced by caller-side validation, not by the engine itself (engine
/// operations stay total).
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

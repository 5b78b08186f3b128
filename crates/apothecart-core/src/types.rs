//! # Domain Types
//!
//! Core domain types for the Apothecart cart pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  ShippingOption │   │    PromoCode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  code           │       │
//! │  │  price_cents    │   │  fee_cents      │   │  DiscountKind   │       │
//! │  │  quantity       │   │  delivery label │   │  eligibility    │       │
//! │  │  seller_id?     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SellerGroup   │   │   OrderTotals   │   (derived, recomputed      │
//! │  │  per-seller     │   │  subtotal, tax, │    on every mutation,       │
//! │  │  partition      │   │  shipping, ...  │    never persisted)         │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Seller Identity
//! Items carry an optional owning-seller id. `None` marks an item sold
//! directly by the marketplace; grouping collapses all such items into one
//! group under [`crate::DIRECT_SELLER_NAME`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1400 bps = 14% (the default VAT applied to the order subtotal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product-and-quantity entry in the cart, scoped to a specific seller.
///
/// ## Design Notes
/// - `id`: the catalog backend's product identifier
/// - `price_cents`: frozen at the time the item was added; the cart keeps
///   displaying a consistent price even if the catalog changes afterwards
/// - `seller_id`/`seller_name`: `None` for marketplace-direct items
/// - `max_quantity`: optional per-item cap; quantity mutations clamp to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier.
    pub id: String,

    /// Display name at the time of adding (frozen).
    pub name: String,

    /// Unit price in cents at the time of adding (frozen, non-negative).
    pub price_cents: i64,

    /// Quantity in the cart (positive).
    pub quantity: i64,

    /// Owning seller identifier; `None` means marketplace-direct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,

    /// Owning seller display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,

    /// Optional maximum quantity allowed for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Checks whether this item matches a (product, seller) key pair.
    ///
    /// Both keys must match: the same product sold by two different
    /// pharmacies is two distinct cart lines.
    pub fn matches(&self, product_id: &str, seller_id: Option<&str>) -> bool {
        self.id == product_id && self.seller_id.as_deref() == seller_id
    }

    /// Clamps a requested quantity to this item's cap, if one is set.
    pub fn clamp_to_cap(&self, quantity: i64) -> i64 {
        match self.max_quantity {
            Some(cap) => quantity.min(cap),
            None => quantity,
        }
    }
}

// =============================================================================
// Seller Group
// =============================================================================

/// A derived, non-persisted partition of line items by originating seller.
///
/// Recomputed on every cart mutation; used for per-seller shipping and
/// subtotal display. The shipping fee is the currently selected option's
/// flat fee, applied once per group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SellerGroup {
    /// Seller identifier; `None` for the marketplace-direct group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,

    /// Seller display name (sentinel name for the direct group).
    pub seller_name: String,

    /// Items belonging to this seller, in cart order.
    pub items: Vec<LineItem>,

    /// Sum of line totals for this group, in cents.
    pub subtotal_cents: i64,

    /// Flat shipping fee for this group, in cents.
    pub shipping_fee_cents: i64,

    /// Delivery estimate label of the selected shipping option.
    pub delivery_estimate: String,
}

impl SellerGroup {
    /// Returns the group subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the group shipping fee as Money.
    #[inline]
    pub fn shipping_fee(&self) -> Money {
        Money::from_cents(self.shipping_fee_cents)
    }
}

// =============================================================================
// Shipping Option
// =============================================================================

/// A shipping tier from the static catalog.
///
/// Not user-editable; the cart only stores the selected option's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    /// Stable identifier ("pickup", "standard", "express").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Flat fee in cents, charged once per seller group.
    pub fee_cents: i64,

    /// Delivery estimate label ("3-5 business days").
    pub delivery_estimate: String,

    /// Longer description for the checkout UI.
    pub description: String,
}

impl ShippingOption {
    /// Returns the flat fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }
}

// =============================================================================
// Promo Code
// =============================================================================

/// How a promo code discounts the order subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the order subtotal, in basis points (1000 = 10%).
    Percentage { bps: u32 },

    /// Fixed amount off, gated on a minimum order subtotal.
    FixedAmount {
        amount_cents: i64,
        min_subtotal_cents: i64,
    },
}

/// A discount token with a kind and an eligibility rule.
///
/// At most one promo code is active on an order at a time; applying a
/// second code replaces the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    /// Code string; matched case-insensitively against user input.
    pub code: String,

    /// Human description shown next to the applied discount.
    pub description: String,

    /// Discount kind and magnitude.
    pub kind: DiscountKind,
}

impl PromoCode {
    /// Checks whether user input matches this code.
    ///
    /// Input is trimmed and compared case-insensitively.
    pub fn matches(&self, input: &str) -> bool {
        self.code.eq_ignore_ascii_case(input.trim())
    }

    /// Checks eligibility against the current order subtotal.
    ///
    /// Only fixed-amount codes carry a minimum-subtotal threshold;
    /// percentage codes are always eligible.
    pub fn is_eligible(&self, subtotal: Money) -> bool {
        match self.kind {
            DiscountKind::Percentage { .. } => true,
            DiscountKind::FixedAmount {
                min_subtotal_cents, ..
            } => subtotal.cents() >= min_subtotal_cents,
        }
    }

    /// Computes the discount this code yields on the given subtotal.
    ///
    /// Fixed discounts are capped at the subtotal so the discount
    /// component alone can never push a total negative.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage { bps } => subtotal.percentage(bps),
            DiscountKind::FixedAmount { amount_cents, .. } => {
                Money::from_cents(amount_cents).min(subtotal)
            }
        }
    }

    /// Returns the minimum-subtotal threshold, if this code has one.
    pub fn min_subtotal(&self) -> Option<Money> {
        match self.kind {
            DiscountKind::Percentage { .. } => None,
            DiscountKind::FixedAmount {
                min_subtotal_cents, ..
            } => Some(Money::from_cents(min_subtotal_cents)),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The derived totals for the whole order.
///
/// ```text
/// subtotal   Σ(price × quantity) over all items
/// tax        fixed percentage of subtotal
/// shipping   Σ of each seller group's flat fee
/// discount   from the active promo code, zero if none
/// total      subtotal + tax + shipping − discount, floored at zero
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// All-zero totals (the empty cart).
    pub const fn zero() -> Self {
        OrderTotals {
            subtotal_cents: 0,
            tax_cents: 0,
            shipping_cents: 0,
            discount_cents: 0,
            total_cents: 0,
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

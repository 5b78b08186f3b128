//! # Cart Pricing Engine
//!
//! The cart: a flat list of seller-tagged line items plus two selection
//! parameters (shipping option, promo code), from which seller groups and
//! order totals are derived.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Pricing Engine                                │
//! │                                                                         │
//! │  Mutations                    State                 Derived views       │
//! │  ─────────                    ─────                 ─────────────       │
//! │  add_item        ──┐                            ┌─► group_by_seller()   │
//! │  set_quantity    ──┤     items: Vec<LineItem>   │   (per-seller         │
//! │  remove_item     ──┼──►  selected shipping   ───┤    subtotal+fee)      │
//! │  clear           ──┤     active promo           │                       │
//! │  select_shipping ──┤                            └─► compute_totals()    │
//! │  apply_promo     ──┘                                (subtotal, tax,     │
//! │        │                                             shipping, discount,│
//! │        ▼                                             grand total)       │
//! │  listeners notified synchronously after every mutation                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totality
//! Every operation except [`Cart::apply_promo_code`] is a total function:
//! unknown keys find no match and the call is a silent no-op. Quantity
//! inputs are the caller's responsibility to pre-validate (see
//! [`crate::validation`]); the engine only clamps to per-item caps.
//!
//! ## Persistence
//! The engine owns no I/O. The storage adapter calls
//! [`Cart::snapshot_items`] after each mutation and [`Cart::hydrate`] once
//! at session start; what crosses that boundary is a plain ordered list of
//! [`LineItem`]s.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::catalog::{self, DEFAULT_SHIPPING_ID};
use crate::error::PromoError;
use crate::money::Money;
use crate::types::{LineItem, OrderTotals, PromoCode, SellerGroup, ShippingOption, TaxRate};
use crate::DIRECT_SELLER_NAME;

/// Callback invoked synchronously after every mutating cart call, with the
/// cart's current item list.
pub type CartListener = Box<dyn Fn(&[LineItem]) + Send + Sync>;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one user session.
///
/// ## Invariants
/// - Lines are unique by (product id, seller id); adding the same pair
///   increases quantity instead of appending
/// - The sum of all seller-group subtotals equals the cart subtotal
/// - Recomputing totals without a mutation in between is idempotent
pub struct Cart {
    /// Line items in insertion order.
    items: Vec<LineItem>,

    /// Shipping tiers available to this cart.
    shipping_options: Vec<ShippingOption>,

    /// Promo codes available to this cart.
    promo_codes: Vec<PromoCode>,

    /// Id of the currently selected shipping option.
    selected_shipping_id: String,

    /// The single active promo, if any. Applying a new code replaces it.
    active_promo: Option<PromoCode>,

    /// Tax rate applied to the order subtotal.
    tax_rate: TaxRate,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,

    /// Observers notified after each mutation.
    listeners: Vec<CartListener>,
}

impl Cart {
    /// Creates a new empty cart with the default catalogs and tax rate.
    pub fn new() -> Self {
        Cart::with_catalogs(
            catalog::default_shipping_options(),
            catalog::default_promo_codes(),
            TaxRate::default(),
        )
    }

    /// Creates a new empty cart with explicit catalogs.
    ///
    /// Used by tests and by deployments that load catalogs from the
    /// backend instead of the built-in defaults.
    pub fn with_catalogs(
        shipping_options: Vec<ShippingOption>,
        promo_codes: Vec<PromoCode>,
        tax_rate: TaxRate,
    ) -> Self {
        Cart {
            items: Vec::new(),
            shipping_options,
            promo_codes,
            selected_shipping_id: DEFAULT_SHIPPING_ID.to_string(),
            active_promo: None,
            tax_rate,
            created_at: Utc::now(),
            listeners: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    /// Returns the current line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart subtotal (before tax, shipping, discount).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Returns the currently selected shipping option, if the selected id
    /// is present in the catalog.
    pub fn selected_shipping(&self) -> Option<&ShippingOption> {
        catalog::find_shipping(&self.shipping_options, &self.selected_shipping_id)
    }

    /// Returns the shipping catalog.
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.shipping_options
    }

    /// Returns the active promo code, if any.
    pub fn active_promo(&self) -> Option<&PromoCode> {
        self.active_promo.as_ref()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Same product id AND same seller id already in cart: quantity
    ///   increases by `quantity`
    /// - Otherwise: the item is appended with the given quantity
    /// - Quantities are clamped to the item's `max_quantity` cap, if set
    ///
    /// The `quantity` field on the passed item descriptor is ignored; the
    /// explicit argument wins. Non-positive quantities are not rejected
    /// here; callers pre-validate (see [`crate::validation`]).
    pub fn add_item(&mut self, item: LineItem, quantity: i64) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&item.id, item.seller_id.as_deref()))
        {
            existing.quantity = existing.clamp_to_cap(existing.quantity + quantity);
        } else {
            let mut item = item;
            item.quantity = item.clamp_to_cap(quantity);
            self.items.push(item);
        }
        self.notify_listeners();
    }

    /// Removes every line matching both keys.
    ///
    /// Silent no-op when nothing matches; there is deliberately no
    /// "item not found" error.
    pub fn remove_item(&mut self, product_id: &str, seller_id: Option<&str>) {
        self.items.retain(|i| !i.matches(product_id, seller_id));
        self.notify_listeners();
    }

    /// Overwrites the quantity of the matching line.
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: behaves as [`Cart::remove_item`]
    /// - No matching line: silent no-op
    /// - Otherwise: quantity overwritten, clamped to the item's cap
    pub fn set_quantity(&mut self, product_id: &str, seller_id: Option<&str>, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, seller_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.matches(product_id, seller_id))
        {
            item.quantity = item.clamp_to_cap(quantity);
        }
        self.notify_listeners();
    }

    /// Clears all items from the cart unconditionally.
    ///
    /// The shipping selection and active promo survive a clear; a promo on
    /// an empty cart simply discounts nothing.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
        self.notify_listeners();
    }

    /// Selects a shipping option from the catalog.
    ///
    /// Unknown ids find no match and leave the selection unchanged, in
    /// line with the engine's total-function semantics.
    pub fn select_shipping(&mut self, option_id: &str) {
        if catalog::find_shipping(&self.shipping_options, option_id).is_some() {
            self.selected_shipping_id = option_id.to_string();
            self.notify_listeners();
        }
    }

    /// Applies a promo code to the order.
    ///
    /// ## Errors
    /// - [`PromoError::InvalidPromoCode`]: no catalog entry matches
    ///   (case-insensitive)
    /// - [`PromoError::PromoNotEligible`]: a fixed-amount code's
    ///   minimum-subtotal threshold is not met by the current subtotal
    ///
    /// On success the code becomes the single active promo, replacing any
    /// previous one (promos never stack). On error the cart is unchanged.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<(), PromoError> {
        let promo = catalog::find_promo(&self.promo_codes, code)
            .ok_or_else(|| PromoError::InvalidPromoCode(code.trim().to_string()))?;

        let subtotal = self.subtotal();
        if !promo.is_eligible(subtotal) {
            return Err(PromoError::PromoNotEligible {
                code: promo.code.clone(),
                // min_subtotal is always present here: percentage codes
                // are unconditionally eligible
                min_subtotal: promo.min_subtotal().unwrap_or(Money::zero()),
                subtotal,
            });
        }

        self.active_promo = Some(promo.clone());
        self.notify_listeners();
        Ok(())
    }

    /// Clears the active promo, if any. Idempotent.
    pub fn remove_promo_code(&mut self) {
        self.active_promo = None;
        self.notify_listeners();
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Partitions the items into seller groups, in first-appearance order.
    ///
    /// Every item lands in exactly one group. Items with no seller id form
    /// one group under the marketplace-direct sentinel name. Each group
    /// carries the selected shipping option's flat fee, so total shipping
    /// scales with the number of distinct sellers rather than items.
    pub fn group_by_seller(&self) -> Vec<SellerGroup> {
        let (fee_cents, delivery_estimate) = match self.selected_shipping() {
            Some(option) => (option.fee_cents, option.delivery_estimate.clone()),
            None => (0, String::new()),
        };

        let mut groups: Vec<SellerGroup> = Vec::new();
        for item in &self.items {
            let key = item.seller_id.as_deref();
            if let Some(group) = groups.iter_mut().find(|g| g.seller_id.as_deref() == key) {
                group.subtotal_cents += item.line_total().cents();
                group.items.push(item.clone());
            } else {
                groups.push(SellerGroup {
                    seller_id: item.seller_id.clone(),
                    seller_name: item
                        .seller_name
                        .clone()
                        .or_else(|| item.seller_id.clone())
                        .unwrap_or_else(|| DIRECT_SELLER_NAME.to_string()),
                    subtotal_cents: item.line_total().cents(),
                    shipping_fee_cents: fee_cents,
                    delivery_estimate: delivery_estimate.clone(),
                    items: vec![item.clone()],
                });
            }
        }
        groups
    }

    /// Counts distinct sellers currently in the cart.
    fn distinct_seller_count(&self) -> i64 {
        let mut seen: Vec<Option<&str>> = Vec::new();
        for item in &self.items {
            let key = item.seller_id.as_deref();
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen.len() as i64
    }

    /// Computes the order totals.
    ///
    /// Pure over (items, selected shipping, active promo): calling this
    /// twice without a mutation in between returns identical results.
    ///
    /// ```text
    /// subtotal   Σ(price × quantity)
    /// tax        subtotal × tax rate
    /// shipping   selected fee × distinct sellers
    /// discount   percentage: subtotal × bps/10000
    ///            fixed:      min(amount, subtotal)
    /// total      max(0, subtotal + tax + shipping − discount)
    /// ```
    pub fn compute_totals(&self) -> OrderTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(self.tax_rate);

        let fee = self
            .selected_shipping()
            .map(|o| o.fee())
            .unwrap_or_else(Money::zero);
        let shipping = fee.multiply_quantity(self.distinct_seller_count());

        let discount = self
            .active_promo
            .as_ref()
            .map(|p| p.discount_for(subtotal))
            .unwrap_or_else(Money::zero);

        let total = (subtotal + tax + shipping - discount).clamp_non_negative();

        OrderTotals {
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            shipping_cents: shipping.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
        }
    }

    /// The totals read handed off to the checkout workflow.
    ///
    /// The engine has no knowledge of payment processing; this is the
    /// entire checkout boundary.
    pub fn snapshot_for_checkout(&self) -> OrderTotals {
        self.compute_totals()
    }

    // -------------------------------------------------------------------------
    // Persistence contract points
    // -------------------------------------------------------------------------

    /// Returns a copy of the item list for the storage adapter to save.
    pub fn snapshot_items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Replaces the item list with a previously saved snapshot.
    ///
    /// Called once at session start by the surrounding application.
    /// Listeners are notified, mirroring the load-time emission the UI
    /// relies on to render the restored cart.
    pub fn hydrate(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.notify_listeners();
    }

    // -------------------------------------------------------------------------
    // Observer contract
    // -------------------------------------------------------------------------

    /// Registers a listener invoked synchronously after every mutating
    /// call, with the current item list.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&[LineItem]) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify_listeners(&self) {
        for listener in &self.listeners {
            listener(&self.items);
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

/// Listeners are opaque closures, so Debug shows only their count.
impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("selected_shipping_id", &self.selected_shipping_id)
            .field("active_promo", &self.active_promo)
            .field("tax_rate", &self.tax_rate)
            .field("created_at", &self.created_at)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn item(id: &str, seller: Option<&str>, price_cents: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            quantity: 0, // overwritten by add_item
            seller_id: seller.map(String::from),
            seller_name: seller.map(|s| format!("Pharmacy {}", s)),
            max_quantity: None,
        }
    }

    /// Cart with the default catalogs but zero tax, so expected totals
    /// in tests are plain subtotal/shipping/discount arithmetic.
    fn untaxed_cart() -> Cart {
        Cart::with_catalogs(
            catalog::default_shipping_options(),
            catalog::default_promo_codes(),
            TaxRate::zero(),
        )
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 9100);
    }

    #[test]
    fn test_add_same_product_same_seller_merges() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 2);
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_same_product_different_seller_stays_separate() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 1);
        cart.add_item(item("amoxi-500", Some("ph-2"), 4300), 1);
        cart.add_item(item("amoxi-500", None, 4999), 1);

        assert_eq!(cart.line_count(), 3);
    }

    #[test]
    fn test_add_respects_max_quantity_cap() {
        let mut capped = item("insulin-pen", Some("ph-1"), 120000);
        capped.max_quantity = Some(2);

        let mut cart = Cart::new();
        cart.add_item(capped.clone(), 1);
        cart.add_item(capped, 5);

        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_item_is_total() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 1);

        // No-op, not an error
        cart.remove_item("amoxi-500", Some("ph-2"));
        cart.remove_item("missing", None);
        assert_eq!(cart.line_count(), 1);

        cart.remove_item("amoxi-500", Some("ph-1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 3);

        cart.set_quantity("amoxi-500", Some("ph-1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add_item(item("amoxi-500", Some("ph-1"), 4550), 3);

        cart.set_quantity("amoxi-500", Some("ph-1"), 7);
        assert_eq!(cart.items()[0].quantity, 7);

        // Unknown key: silent no-op
        cart.set_quantity("missing", None, 5);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        // Two different mutation sequences ending in the same multiset
        let mut a = Cart::new();
        a.add_item(item("p1", Some("s1"), 1000), 2);
        a.add_item(item("p2", None, 500), 1);
        a.add_item(item("p1", Some("s1"), 1000), 1);

        let mut b = Cart::new();
        b.add_item(item("p2", None, 500), 4);
        b.add_item(item("p1", Some("s1"), 1000), 3);
        b.set_quantity("p2", None, 1);

        assert_eq!(a.subtotal(), b.subtotal());
        assert_eq!(a.subtotal().cents(), 3500);
    }

    #[test]
    fn test_grouping_is_exhaustive_and_disjoint() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", Some("s1"), 1000), 1);
        cart.add_item(item("p2", None, 500), 2);
        cart.add_item(item("p3", Some("s2"), 700), 1);
        cart.add_item(item("p4", Some("s1"), 300), 3);
        cart.add_item(item("p5", None, 250), 1);

        let groups = cart.group_by_seller();

        // First-appearance order: s1, direct, s2
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].seller_id.as_deref(), Some("s1"));
        assert_eq!(groups[1].seller_id, None);
        assert_eq!(groups[1].seller_name, crate::DIRECT_SELLER_NAME);
        assert_eq!(groups[2].seller_id.as_deref(), Some("s2"));

        // Exhaustive and disjoint: every line in exactly one group
        let grouped_lines: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(grouped_lines, cart.line_count());

        // Σ group subtotals = cart subtotal
        let group_sum: i64 = groups.iter().map(|g| g.subtotal_cents).sum();
        assert_eq!(group_sum, cart.subtotal().cents());
    }

    #[test]
    fn test_shipping_scales_with_sellers_not_items() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 10000), 1);
        cart.add_item(item("p2", Some("s1"), 2000), 4);
        cart.add_item(item("p3", Some("s2"), 5000), 1);

        // Standard: 25.00 per seller group, 2 groups → 50.00
        cart.select_shipping("standard");
        assert_eq!(cart.compute_totals().shipping_cents, 5000);

        // Pickup: free regardless of group count
        cart.select_shipping("pickup");
        assert_eq!(cart.compute_totals().shipping_cents, 0);
    }

    #[test]
    fn test_select_shipping_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.select_shipping("express");
        cart.select_shipping("drone");
        assert_eq!(cart.selected_shipping().unwrap().id, "express");
    }

    #[test]
    fn test_percentage_promo_applies_and_removes() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 30000), 1); // subtotal 300.00

        cart.apply_promo_code("PHARMA10").unwrap();
        assert_eq!(cart.compute_totals().discount_cents, 3000); // 30.00

        cart.remove_promo_code();
        assert_eq!(cart.compute_totals().discount_cents, 0);

        // Idempotent
        cart.remove_promo_code();
        assert_eq!(cart.compute_totals().discount_cents, 0);
    }

    #[test]
    fn test_invalid_promo_code() {
        let mut cart = Cart::new();
        let err = cart.apply_promo_code("BOGUS").unwrap_err();
        assert_eq!(err, PromoError::InvalidPromoCode("BOGUS".to_string()));
        assert!(cart.active_promo().is_none());
    }

    #[test]
    fn test_fixed_promo_eligibility_threshold() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 15000), 1); // subtotal 150.00

        // SAVE50 requires 200.00
        let err = cart.apply_promo_code("SAVE50").unwrap_err();
        assert!(matches!(err, PromoError::PromoNotEligible { .. }));
        assert!(cart.active_promo().is_none());

        cart.add_item(item("p2", Some("s1"), 10000), 1); // subtotal 250.00
        cart.apply_promo_code("SAVE50").unwrap();
        assert_eq!(cart.compute_totals().discount_cents, 5000);
    }

    #[test]
    fn test_promo_replaces_never_stacks() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 30000), 1);

        cart.apply_promo_code("PHARMA10").unwrap();
        cart.apply_promo_code("WELCOME15").unwrap();

        assert_eq!(cart.active_promo().unwrap().code, "WELCOME15");
        assert_eq!(cart.compute_totals().discount_cents, 4500); // 15%, not 25%
    }

    #[test]
    fn test_clear_yields_zero_totals() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", Some("s1"), 4550), 2);
        cart.add_item(item("p2", None, 999), 1);
        cart.apply_promo_code("PHARMA10").unwrap();

        cart.clear();
        let totals = cart.compute_totals();

        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.shipping_cents, 0);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 0);
        assert_eq!(totals, OrderTotals::zero());
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", Some("s1"), 4550), 3);
        cart.add_item(item("p2", Some("s2"), 12000), 1);
        cart.select_shipping("express");
        cart.apply_promo_code("PHARMA10").unwrap();

        let first = cart.compute_totals();
        let second = cart.compute_totals();
        assert_eq!(first, second);
        assert_eq!(first, cart.snapshot_for_checkout());
    }

    #[test]
    fn test_grand_total_arithmetic() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 30000), 1); // subtotal 300.00
        cart.select_shipping("standard"); // 1 seller → 25.00
        cart.apply_promo_code("PHARMA10").unwrap(); // 30.00 off

        let totals = cart.compute_totals();
        assert_eq!(totals.total_cents, 30000 + 0 + 2500 - 3000);
    }

    #[test]
    fn test_grand_total_never_negative() {
        let mut cart = untaxed_cart();
        cart.add_item(item("p1", Some("s1"), 21000), 1); // subtotal 210.00
        cart.select_shipping("pickup");
        cart.apply_promo_code("SAVE50").unwrap();

        // Shrink the cart after applying: discount clamps to subtotal
        cart.set_quantity("p1", Some("s1"), 0);
        cart.add_item(item("p2", Some("s1"), 1000), 1); // subtotal 10.00

        let totals = cart.compute_totals();
        assert_eq!(totals.discount_cents, 1000);
        assert_eq!(totals.total_cents, 0);
        assert!(totals.total_cents >= 0);
    }

    #[test]
    fn test_tax_is_percentage_of_subtotal() {
        let mut cart = Cart::with_catalogs(
            catalog::default_shipping_options(),
            catalog::default_promo_codes(),
            TaxRate::from_bps(1400),
        );
        cart.add_item(item("p1", Some("s1"), 10000), 1);

        assert_eq!(cart.compute_totals().tax_cents, 1400);
    }

    #[test]
    fn test_listeners_notified_after_mutations() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut cart = Cart::new();
        cart.subscribe(move |_items| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(item("p1", Some("s1"), 1000), 1); // 1
        cart.set_quantity("p1", Some("s1"), 2); // 2
        cart.select_shipping("express"); // 3
        cart.remove_promo_code(); // 4
        cart.clear(); // 5

        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_hydrate_restores_and_notifies() {
        let mut original = Cart::new();
        original.add_item(item("p1", Some("s1"), 4550), 2);
        original.add_item(item("p2", None, 999), 1);
        let snapshot = original.snapshot_items();

        let notified = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notified);

        let mut restored = Cart::new();
        restored.subscribe(move |items| {
            seen.store(items.len(), Ordering::SeqCst);
        });
        restored.hydrate(snapshot);

        assert_eq!(restored.line_count(), 2);
        assert_eq!(restored.subtotal(), original.subtotal());
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }
}

//! # Static Catalogs
//!
//! The shipping tiers and promo codes offered by the marketplace.
//!
//! Both catalogs are fixed at build time and not user-editable; the cart
//! only ever stores a selected shipping id and an applied promo code. A
//! future admin surface could load these from the backend instead, which is
//! why the [`Cart`](crate::cart::Cart) takes them as plain `Vec`s rather
//! than reaching for these functions directly.

use crate::money::Money;
use crate::types::{DiscountKind, PromoCode, ShippingOption};

// =============================================================================
// Shipping Catalog
// =============================================================================

/// Id of the default shipping selection for a fresh cart.
pub const DEFAULT_SHIPPING_ID: &str = "standard";

/// Returns the marketplace's shipping tiers.
///
/// The flat fee is charged once per seller group: an order spanning three
/// pharmacies on "standard" pays three times the standard fee.
pub fn default_shipping_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption {
            id: "pickup".to_string(),
            name: "Pharmacy Pickup".to_string(),
            fee_cents: 0,
            delivery_estimate: "Same day".to_string(),
            description: "Collect your order at each pharmacy's counter".to_string(),
        },
        ShippingOption {
            id: "standard".to_string(),
            name: "Standard Delivery".to_string(),
            fee_cents: 2500,
            delivery_estimate: "3-5 business days".to_string(),
            description: "Courier delivery, one parcel per pharmacy".to_string(),
        },
        ShippingOption {
            id: "express".to_string(),
            name: "Express Delivery".to_string(),
            fee_cents: 5000,
            delivery_estimate: "1-2 business days".to_string(),
            description: "Priority courier delivery, one parcel per pharmacy".to_string(),
        },
    ]
}

/// Looks up a shipping option by id.
pub fn find_shipping<'a>(options: &'a [ShippingOption], id: &str) -> Option<&'a ShippingOption> {
    options.iter().find(|o| o.id == id)
}

// =============================================================================
// Promo Catalog
// =============================================================================

/// Returns the marketplace's active promo codes.
pub fn default_promo_codes() -> Vec<PromoCode> {
    vec![
        PromoCode {
            code: "PHARMA10".to_string(),
            description: "10% off your order".to_string(),
            kind: DiscountKind::Percentage { bps: 1000 },
        },
        PromoCode {
            code: "WELCOME15".to_string(),
            description: "15% off for new customers".to_string(),
            kind: DiscountKind::Percentage { bps: 1500 },
        },
        PromoCode {
            code: "SAVE50".to_string(),
            description: "50.00 off orders over 200.00".to_string(),
            kind: DiscountKind::FixedAmount {
                amount_cents: 5000,
                min_subtotal_cents: 20000,
            },
        },
        PromoCode {
            code: "SAVE120".to_string(),
            description: "120.00 off orders over 600.00".to_string(),
            kind: DiscountKind::FixedAmount {
                amount_cents: 12000,
                min_subtotal_cents: 60000,
            },
        },
    ]
}

/// Looks up a promo code by user input, case-insensitively.
pub fn find_promo<'a>(promos: &'a [PromoCode], input: &str) -> Option<&'a PromoCode> {
    promos.iter().find(|p| p.matches(input))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_catalog_contains_default() {
        let options = default_shipping_options();
        let standard = find_shipping(&options, DEFAULT_SHIPPING_ID).unwrap();
        assert_eq!(standard.fee(), Money::from_cents(2500));
    }

    #[test]
    fn test_pickup_is_free() {
        let options = default_shipping_options();
        let pickup = find_shipping(&options, "pickup").unwrap();
        assert!(pickup.fee().is_zero());
    }

    #[test]
    fn test_find_shipping_unknown_id() {
        let options = default_shipping_options();
        assert!(find_shipping(&options, "drone").is_none());
        // Shipping ids are exact; only promo lookup is case-insensitive
        assert!(find_shipping(&options, "STANDARD").is_none());
    }

    #[test]
    fn test_find_promo_case_insensitive() {
        let promos = default_promo_codes();
        assert!(find_promo(&promos, "save50").is_some());
        assert!(find_promo(&promos, " Pharma10 ").is_some());
        assert!(find_promo(&promos, "BOGUS").is_none());
    }
}

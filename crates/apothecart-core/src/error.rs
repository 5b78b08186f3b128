//! # Error Types
//!
//! Domain-specific error types for apothecart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  apothecart-core errors (this file)                                     │
//! │  ├── PromoError       - Promo code application failures                 │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── CartError        - Umbrella for the two above                      │
//! │                                                                         │
//! │  apothecart-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures                            │
//! │                                                                         │
//! │  apothecart-session errors (separate crate)                             │
//! │  └── SessionError     - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: PromoError/ValidationError → CartError → SessionError → UI      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, thresholds)
//! 3. Errors are enum variants, never String
//! 4. Every cart operation except promo application is total; the engine
//!    has no "item not found" error by design

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Promo Error
// =============================================================================

/// The only failure modes of the pricing engine, both raised exclusively
/// by promo code application. Both are recoverable at the call site: cart
/// state is left untouched and the UI displays the condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The supplied code matches no entry in the promo catalog.
    #[error("Unknown promo code: {0}")]
    InvalidPromoCode(String),

    /// The code matched but its minimum-subtotal precondition failed.
    ///
    /// Only fixed-amount codes carry a threshold; percentage codes are
    /// always eligible.
    #[error("Promo code {code} requires a minimum order of {min_subtotal}, cart is at {subtotal}")]
    PromoNotEligible {
        code: String,
        min_subtotal: Money,
        subtotal: Money,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine itself never validates: its operations are total and callers
/// pre-validate. These errors come from the [`crate::validation`] helpers
/// used by the session layer before an engine call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad characters, malformed id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Cart Error
// =============================================================================

/// Umbrella error for cart operations, used by layers that funnel both
/// promo failures and caller-side validation through one type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Promo code application failed.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Input validation failed before the engine was called.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_error_messages() {
        let err = PromoError::InvalidPromoCode("BOGUS".to_string());
        assert_eq!(err.to_string(), "Unknown promo code: BOGUS");

        let err = PromoError::PromoNotEligible {
            code: "SAVE50".to_string(),
            min_subtotal: Money::from_cents(20000),
            subtotal: Money::from_cents(15000),
        };
        assert_eq!(
            err.to_string(),
            "Promo code SAVE50 requires a minimum order of 200.00, cart is at 150.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_promo_converts_to_cart_error() {
        let promo_err = PromoError::InvalidPromoCode("BOGUS".to_string());
        let cart_err: CartError = promo_err.into();
        assert!(matches!(cart_err, CartError::Promo(_)));
    }
}

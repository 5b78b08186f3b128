//! # Session Error Type
//!
//! Unified error type for session-level cart operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Apothecart                             │
//! │                                                                         │
//! │  Frontend                     Rust Backend                              │
//! │  ────────                     ────────────                              │
//! │                                                                         │
//! │  session.applyPromo('SAVE50')                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CartSession method                                              │  │
//! │  │  Result<CartView, SessionError>                                  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation failed? ── ValidationError ──┐                       │  │
//! │  │  Promo rejected?    ── PromoError ───────┼──► SessionError ────► │  │
//! │  │  Save failed?       ── StoreError ───────┘                       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "PROMO_NOT_ELIGIBLE",                                        │
//! │    "message": "Promo code SAVE50 requires a minimum order of 200.00" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The error is `Serialize` so any IPC surface (HTTP handler, Tauri
//! command, WASM binding) can forward it verbatim. The UI is expected to
//! display the condition and leave cart state untouched; no session error
//! leaves a partially-applied mutation behind.

use serde::Serialize;

use apothecart_core::{CartError, PromoError, ValidationError};
use apothecart_store::StoreError;

/// Session error returned from cart session operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_PROMO_CODE",
///   "message": "Unknown promo code: BOGUS"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await session.applyPromo(input);
/// } catch (e) {
///   switch (e.code) {
///     case 'INVALID_PROMO_CODE':
///     case 'PROMO_NOT_ELIGIBLE':
///       showPromoHint(e.message);
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Promo code matched no catalog entry
    InvalidPromoCode,

    /// Promo code matched but its eligibility rule failed
    PromoNotEligible,

    /// Input validation failed before the engine was called
    ValidationError,

    /// Persistence failed
    StorageError,

    /// Internal error
    Internal,
}

impl SessionError {
    /// Creates a new session error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SessionError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::Internal, message)
    }
}

/// Converts promo errors to session errors.
impl From<PromoError> for SessionError {
    fn from(err: PromoError) -> Self {
        let code = match err {
            PromoError::InvalidPromoCode(_) => ErrorCode::InvalidPromoCode,
            PromoError::PromoNotEligible { .. } => ErrorCode::PromoNotEligible,
        };
        SessionError::new(code, err.to_string())
    }
}

/// Converts validation errors to session errors.
impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.to_string())
    }
}

/// Converts the core umbrella error to session errors.
impl From<CartError> for SessionError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Promo(e) => e.into(),
            CartError::Validation(e) => e.into(),
        }
    }
}

/// Converts storage errors to session errors.
///
/// The raw cause is logged; the frontend gets a generic message so
/// internal paths and SQL details never leak to the UI.
impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Cart persistence failed: {}", err);
        SessionError::new(ErrorCode::StorageError, "Cart could not be saved")
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_error_codes() {
        let err: SessionError = PromoError::InvalidPromoCode("BOGUS".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidPromoCode);
        assert!(err.message.contains("BOGUS"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = SessionError::validation("quantity must be positive");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "quantity must be positive");
    }

    #[test]
    fn test_storage_errors_are_masked() {
        let err: SessionError = StoreError::QueryFailed("secret.db broke".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("secret"));
    }
}

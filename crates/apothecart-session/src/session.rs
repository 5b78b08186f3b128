//! # Cart Session
//!
//! One pricing engine per user session, wired to the storage adapter.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Session Lifecycle                             │
//! │                                                                         │
//! │  CartSession::open(store, cart_id)                                     │
//! │       │                                                                 │
//! │       ├── store.carts().load(cart_id)  ← once at startup               │
//! │       └── cart.hydrate(items)                                          │
//! │                                                                         │
//! │  session.add_item(...) / update_quantity / apply_promo / ...           │
//! │       │                                                                 │
//! │       ├── pre-validate input (core validation module)                  │
//! │       ├── mutate the engine under the Mutex                            │
//! │       ├── store.carts().save(cart_id, snapshot)  ← after EVERY         │
//! │       │                                             mutation           │
//! │       └── return CartView { items, groups, totals }                    │
//! │                                                                         │
//! │  session.checkout_snapshot()                                           │
//! │       └── OrderTotals handed to the payment workflow                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The engine is wrapped in `Arc<Mutex<Cart>>`: operations from
//! concurrent request handlers serialize on the lock, and the lock is
//! released before any await point so the guard never crosses I/O.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use apothecart_core::cart::Cart;
use apothecart_core::{validation, LineItem, OrderTotals, SellerGroup};
use apothecart_store::CartStore;

use crate::error::SessionResult;

// =============================================================================
// Cart View
// =============================================================================

/// Cart response handed to the frontend after every operation: the raw
/// items plus both derived views, so the UI never recomputes pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub groups: Vec<SellerGroup>,
    pub totals: OrderTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.snapshot_items(),
            groups: cart.group_by_seller(),
            totals: cart.compute_totals(),
        }
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// One user session's cart: the engine plus save-through persistence.
///
/// Cloneable; clones share the same engine and cart id.
#[derive(Debug, Clone)]
pub struct CartSession {
    cart: Arc<Mutex<Cart>>,
    store: CartStore,
    cart_id: String,
}

impl CartSession {
    /// Opens a session for an existing (or brand new) cart id.
    ///
    /// Loads the persisted snapshot once and hydrates the engine; a cart
    /// id that was never saved starts empty.
    pub async fn open(store: CartStore, cart_id: impl Into<String>) -> SessionResult<Self> {
        let cart_id = cart_id.into();
        debug!(cart_id = %cart_id, "Opening cart session");

        let items = store.carts().load(&cart_id).await?;

        let mut cart = Cart::new();
        cart.hydrate(items);

        Ok(CartSession {
            cart: Arc::new(Mutex::new(cart)),
            store,
            cart_id,
        })
    }

    /// Opens a session with a freshly generated cart id.
    pub async fn open_new(store: CartStore) -> SessionResult<Self> {
        CartSession::open(store, Uuid::new_v4().to_string()).await
    }

    /// Returns the session's cart id.
    pub fn cart_id(&self) -> &str {
        &self.cart_id
    }

    /// Executes a function with read access to the engine.
    fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the engine, then returns
    /// the snapshot to persist alongside the caller's result.
    fn with_cart_mut<F, R>(&self, f: F) -> (Vec<LineItem>, R)
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        let result = f(&mut cart);
        (cart.snapshot_items(), result)
    }

    /// Persists a snapshot. Called after every successful mutation.
    async fn persist(&self, snapshot: &[LineItem]) -> SessionResult<()> {
        self.store.carts().save(&self.cart_id, snapshot).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Returns the current cart view without mutating anything.
    pub fn view(&self) -> CartView {
        self.with_cart(|cart| CartView::from(cart))
    }

    /// The totals read handed off to the payment/order-creation workflow.
    pub fn checkout_snapshot(&self) -> OrderTotals {
        self.with_cart(|cart| cart.snapshot_for_checkout())
    }

    // -------------------------------------------------------------------------
    // Mutations (validate → engine → save → view)
    // -------------------------------------------------------------------------

    /// Adds a product to the cart.
    ///
    /// ## Validation
    /// The engine's operations are total, so everything the original UI
    /// would have screened is screened here: positive bounded quantity,
    /// non-negative price, non-empty product id, cart line limit.
    pub async fn add_item(&self, item: LineItem, quantity: i64) -> SessionResult<CartView> {
        debug!(product_id = %item.id, quantity, "add_item");

        validation::validate_product_id(&item.id)?;
        validation::validate_price_cents(item.price_cents)?;
        validation::validate_quantity(quantity)?;

        let (snapshot, view) = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");

            // The line limit only gates genuinely new lines; merging
            // into an existing line is always allowed
            let merges = cart
                .items()
                .iter()
                .any(|i| i.matches(&item.id, item.seller_id.as_deref()));
            if !merges {
                validation::validate_cart_size(cart.line_count())?;
            }

            cart.add_item(item, quantity);
            (cart.snapshot_items(), CartView::from(&*cart))
        };

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Overwrites a line's quantity; zero or below removes the line.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        seller_id: Option<&str>,
        quantity: i64,
    ) -> SessionResult<CartView> {
        debug!(product_id = %product_id, quantity, "update_quantity");

        // Zero and below means removal; only positive values are bounded
        if quantity > 0 {
            validation::validate_quantity(quantity)?;
        }

        let (snapshot, view) = self.with_cart_mut(|cart| {
            cart.set_quantity(product_id, seller_id, quantity);
            CartView::from(&*cart)
        });

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Removes a line from the cart.
    pub async fn remove_item(
        &self,
        product_id: &str,
        seller_id: Option<&str>,
    ) -> SessionResult<CartView> {
        debug!(product_id = %product_id, "remove_item");

        let (snapshot, view) = self.with_cart_mut(|cart| {
            cart.remove_item(product_id, seller_id);
            CartView::from(&*cart)
        });

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Clears the whole cart.
    pub async fn clear(&self) -> SessionResult<CartView> {
        debug!("clear");

        let (snapshot, view) = self.with_cart_mut(|cart| {
            cart.clear();
            CartView::from(&*cart)
        });

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Selects a shipping option for the order.
    ///
    /// Unknown ids are a no-op in the engine; the returned view simply
    /// still shows the previous selection's fees.
    pub async fn select_shipping(&self, option_id: &str) -> SessionResult<CartView> {
        debug!(option_id = %option_id, "select_shipping");

        let (snapshot, view) = self.with_cart_mut(|cart| {
            cart.select_shipping(option_id);
            CartView::from(&*cart)
        });

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Applies a promo code to the order.
    ///
    /// On failure the cart is untouched and nothing is persisted; the
    /// two promo error conditions map to their own error codes for the
    /// UI.
    pub async fn apply_promo(&self, code: &str) -> SessionResult<CartView> {
        debug!(code = %code, "apply_promo");

        validation::validate_promo_input(code)?;

        let (snapshot, result) = self.with_cart_mut(|cart| {
            cart.apply_promo_code(code).map(|_| CartView::from(&*cart))
        });
        let view = result?;

        self.persist(&snapshot).await?;
        Ok(view)
    }

    /// Removes the active promo, if any. Idempotent.
    pub async fn remove_promo(&self) -> SessionResult<CartView> {
        debug!("remove_promo");

        let (snapshot, view) = self.with_cart_mut(|cart| {
            cart.remove_promo_code();
            CartView::from(&*cart)
        });

        self.persist(&snapshot).await?;
        Ok(view)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

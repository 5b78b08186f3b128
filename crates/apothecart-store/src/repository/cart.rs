//! # Cart Repository
//!
//! Persistence of cart line item lists.
//!
//! ## Save Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Replace-All Writes                                  │
//! │                                                                         │
//! │  The engine hands over its full item snapshot after every mutation,    │
//! │  so the repository never patches rows:                                 │
//! │                                                                         │
//! │  save("session-42", items)                                             │
//! │    BEGIN                                                                │
//! │      DELETE FROM cart_items WHERE cart_id = 'session-42'               │
//! │      INSERT ... position 0                                             │
//! │      INSERT ... position 1                                             │
//! │      ...                                                                │
//! │    COMMIT                                                               │
//! │                                                                         │
//! │  A crash mid-save leaves the previous snapshot intact.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use apothecart_core::LineItem;

/// Row shape for the `cart_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CartItemRow {
    product_id: String,
    name: String,
    price_cents: i64,
    quantity: i64,
    seller_id: Option<String>,
    seller_name: Option<String>,
    max_quantity: Option<i64>,
}

impl From<CartItemRow> for LineItem {
    fn from(row: CartItemRow) -> Self {
        LineItem {
            id: row.product_id,
            name: row.name,
            price_cents: row.price_cents,
            quantity: row.quantity,
            seller_id: row.seller_id,
            seller_name: row.seller_name,
            max_quantity: row.max_quantity,
        }
    }
}

/// Repository for cart persistence operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads a cart's line items in saved order.
    ///
    /// A cart that has never been saved is an empty list, not an error.
    pub async fn load(&self, cart_id: &str) -> StoreResult<Vec<LineItem>> {
        debug!(cart_id = %cart_id, "Loading cart items");

        let rows: Vec<CartItemRow> = sqlx::query_as(
            r#"
            SELECT
                product_id,
                name,
                price_cents,
                quantity,
                seller_id,
                seller_name,
                max_quantity
            FROM cart_items
            WHERE cart_id = ?1
            ORDER BY position
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    /// Saves a cart's full item snapshot, replacing any previous rows.
    ///
    /// Runs in a single transaction: either the new snapshot lands
    /// completely or the old one survives.
    pub async fn save(&self, cart_id: &str, items: &[LineItem]) -> StoreResult<()> {
        debug!(cart_id = %cart_id, lines = items.len(), "Saving cart snapshot");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        let now = Utc::now();
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (
                    cart_id, position, product_id, name,
                    price_cents, quantity, seller_id, seller_name,
                    max_quantity, saved_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(cart_id)
            .bind(position as i64)
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.price_cents)
            .bind(item.quantity)
            .bind(item.seller_id.as_deref())
            .bind(item.seller_name.as_deref())
            .bind(item.max_quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Deletes a cart's rows entirely.
    ///
    /// Equivalent to `save(cart_id, &[])` but without the insert loop;
    /// used when a session is torn down for good.
    pub async fn delete(&self, cart_id: &str) -> StoreResult<()> {
        debug!(cart_id = %cart_id, "Deleting cart");

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(cart_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts the stored lines for a cart.
    pub async fn line_count(&self, cart_id: &str) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE cart_id = ?1")
                .bind(cart_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{CartStore, StoreConfig};

    fn item(id: &str, seller: Option<&str>, price_cents: i64, qty: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            quantity: qty,
            seller_id: seller.map(String::from),
            seller_name: seller.map(|s| format!("Pharmacy {}", s)),
            max_quantity: None,
        }
    }

    async fn test_store() -> CartStore {
        CartStore::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_unsaved_cart_is_empty() {
        let store = test_store().await;
        let items = store.carts().load("never-saved").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip_preserves_order_and_fields() {
        let store = test_store().await;
        let repo = store.carts();

        let mut capped = item("insulin-pen", Some("ph-2"), 120000, 1);
        capped.max_quantity = Some(2);

        let items = vec![
            item("amoxi-500", Some("ph-1"), 4550, 2),
            item("vitc-1000", None, 999, 5),
            capped,
        ];

        repo.save("session-42", &items).await.unwrap();
        let loaded = repo.load("session-42").await.unwrap();

        assert_eq!(loaded, items);
        assert_eq!(loaded[1].seller_id, None);
        assert_eq!(loaded[2].max_quantity, Some(2));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let store = test_store().await;
        let repo = store.carts();

        repo.save(
            "session-42",
            &[
                item("p1", Some("s1"), 1000, 1),
                item("p2", Some("s1"), 2000, 1),
            ],
        )
        .await
        .unwrap();

        repo.save("session-42", &[item("p3", None, 500, 3)])
            .await
            .unwrap();

        let loaded = repo.load("session-42").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "p3");
        assert_eq!(repo.line_count("session-42").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_carts_are_isolated_by_id() {
        let store = test_store().await;
        let repo = store.carts();

        repo.save("cart-a", &[item("p1", None, 1000, 1)])
            .await
            .unwrap();
        repo.save("cart-b", &[item("p2", None, 2000, 2)])
            .await
            .unwrap();

        assert_eq!(repo.load("cart-a").await.unwrap()[0].id, "p1");
        assert_eq!(repo.load("cart-b").await.unwrap()[0].id, "p2");
    }

    #[tokio::test]
    async fn test_delete_removes_cart() {
        let store = test_store().await;
        let repo = store.carts();

        repo.save("session-42", &[item("p1", None, 1000, 1)])
            .await
            .unwrap();
        repo.delete("session-42").await.unwrap();

        assert!(repo.load("session-42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_empty_snapshot_clears_cart() {
        let store = test_store().await;
        let repo = store.carts();

        repo.save("session-42", &[item("p1", None, 1000, 1)])
            .await
            .unwrap();
        repo.save("session-42", &[]).await.unwrap();

        assert!(repo.load("session-42").await.unwrap().is_empty());
    }
}

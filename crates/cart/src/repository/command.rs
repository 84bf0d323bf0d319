use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::PgConnection;
use tracing::info;

use crate::abstract_trait::repository::CartCommandRepositoryTrait;
use crate::domain::requests::cart::CartItemRequest;
use crate::model::cart::Cart;

#[derive(Clone)]
pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

async fn touch_cart(conn: &mut PgConnection, cart_id: i32) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE carts SET updated_at = current_timestamp WHERE cart_id = $1")
        .bind(cart_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn create(&self) -> Result<Cart, RepositoryError> {
        info!("📦 Creating new cart");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let cart = sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (created_at, updated_at)
             VALUES (current_timestamp, current_timestamp)
             RETURNING cart_id, created_at, updated_at",
        )
        .fetch_one(&mut *conn)
        .await?;

        Ok(cart)
    }

    async fn increment_or_insert_item(
        &self,
        cart_id: i32,
        product_id: i32,
    ) -> Result<(), RepositoryError> {
        info!("🔄 Adding product {product_id} to cart {cart_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Single-statement bump keeps concurrent adds from losing updates.
        let updated = sqlx::query(
            "UPDATE cart_items SET quantity = quantity + 1
             WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await?;

        if updated.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO cart_items (cart_id, product_id, quantity)
                 VALUES ($1, $2, 1)",
            )
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
        }

        touch_cart(&mut conn, cart_id).await
    }

    async fn remove_item(&self, cart_id: i32, product_id: i32) -> Result<u64, RepositoryError> {
        info!("🗑️ Removing product {product_id} from cart {cart_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let deleted = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        if deleted.rows_affected() > 0 {
            touch_cart(&mut conn, cart_id).await?;
        }

        Ok(deleted.rows_affected())
    }

    async fn replace_items(
        &self,
        cart_id: i32,
        items: &[CartItemRequest],
    ) -> Result<(), RepositoryError> {
        info!("🔄 Replacing items of cart {cart_id}");

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO cart_items (cart_id, product_id, quantity)
                 VALUES ($1, $2, $3)",
            )
            .bind(cart_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        touch_cart(&mut tx, cart_id).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn set_quantity(
        &self,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<u64, RepositoryError> {
        info!("🔄 Setting quantity of product {product_id} in cart {cart_id} to {quantity}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let updated = sqlx::query(
            "UPDATE cart_items SET quantity = $3
             WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        if updated.rows_affected() > 0 {
            touch_cart(&mut conn, cart_id).await?;
        }

        Ok(updated.rows_affected())
    }

    async fn clear(&self, cart_id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Clearing cart {cart_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *conn)
            .await?;

        touch_cart(&mut conn, cart_id).await
    }
}

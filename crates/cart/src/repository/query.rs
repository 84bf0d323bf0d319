use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::info;

use crate::abstract_trait::repository::CartQueryRepositoryTrait;
use crate::model::cart::{Cart, CartItem, CartItemExpanded, CartWithItems, CartWithItemsExpanded};

const EXPANDED_ITEM_COLUMNS: &str = r#"
    ci.cart_item_id, ci.cart_id, ci.product_id, ci.quantity,
    p.product_id AS p_product_id, p.title AS p_title,
    p.description AS p_description, p.price AS p_price, p.code AS p_code,
    p.stock AS p_stock, p.category AS p_category, p.status AS p_status,
    p.created_at AS p_created_at, p.updated_at AS p_updated_at
"#;

#[derive(Clone)]
pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_all(&self) -> Result<Vec<CartWithItems>, RepositoryError> {
        info!("🔍 Fetching all carts");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let carts = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, created_at, updated_at FROM carts ORDER BY cart_id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let items = sqlx::query_as::<_, CartItem>(
            "SELECT cart_item_id, cart_id, product_id, quantity
             FROM cart_items ORDER BY cart_id, cart_item_id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut grouped: BTreeMap<i32, Vec<CartItem>> = BTreeMap::new();
        for item in items {
            grouped.entry(item.cart_id).or_default().push(item);
        }

        Ok(carts
            .into_iter()
            .map(|cart| {
                let items = grouped.remove(&cart.cart_id).unwrap_or_default();
                CartWithItems { cart, items }
            })
            .collect())
    }

    async fn find_by_id(&self, cart_id: i32) -> Result<Option<CartWithItems>, RepositoryError> {
        info!("🔍 Fetching cart with id: {cart_id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let cart = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, created_at, updated_at FROM carts WHERE cart_id = $1",
        )
        .bind(cart_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItem>(
            "SELECT cart_item_id, cart_id, product_id, quantity
             FROM cart_items WHERE cart_id = $1 ORDER BY cart_item_id",
        )
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(Some(CartWithItems { cart, items }))
    }

    async fn find_by_id_expanded(
        &self,
        cart_id: i32,
    ) -> Result<Option<CartWithItemsExpanded>, RepositoryError> {
        info!("🔍 Fetching cart with id: {cart_id} (expanded)");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let cart = sqlx::query_as::<_, Cart>(
            "SELECT cart_id, created_at, updated_at FROM carts WHERE cart_id = $1",
        )
        .bind(cart_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItemExpanded>(&format!(
            "SELECT {EXPANDED_ITEM_COLUMNS}
             FROM cart_items ci
             LEFT JOIN products p ON p.product_id = ci.product_id
             WHERE ci.cart_id = $1 ORDER BY ci.cart_item_id"
        ))
        .bind(cart_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(Some(CartWithItemsExpanded { cart, items }))
    }

    async fn exists(&self, cart_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let found = sqlx::query_scalar::<_, i32>("SELECT 1 FROM carts WHERE cart_id = $1")
            .bind(cart_id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(found.is_some())
    }
}

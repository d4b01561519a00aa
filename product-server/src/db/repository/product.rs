//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all products, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability, created_at, updated_at FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Find product by primary key
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability, created_at, updated_at FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Insert a new product; `availability` defaults to true
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = now_millis();
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, availability, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(data.price)
        .bind(data.availability.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    /// Persist every writable field of an existing product
    ///
    /// Fails with [`RepoError::NotFound`] if the row is gone.
    pub async fn save(&self, product: &Product) -> RepoResult<Product> {
        let saved = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?, price = ?, availability = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .bind(now_millis())
        .bind(product.id)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| RepoError::NotFound(format!("product {}", product.id)))
    }

    /// Hard delete; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

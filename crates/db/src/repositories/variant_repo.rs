//! Repository for the `product_variants` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::variant::{CreateProductVariant, ProductVariant};

/// Column list for product_variants queries.
const COLUMNS: &str =
    "id, product_id, sku, title, price_cents, stock_quantity, created_at, updated_at";

/// Provides CRUD operations for product variants.
pub struct VariantRepo;

impl VariantRepo {
    /// Create a new variant under a product, returning the created row.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateProductVariant,
    ) -> Result<ProductVariant, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_variants (product_id, sku, title, price_cents, stock_quantity)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductVariant>(&query)
            .bind(product_id)
            .bind(&input.sku)
            .bind(&input.title)
            .bind(input.price_cents)
            .bind(input.stock_quantity.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// List variants of a product in creation order.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_variants
             WHERE product_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, ProductVariant>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Find a variant by exact SKU (case-sensitive).
    pub async fn find_by_sku(
        pool: &PgPool,
        sku: &str,
    ) -> Result<Option<ProductVariant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_variants WHERE sku = $1");
        sqlx::query_as::<_, ProductVariant>(&query)
            .bind(sku)
            .fetch_optional(pool)
            .await
    }
}

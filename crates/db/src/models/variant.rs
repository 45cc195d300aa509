//! Product variant entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A variant row from the `product_variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductVariant {
    pub id: DbId,
    pub product_id: DbId,
    pub sku: String,
    pub title: String,
    pub price_cents: Option<i64>,
    pub stock_quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new variant under a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductVariant {
    pub sku: String,
    pub title: String,
    /// Falls back to the parent product's price when absent.
    pub price_cents: Option<i64>,
    /// Defaults to 0 if omitted.
    pub stock_quantity: Option<i32>,
}

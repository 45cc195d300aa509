//! Two-tier SKU resolution and stock mutation for the inventory import.
//!
//! Both methods take `&mut PgConnection` so the import runner can keep all
//! row work on one transaction.

use sqlx::PgConnection;
use storefront_core::inventory_import::InventoryTarget;
use storefront_core::types::DbId;

/// Resolves SKUs against the catalog and applies stock decisions.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Resolve a SKU to its inventory target.
    ///
    /// Exact, case-sensitive match; product tier first, variant tier only
    /// when no product matched. A SKU present in both tiers resolves to
    /// the product.
    pub async fn resolve_sku(
        conn: &mut PgConnection,
        sku: &str,
    ) -> Result<Option<InventoryTarget>, sqlx::Error> {
        let product: Option<(DbId, i32)> =
            sqlx::query_as("SELECT id, stock_quantity FROM products WHERE sku = $1")
                .bind(sku)
                .fetch_optional(&mut *conn)
                .await?;

        if let Some((id, stock_quantity)) = product {
            return Ok(Some(InventoryTarget::Product { id, stock_quantity }));
        }

        let variant: Option<(DbId, i32)> =
            sqlx::query_as("SELECT id, stock_quantity FROM product_variants WHERE sku = $1")
                .bind(sku)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(variant.map(|(id, stock_quantity)| InventoryTarget::Variant { id, stock_quantity }))
    }

    /// Set the stock quantity of a resolved target.
    pub async fn set_quantity(
        conn: &mut PgConnection,
        target: &InventoryTarget,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        let query = match target {
            InventoryTarget::Product { .. } => {
                "UPDATE products SET stock_quantity = $2 WHERE id = $1"
            }
            InventoryTarget::Variant { .. } => {
                "UPDATE product_variants SET stock_quantity = $2 WHERE id = $1"
            }
        };
        sqlx::query(query)
            .bind(target.id())
            .bind(quantity)
            .execute(conn)
            .await
            .map(|_| ())
    }
}

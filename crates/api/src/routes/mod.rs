pub mod health;
pub mod inventory_import;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                                 list, create
/// /products/{id}                            get, update, delete
/// /products/{id}/variants                   list, create
///
/// /admin/inventory/import                   run an import (multipart POST)
/// /admin/inventory/import/template          CSV template download
/// /admin/inventory/imports                  import history, newest-first
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/admin/inventory", inventory_import::router())
}

//! Route definitions for the product catalog.
//!
//! Mounted at `/products` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes.
///
/// ```text
/// GET    /                 -> list (?limit, offset)
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/variants    -> list_variants
/// POST   /{id}/variants    -> create_variant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/{id}/variants",
            get(products::list_variants).post(products::create_variant),
        )
}

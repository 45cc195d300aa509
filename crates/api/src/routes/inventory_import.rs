//! Route definitions for the inventory CSV import.
//!
//! Mounted at `/admin/inventory` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory_import;
use crate::state::AppState;

/// Inventory import routes.
///
/// ```text
/// POST   /import            -> upload_csv (multipart)
/// GET    /import/template   -> download_template
/// GET    /imports           -> list_history (?limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import", post(inventory_import::upload_csv))
        .route(
            "/import/template",
            get(inventory_import::download_template),
        )
        .route("/imports", get(inventory_import::list_history))
}

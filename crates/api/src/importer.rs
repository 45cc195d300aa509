//! Inventory import runner.
//!
//! Drives one import run end-to-end: parse the uploaded CSV, resolve and
//! update each row inside a single transaction, and persist the run's
//! summary. The whole run is serialized against concurrent imports via a
//! PostgreSQL advisory transaction lock, so two simultaneous uploads can
//! never interleave writes to the same SKU. A run is all-or-nothing: if it
//! fails mid-file, no stock change and no summary are committed.

use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use storefront_core::inventory_import::{
    decide_stock, parse_inventory_csv, ImportCounts, ImportRow, LineParse, RowOutcome,
    StockDecision, MSG_INVALID_STOCK, REASON_MISSING_SKU,
};
use storefront_db::models::import_summary::{CreateImportSummary, ImportSummary};
use storefront_db::repositories::{ImportSummaryRepo, InventoryRepo};

use crate::error::AppResult;

/// Advisory lock key serializing inventory imports. The value is arbitrary
/// but must stay stable across deployments sharing a database.
pub const INVENTORY_IMPORT_LOCK_KEY: i64 = 741_980_113;

/// Result of one completed import run.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    /// The persisted summary row.
    pub summary: ImportSummary,
    /// Per-row outcomes in file order.
    pub outcomes: Vec<RowOutcome>,
}

/// Run one inventory import over uploaded CSV bytes.
///
/// Fatal parse errors (missing column, row bound, unreadable CSV) abort
/// before any transaction is opened -- no rows are touched and no summary
/// is written. Every other condition becomes a row outcome and the run
/// completes with a summary, even when nothing was updated.
pub async fn run_inventory_import(
    pool: &PgPool,
    filename: &str,
    bytes: &[u8],
    max_rows: usize,
) -> AppResult<ImportReport> {
    let parsed = parse_inventory_csv(bytes, max_rows)?;

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(INVENTORY_IMPORT_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let mut outcomes = Vec::with_capacity(parsed.lines.len());
    let mut counts = ImportCounts::default();

    for entry in &parsed.lines {
        let outcome = match entry {
            LineParse::MissingSku { .. } => RowOutcome::Skipped {
                sku: String::new(),
                reason: REASON_MISSING_SKU.to_string(),
            },
            LineParse::Malformed { line, message } => RowOutcome::Error {
                sku: String::new(),
                message: format!("line {line}: {message}"),
            },
            LineParse::Row(row) => process_row(&mut *tx, row).await?,
        };
        counts.record(&outcome);
        outcomes.push(outcome);
    }

    let summary = ImportSummaryRepo::create(
        &mut *tx,
        &CreateImportSummary::from_counts(filename, &counts),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        filename,
        rows = counts.total(),
        updated = counts.updated,
        not_found = counts.not_found,
        skipped = counts.skipped,
        errors = counts.errors,
        "Inventory import completed"
    );

    Ok(ImportReport { summary, outcomes })
}

/// Resolve one row's SKU and apply the stock policy to the matched target.
async fn process_row(conn: &mut PgConnection, row: &ImportRow) -> AppResult<RowOutcome> {
    let target = match InventoryRepo::resolve_sku(conn, &row.sku).await? {
        None => {
            return Ok(RowOutcome::NotFound {
                sku: row.sku.clone(),
            })
        }
        Some(target) => target,
    };

    match decide_stock(row.raw_stock.as_deref()) {
        StockDecision::Invalid => Ok(RowOutcome::Error {
            sku: row.sku.clone(),
            message: MSG_INVALID_STOCK.to_string(),
        }),
        StockDecision::Set(quantity) => {
            InventoryRepo::set_quantity(conn, &target, quantity).await?;
            Ok(RowOutcome::Updated {
                target_kind: target.kind(),
                target_id: target.id(),
                old_quantity: target.stock_quantity(),
                new_quantity: quantity,
            })
        }
    }
}

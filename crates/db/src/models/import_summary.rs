//! Inventory import summary model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::inventory_import::ImportCounts;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `import_summaries` table. Immutable after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImportSummary {
    pub id: DbId,
    pub filename: String,
    pub updated_count: i32,
    pub not_found_count: i32,
    pub skipped_count: i32,
    pub error_count: i32,
    pub created_at: Timestamp,
}

/// DTO for persisting the summary of a completed import run.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImportSummary {
    pub filename: String,
    pub updated_count: i32,
    pub not_found_count: i32,
    pub skipped_count: i32,
    pub error_count: i32,
}

impl CreateImportSummary {
    /// Build the DTO from the run's accumulated counts.
    pub fn from_counts(filename: impl Into<String>, counts: &ImportCounts) -> Self {
        Self {
            filename: filename.into(),
            updated_count: counts.updated,
            not_found_count: counts.not_found,
            skipped_count: counts.skipped,
            error_count: counts.errors,
        }
    }
}

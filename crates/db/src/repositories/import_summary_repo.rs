//! Repository for the `import_summaries` table.

use sqlx::{PgConnection, PgPool};
use storefront_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

use crate::models::import_summary::{CreateImportSummary, ImportSummary};

/// Column list for import_summaries queries.
const COLUMNS: &str =
    "id, filename, updated_count, not_found_count, skipped_count, error_count, created_at";

/// Persists and lists per-run import summaries.
pub struct ImportSummaryRepo;

impl ImportSummaryRepo {
    /// Insert the summary row for a completed run, returning it.
    ///
    /// Takes the import transaction's connection so the summary commits
    /// atomically with the run's stock updates.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateImportSummary,
    ) -> Result<ImportSummary, sqlx::Error> {
        let query = format!(
            "INSERT INTO import_summaries
                (filename, updated_count, not_found_count, skipped_count, error_count)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportSummary>(&query)
            .bind(&input.filename)
            .bind(input.updated_count)
            .bind(input.not_found_count)
            .bind(input.skipped_count)
            .bind(input.error_count)
            .fetch_one(conn)
            .await
    }

    /// List summaries newest-first for the admin history view.
    pub async fn list_recent(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ImportSummary>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM import_summaries
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ImportSummary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

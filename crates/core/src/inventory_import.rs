//! Core types, constants, and pure logic for the inventory CSV import.
//!
//! This module has zero external dependencies beyond the CSV reader (no DB,
//! no async, no filesystem). It provides:
//!
//! - Data-driven column-role detection for the CSV header
//! - Per-line parse results (usable row, missing SKU, malformed)
//! - The stock policy (sentinel / empty / numeric / invalid)
//! - Row outcome and count types shared with the import runner
//!
//! Resolution and mutation of catalog rows live in the database layer; the
//! import runner in the API crate drives both.

use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stock quantity applied when a row carries the supplier-available sentinel.
pub const SUPPLIER_AVAILABLE_QUANTITY: i32 = 5;

/// Cell content meaning "available from supplier" rather than a count.
pub const STOCK_SENTINEL: &str = "-";

/// Skip reason recorded for rows with an empty SKU cell.
pub const REASON_MISSING_SKU: &str = "missing sku";

/// Maximum length of a SKU.
pub const MAX_SKU_LENGTH: usize = 64;

/// Error message recorded for non-numeric, non-sentinel stock cells.
pub const MSG_INVALID_STOCK: &str = "invalid stock value";

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// A header role and the column names that can fill it.
///
/// Candidates are matched case-insensitively against trimmed header cells,
/// in preference order: the first candidate that matches any header cell
/// wins the role.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRole {
    /// Role name used in error reporting.
    pub role: &'static str,
    /// Accepted header names, most preferred first.
    pub candidates: &'static [&'static str],
}

/// The SKU column role.
pub const SKU_ROLE: ColumnRole = ColumnRole {
    role: "sku",
    candidates: &["sku"],
};

/// The stock-quantity column role.
pub const STOCK_ROLE: ColumnRole = ColumnRole {
    role: "stock",
    candidates: &["total in stock", "stock", "quantity", "qty"],
};

/// Find the index of the header cell filling `role`, if any.
pub fn find_column(headers: &csv::StringRecord, role: &ColumnRole) -> Option<usize> {
    for candidate in role.candidates {
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
        {
            return Some(idx);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal import errors. Everything else is absorbed into per-row outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// No header cell matched the role's candidate list. Aborts the run
    /// with zero rows processed.
    #[error("no CSV column matches the '{role}' role")]
    MissingColumn { role: &'static str },

    /// The file holds more data rows than the configured bound.
    #[error("CSV exceeds the maximum of {limit} rows")]
    TooManyRows { limit: usize },

    /// The underlying reader failed (I/O or encoding).
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Parsed rows
// ---------------------------------------------------------------------------

/// One usable CSV data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based record number in the file (header is record 1).
    pub line: u64,
    /// Trimmed, non-empty SKU cell.
    pub sku: String,
    /// Trimmed stock cell; `None` when the cell is empty or absent.
    pub raw_stock: Option<String>,
}

/// Per-line parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    /// A row with a usable SKU, ready for resolution.
    Row(ImportRow),
    /// The SKU cell was empty; the row is counted as skipped.
    MissingSku { line: u64 },
    /// The field count did not match the header; counted as an error.
    Malformed { line: u64, message: String },
}

/// Result of parsing an uploaded CSV file.
#[derive(Debug)]
pub struct ParsedCsv {
    /// Index of the SKU column in the header.
    pub sku_column: usize,
    /// Index of the stock column in the header.
    pub stock_column: usize,
    /// All data lines in file order.
    pub lines: Vec<LineParse>,
}

/// Parse uploaded CSV bytes into per-line results.
///
/// The first non-blank record is the header. Blank records are ignored.
/// Fails fast when either column role is unmatched or the data row count
/// exceeds `max_rows`; per-row problems become [`LineParse`] variants
/// instead of errors.
pub fn parse_inventory_csv(bytes: &[u8], max_rows: usize) -> Result<ParsedCsv, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut header_seen = false;
    let mut lines = Vec::new();
    let mut sku_column = 0usize;
    let mut stock_column = 0usize;
    let mut header_len = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = idx as u64 + 1;

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        if !header_seen {
            sku_column = find_column(&record, &SKU_ROLE)
                .ok_or(ImportError::MissingColumn { role: SKU_ROLE.role })?;
            stock_column = find_column(&record, &STOCK_ROLE).ok_or(ImportError::MissingColumn {
                role: STOCK_ROLE.role,
            })?;
            header_len = record.len();
            header_seen = true;
            continue;
        }

        if lines.len() >= max_rows {
            return Err(ImportError::TooManyRows { limit: max_rows });
        }

        if record.len() != header_len {
            lines.push(LineParse::Malformed {
                line,
                message: format!("expected {header_len} columns, found {}", record.len()),
            });
            continue;
        }

        let sku = record.get(sku_column).unwrap_or("").trim();
        if sku.is_empty() {
            lines.push(LineParse::MissingSku { line });
            continue;
        }

        let raw_stock = record
            .get(stock_column)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        lines.push(LineParse::Row(ImportRow {
            line,
            sku: sku.to_string(),
            raw_stock,
        }));
    }

    if !header_seen {
        // An empty upload has no header at all; report the first role.
        return Err(ImportError::MissingColumn { role: SKU_ROLE.role });
    }

    Ok(ParsedCsv {
        sku_column,
        stock_column,
        lines,
    })
}

// ---------------------------------------------------------------------------
// Stock policy
// ---------------------------------------------------------------------------

/// Decision for one stock cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecision {
    /// Set the target's quantity to this value.
    Set(i32),
    /// The cell is neither numeric nor the sentinel; leave the target alone.
    Invalid,
}

/// Decide the new stock quantity for a raw cell value.
///
/// Evaluated in order: the `"-"` sentinel maps to
/// [`SUPPLIER_AVAILABLE_QUANTITY`], an empty or absent cell maps to zero,
/// a non-negative integer maps to itself, anything else is invalid.
pub fn decide_stock(raw: Option<&str>) -> StockDecision {
    let cell = match raw {
        None => return StockDecision::Set(0),
        Some(s) => s.trim(),
    };

    if cell == STOCK_SENTINEL {
        return StockDecision::Set(SUPPLIER_AVAILABLE_QUANTITY);
    }
    if cell.is_empty() {
        return StockDecision::Set(0);
    }
    match cell.parse::<i32>() {
        Ok(n) if n >= 0 => StockDecision::Set(n),
        _ => StockDecision::Invalid,
    }
}

// ---------------------------------------------------------------------------
// Inventory targets
// ---------------------------------------------------------------------------

/// Which catalog tier a resolved SKU belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Product,
    Variant,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Variant => "variant",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog row matched by SKU, carrying its current stock quantity.
///
/// Resolution is two-tier with explicit precedence: a SKU matching both a
/// product and a variant resolves to the product, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryTarget {
    Product { id: DbId, stock_quantity: i32 },
    Variant { id: DbId, stock_quantity: i32 },
}

impl InventoryTarget {
    pub fn id(&self) -> DbId {
        match self {
            Self::Product { id, .. } | Self::Variant { id, .. } => *id,
        }
    }

    pub fn stock_quantity(&self) -> i32 {
        match self {
            Self::Product { stock_quantity, .. } | Self::Variant { stock_quantity, .. } => {
                *stock_quantity
            }
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Product { .. } => TargetKind::Product,
            Self::Variant { .. } => TargetKind::Variant,
        }
    }
}

// ---------------------------------------------------------------------------
// Row outcomes
// ---------------------------------------------------------------------------

/// Final outcome of one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    /// The target's stock quantity was set.
    Updated {
        target_kind: TargetKind,
        target_id: DbId,
        old_quantity: i32,
        new_quantity: i32,
    },
    /// No product or variant carries this SKU.
    NotFound { sku: String },
    /// The row was excluded before resolution (e.g. empty SKU cell).
    Skipped { sku: String, reason: String },
    /// The row failed (malformed record or invalid stock cell).
    Error { sku: String, message: String },
}

/// Per-outcome-kind counters for one import run.
///
/// Counts only ever increment; their sum equals the number of data rows
/// processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub updated: i32,
    pub not_found: i32,
    pub skipped: i32,
    pub errors: i32,
}

impl ImportCounts {
    /// Record one row outcome.
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Updated { .. } => self.updated += 1,
            RowOutcome::NotFound { .. } => self.not_found += 1,
            RowOutcome::Skipped { .. } => self.skipped += 1,
            RowOutcome::Error { .. } => self.errors += 1,
        }
    }

    /// Total rows accounted for.
    pub fn total(&self) -> i32 {
        self.updated + self.not_found + self.skipped + self.errors
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a SKU for catalog writes.
///
/// Import-side matching never calls this: uploaded rows match whatever the
/// catalog already holds. This guards what the catalog accepts in the
/// first place.
pub fn validate_sku(sku: &str) -> Result<(), String> {
    if sku.trim().is_empty() {
        return Err("SKU cannot be empty".to_string());
    }
    if sku.len() > MAX_SKU_LENGTH {
        return Err(format!(
            "SKU exceeds maximum length of {MAX_SKU_LENGTH} characters"
        ));
    }
    if sku != sku.trim() {
        return Err("SKU cannot have leading or trailing whitespace".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cells.to_vec())
    }

    // -- find_column ----------------------------------------------------------

    #[test]
    fn sku_column_matched_case_insensitively() {
        let h = headers(&["Name", "SKU", "Total in stock"]);
        assert_eq!(find_column(&h, &SKU_ROLE), Some(1));
    }

    #[test]
    fn stock_column_prefers_earlier_candidate() {
        // "total in stock" outranks "quantity" even though quantity appears
        // first in the header.
        let h = headers(&["SKU", "Quantity", "Total In Stock"]);
        assert_eq!(find_column(&h, &STOCK_ROLE), Some(2));
    }

    #[test]
    fn stock_column_falls_back_through_candidates() {
        let h = headers(&["sku", "qty"]);
        assert_eq!(find_column(&h, &STOCK_ROLE), Some(1));
    }

    #[test]
    fn header_cells_are_trimmed_before_matching() {
        let h = headers(&["  sku  ", " stock "]);
        assert_eq!(find_column(&h, &SKU_ROLE), Some(0));
        assert_eq!(find_column(&h, &STOCK_ROLE), Some(1));
    }

    #[test]
    fn unmatched_role_returns_none() {
        let h = headers(&["name", "price"]);
        assert_eq!(find_column(&h, &SKU_ROLE), None);
        assert_eq!(find_column(&h, &STOCK_ROLE), None);
    }

    // -- parse_inventory_csv --------------------------------------------------

    #[test]
    fn parses_rows_in_order() {
        let csv = b"SKU,Total in stock\nABC123,10\nXYZ999,-\nNOPE,5\n";
        let parsed = parse_inventory_csv(csv, 1000).unwrap();

        assert_eq!(parsed.sku_column, 0);
        assert_eq!(parsed.stock_column, 1);
        assert_eq!(parsed.lines.len(), 3);
        assert_eq!(
            parsed.lines[0],
            LineParse::Row(ImportRow {
                line: 2,
                sku: "ABC123".to_string(),
                raw_stock: Some("10".to_string()),
            })
        );
        assert_eq!(
            parsed.lines[1],
            LineParse::Row(ImportRow {
                line: 3,
                sku: "XYZ999".to_string(),
                raw_stock: Some("-".to_string()),
            })
        );
    }

    #[test]
    fn missing_stock_column_is_fatal() {
        let csv = b"SKU,Name\nABC123,Widget\n";
        let err = parse_inventory_csv(csv, 1000).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { role: "stock" }));
    }

    #[test]
    fn missing_sku_column_is_fatal() {
        let csv = b"Name,Stock\nWidget,10\n";
        let err = parse_inventory_csv(csv, 1000).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { role: "sku" }));
    }

    #[test]
    fn empty_file_reports_missing_column() {
        let err = parse_inventory_csv(b"", 1000).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { role: "sku" }));
    }

    #[test]
    fn empty_sku_cell_is_missing_sku_not_a_row() {
        let csv = b"SKU,Stock\n,10\n  ,4\n";
        let parsed = parse_inventory_csv(csv, 1000).unwrap();
        assert_eq!(parsed.lines.len(), 2);
        assert!(matches!(parsed.lines[0], LineParse::MissingSku { line: 2 }));
        assert!(matches!(parsed.lines[1], LineParse::MissingSku { line: 3 }));
    }

    #[test]
    fn column_count_mismatch_is_malformed() {
        let csv = b"SKU,Stock\nABC123\nDEF456,3,extra\n";
        let parsed = parse_inventory_csv(csv, 1000).unwrap();
        assert_eq!(parsed.lines.len(), 2);
        assert!(matches!(parsed.lines[0], LineParse::Malformed { line: 2, .. }));
        assert!(matches!(parsed.lines[1], LineParse::Malformed { line: 3, .. }));
    }

    #[test]
    fn empty_stock_cell_parses_to_none() {
        let csv = b"SKU,Stock\nABC123,\n";
        let parsed = parse_inventory_csv(csv, 1000).unwrap();
        assert_eq!(
            parsed.lines[0],
            LineParse::Row(ImportRow {
                line: 2,
                sku: "ABC123".to_string(),
                raw_stock: None,
            })
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        let csv = b"SKU,Stock\n,\nABC123,10\n";
        let parsed = parse_inventory_csv(csv, 1000).unwrap();
        // The all-empty record is dropped entirely, not counted as a row.
        assert_eq!(parsed.lines.len(), 1);
        assert!(matches!(parsed.lines[0], LineParse::Row(_)));
    }

    #[test]
    fn row_bound_is_enforced() {
        let csv = b"SKU,Stock\nA,1\nB,2\nC,3\n";
        let err = parse_inventory_csv(csv, 2).unwrap_err();
        assert!(matches!(err, ImportError::TooManyRows { limit: 2 }));
    }

    // -- decide_stock ---------------------------------------------------------

    #[test]
    fn sentinel_maps_to_supplier_available_quantity() {
        assert_eq!(
            decide_stock(Some("-")),
            StockDecision::Set(SUPPLIER_AVAILABLE_QUANTITY)
        );
        assert_eq!(decide_stock(Some(" - ")), StockDecision::Set(5));
    }

    #[test]
    fn absent_or_empty_cell_means_zero() {
        assert_eq!(decide_stock(None), StockDecision::Set(0));
        assert_eq!(decide_stock(Some("")), StockDecision::Set(0));
        assert_eq!(decide_stock(Some("   ")), StockDecision::Set(0));
    }

    #[test]
    fn explicit_zero_means_zero() {
        assert_eq!(decide_stock(Some("0")), StockDecision::Set(0));
    }

    #[test]
    fn non_negative_integer_passes_through() {
        assert_eq!(decide_stock(Some("10")), StockDecision::Set(10));
        assert_eq!(decide_stock(Some(" 7 ")), StockDecision::Set(7));
    }

    #[test]
    fn non_numeric_cell_is_invalid() {
        assert_eq!(decide_stock(Some("abc")), StockDecision::Invalid);
        assert_eq!(decide_stock(Some("1.5")), StockDecision::Invalid);
    }

    #[test]
    fn negative_number_is_invalid() {
        assert_eq!(decide_stock(Some("-3")), StockDecision::Invalid);
    }

    // -- InventoryTarget ------------------------------------------------------

    #[test]
    fn target_accessors() {
        let p = InventoryTarget::Product {
            id: 7,
            stock_quantity: 3,
        };
        assert_eq!(p.id(), 7);
        assert_eq!(p.stock_quantity(), 3);
        assert_eq!(p.kind(), TargetKind::Product);

        let v = InventoryTarget::Variant {
            id: 9,
            stock_quantity: 0,
        };
        assert_eq!(v.kind(), TargetKind::Variant);
    }

    #[test]
    fn target_kind_display() {
        assert_eq!(format!("{}", TargetKind::Product), "product");
        assert_eq!(format!("{}", TargetKind::Variant), "variant");
    }

    // -- ImportCounts ---------------------------------------------------------

    #[test]
    fn counts_sum_to_total_rows() {
        let outcomes = [
            RowOutcome::Updated {
                target_kind: TargetKind::Product,
                target_id: 1,
                old_quantity: 0,
                new_quantity: 10,
            },
            RowOutcome::NotFound {
                sku: "NOPE".to_string(),
            },
            RowOutcome::Skipped {
                sku: String::new(),
                reason: REASON_MISSING_SKU.to_string(),
            },
            RowOutcome::Error {
                sku: "BAD".to_string(),
                message: MSG_INVALID_STOCK.to_string(),
            },
            RowOutcome::Updated {
                target_kind: TargetKind::Variant,
                target_id: 2,
                old_quantity: 5,
                new_quantity: 5,
            },
        ];

        let mut counts = ImportCounts::default();
        for outcome in &outcomes {
            counts.record(outcome);
        }

        assert_eq!(counts.updated, 2);
        assert_eq!(counts.not_found, 1);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.total(), outcomes.len() as i32);
    }

    // -- validate_sku ---------------------------------------------------------

    #[test]
    fn valid_sku_accepted() {
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("abc-123_X").is_ok());
    }

    #[test]
    fn empty_sku_rejected() {
        let result = validate_sku("");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cannot be empty"));
    }

    #[test]
    fn overlong_sku_rejected() {
        assert!(validate_sku(&"a".repeat(MAX_SKU_LENGTH + 1)).is_err());
    }

    #[test]
    fn padded_sku_rejected() {
        assert!(validate_sku(" ABC123 ").is_err());
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(RowOutcome::NotFound {
            sku: "NOPE".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "not_found");
        assert_eq!(json["sku"], "NOPE");
    }
}

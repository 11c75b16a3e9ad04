//! CSV bulk import.
//!
//! Each importable entity describes its table and required columns through
//! [`CsvEntity`]; the engine parses the upload, deduplicates against ids
//! already in the table with one batched lookup, and inserts the remaining
//! rows inside a single transaction.

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::AppError;

/// Rows per INSERT statement, kept well below SQLite's host-parameter limit.
const INSERT_CHUNK: usize = 500;

/// A tuple of the VALUES clause being filled for one row.
pub type ValuesRow<'qb, 'args> = sqlx::query_builder::Separated<'qb, 'args, Sqlite, &'static str>;

/// Per-entity schema hooks for the CSV import engine.
pub trait CsvEntity: Sized + Send {
    const TABLE: &'static str;
    /// Required CSV columns, id first. Rows missing a value in any of these
    /// are dropped.
    const COLUMNS: &'static [&'static str];
    /// Column list of the INSERT statement, matching the `bind` order.
    const INSERT_COLUMNS: &'static str;

    /// Coerce one projected row (aligned with `COLUMNS`) into an entity.
    /// Returning `None` skips the row without failing the import.
    fn from_csv(fields: &[&str]) -> Option<Self>;

    fn id(&self) -> Option<i64>;

    fn bind(self, row: &mut ValuesRow<'_, '_>);
}

/// Import a CSV upload into `T`'s table, returning the number of rows added.
///
/// Rows whose id already exists are left untouched; rows that fail typed
/// coercion (a bad date, a non-numeric id) are skipped silently. The batch
/// insert commits or rolls back as a whole.
pub async fn import_csv<T: CsvEntity>(
    pool: &SqlitePool,
    filename: &str,
    bytes: &[u8],
) -> Result<u64, AppError> {
    if !filename.ends_with(".csv") {
        return Err(AppError::invalid_input("Only .csv files are supported"));
    }

    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("Invalid CSV file: {e}")))?
        .clone();

    // Position of each required column in the header row.
    let mut positions = Vec::with_capacity(T::COLUMNS.len());
    for col in T::COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h.trim() == *col)
            .ok_or_else(|| AppError::invalid_input(format!("Missing required column: {col}")))?;
        positions.push(idx);
    }

    // Project every record onto the required columns; a row with a missing
    // value in any of them is dropped.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::invalid_input(format!("Invalid CSV file: {e}")))?;
        let fields: Option<Vec<String>> = positions
            .iter()
            .map(|&i| {
                record
                    .get(i)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect();
        if let Some(fields) = fields {
            rows.push(fields);
        }
    }

    let candidate_ids: Vec<i64> = rows
        .iter()
        .filter_map(|fields| fields[0].parse::<i64>().ok())
        .collect();
    let existing = existing_ids(pool, T::TABLE, &candidate_ids).await?;

    let new_rows: Vec<T> = rows
        .iter()
        .filter_map(|fields| {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            T::from_csv(&fields)
        })
        .filter(|row| row.id().is_some_and(|id| !existing.contains(&id)))
        .collect();

    if new_rows.is_empty() {
        return Ok(0);
    }

    // One transaction so the whole batch commits or rolls back together.
    let mut tx = pool.begin().await?;
    let mut added = 0u64;
    let mut pending = new_rows.into_iter().peekable();
    while pending.peek().is_some() {
        let chunk: Vec<T> = pending.by_ref().take(INSERT_CHUNK).collect();
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO {} ({}) ", T::TABLE, T::INSERT_COLUMNS));
        qb.push_values(chunk, |mut values, row| row.bind(&mut values));
        added += qb.build().execute(&mut *tx).await?.rows_affected();
    }
    tx.commit().await?;

    tracing::info!(table = T::TABLE, added, "CSV import finished");
    Ok(added)
}

/// Batch existence check: which of `ids` are already present in `table`.
/// One query per chunk instead of one per row.
pub async fn existing_ids(
    pool: &SqlitePool,
    table: &str,
    ids: &[i64],
) -> Result<HashSet<i64>, sqlx::Error> {
    let mut existing = HashSet::new();
    for chunk in ids.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT id FROM {table} WHERE id IN ("));
        let mut sep = qb.separated(", ");
        for id in chunk {
            sep.push_bind(*id);
        }
        qb.push(")");
        let found: Vec<i64> = qb.build_query_scalar().fetch_all(pool).await?;
        existing.extend(found);
    }
    Ok(existing)
}

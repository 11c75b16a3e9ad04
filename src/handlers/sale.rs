use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::dtos::dashboard::{MonthlyRevenue, RevenueSummary};
use crate::dtos::import::ImportSummary;
use crate::dtos::sale::{CreateSaleRequest, SaleFilter, SaleResponse, UpdateSaleRequest};
use crate::error::AppError;
use crate::handlers::read_upload;
use crate::import;
use crate::models::sale::Sale;
use crate::state::AppState;

const SALE_COLUMNS: &str = "id, quantity, total_price, date, product_id";

// GET /sales - List sales, optionally filtered, newest first
#[instrument(skip(state))]
pub async fn get_sales(
    State(state): State<AppState>,
    Query(filter): Query<SaleFilter>,
) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let sales = sqlx::query_as::<_, Sale>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales
         WHERE (?1 IS NULL OR product_id = ?1)
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY date DESC"
    ))
    .bind(filter.product_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(sales.into_iter().map(SaleResponse::from).collect()))
}

// GET /sales/:id - Get single sale
#[instrument(skip(state), fields(id))]
pub async fn get_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = sqlx::query_as::<_, Sale>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Sale Not Found"))?;

    Ok(Json(SaleResponse::from(sale)))
}

// POST /sales - Create new sale
#[instrument(skip(state, payload))]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = sqlx::query_as::<_, Sale>(&format!(
        "INSERT INTO sales (id, quantity, total_price, date, product_id)
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {SALE_COLUMNS}"
    ))
    .bind(payload.id)
    .bind(payload.quantity)
    .bind(payload.total_price)
    .bind(payload.date)
    .bind(payload.product_id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(SaleResponse::from(sale)))
}

// PUT /sales/:id - Partial update, absent fields are preserved
#[instrument(skip(state, payload), fields(id))]
pub async fn update_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = sqlx::query_as::<_, Sale>(&format!(
        "UPDATE sales SET
            quantity    = COALESCE(?1, quantity),
            total_price = COALESCE(?2, total_price),
            date        = COALESCE(?3, date),
            product_id  = COALESCE(?4, product_id)
         WHERE id = ?5 RETURNING {SALE_COLUMNS}"
    ))
    .bind(payload.quantity)
    .bind(payload.total_price)
    .bind(payload.date)
    .bind(payload.product_id)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Sale Not Found"))?;

    Ok(Json(SaleResponse::from(sale)))
}

// DELETE /sales/:id - Delete sale
#[instrument(skip(state), fields(id))]
pub async fn delete_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Sale Not Found"));
    }

    Ok(Json(json!({ "message": "Sale Deleted" })))
}

// POST /sales/import_csv - Bulk import from an uploaded CSV file
#[instrument(skip(state, multipart))]
pub async fn import_sales(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let rows_imported =
        import::import_csv::<CreateSaleRequest>(&state.db_pool, &filename, &bytes).await?;

    Ok(Json(ImportSummary { rows_imported }))
}

// GET /sales/dashboard/revenue - Revenue totals and per-month breakdown
#[instrument(skip(state))]
pub async fn revenue_summary(
    State(state): State<AppState>,
) -> Result<Json<RevenueSummary>, AppError> {
    let (total_revenue, total_sales): (f64, i64) = sqlx::query_as(
        "SELECT CAST(COALESCE(SUM(total_price), 0) AS REAL), COUNT(*) FROM sales",
    )
    .fetch_one(&state.db_pool)
    .await?;

    let monthly: Vec<(String, f64)> = sqlx::query_as(
        "SELECT strftime('%Y-%m', date) AS month, CAST(SUM(total_price) AS REAL) AS total
         FROM sales GROUP BY month ORDER BY month",
    )
    .fetch_all(&state.db_pool)
    .await?;

    let monthly_data = monthly
        .into_iter()
        .map(|(date, total)| MonthlyRevenue { date, total })
        .collect();

    Ok(Json(RevenueSummary {
        total_revenue,
        total_sales,
        monthly_data,
    }))
}

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::dtos::import::ImportSummary;
use crate::dtos::product::{
    CreateProductRequest, ProductFilter, ProductResponse, UpdateProductRequest,
};
use crate::error::AppError;
use crate::handlers::read_upload;
use crate::import;
use crate::models::product::Product;
use crate::state::AppState;

const PRODUCT_COLUMNS: &str = "id, name, description, price, brand, category_id";

// GET /products - List products, optionally filtered
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE (?1 IS NULL OR category_id = ?1)
           AND (?2 IS NULL OR brand = ?2)
           AND (?3 IS NULL OR price >= ?3)
           AND (?4 IS NULL OR price <= ?4)
         ORDER BY id"
    ))
    .bind(filter.category_id)
    .bind(filter.brand)
    .bind(filter.min_price)
    .bind(filter.max_price)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product Not Found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (id, name, description, price, brand, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.brand)
    .bind(payload.category_id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}

// PUT /products/:id - Partial update, absent fields are preserved
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET
            name        = COALESCE(?1, name),
            description = COALESCE(?2, description),
            price       = COALESCE(?3, price),
            brand       = COALESCE(?4, brand),
            category_id = COALESCE(?5, category_id)
         WHERE id = ?6 RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.brand)
    .bind(payload.category_id)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product Not Found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product (cascades to its sales)
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product Not Found"));
    }

    Ok(Json(json!({ "message": "Product Deleted" })))
}

// POST /products/import_csv - Bulk import from an uploaded CSV file
#[instrument(skip(state, multipart))]
pub async fn import_products(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let rows_imported =
        import::import_csv::<CreateProductRequest>(&state.db_pool, &filename, &bytes).await?;

    Ok(Json(ImportSummary { rows_imported }))
}

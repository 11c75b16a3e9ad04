use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::dtos::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dtos::dashboard::TotalCategoriesResponse;
use crate::dtos::import::ImportSummary;
use crate::error::AppError;
use crate::handlers::read_upload;
use crate::import;
use crate::models::category::Category;
use crate::state::AppState;

// GET /categories - List all categories
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(&state.db_pool)
        .await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

// GET /categories/:id - Get single category
#[instrument(skip(state), fields(id))]
pub async fn get_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Category Not Found"))?;

    Ok(Json(CategoryResponse::from(category)))
}

// POST /categories - Create new category
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    // A NULL id lets the store assign the next one.
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, name) VALUES (?1, ?2) RETURNING id, name",
    )
    .bind(payload.id)
    .bind(&payload.name)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(CategoryResponse::from(category)))
}

// PUT /categories/:id - Partial update, absent fields are preserved
#[instrument(skip(state, payload), fields(id))]
pub async fn update_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = COALESCE(?1, name) WHERE id = ?2 RETURNING id, name",
    )
    .bind(payload.name)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Category Not Found"))?;

    Ok(Json(CategoryResponse::from(category)))
}

// DELETE /categories/:id - Delete category (cascades to its products)
#[instrument(skip(state), fields(id))]
pub async fn delete_category(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Category Not Found"));
    }

    Ok(Json(json!({ "message": "Category Deleted" })))
}

// POST /categories/import_csv - Bulk import from an uploaded CSV file
#[instrument(skip(state, multipart))]
pub async fn import_categories(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let rows_imported =
        import::import_csv::<CreateCategoryRequest>(&state.db_pool, &filename, &bytes).await?;

    Ok(Json(ImportSummary { rows_imported }))
}

// GET /categories/dashboard/total_categories
#[instrument(skip(state))]
pub async fn total_categories(
    State(state): State<AppState>,
) -> Result<Json<TotalCategoriesResponse>, AppError> {
    let total_categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&state.db_pool)
        .await?;

    Ok(Json(TotalCategoriesResponse { total_categories }))
}

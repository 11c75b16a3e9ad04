//! Engine-level tests for the CSV import path: deduplication, row-level
//! skipping, and input validation.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use smartmart_backend::database;
use smartmart_backend::dtos::category::CreateCategoryRequest;
use smartmart_backend::dtos::product::CreateProductRequest;
use smartmart_backend::dtos::sale::CreateSaleRequest;
use smartmart_backend::error::AppError;
use smartmart_backend::import::{existing_ids, import_csv};

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    database::create_tables(&pool).await.unwrap();
    pool
}

async fn seed_category(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO categories (id, name) VALUES (?1, ?2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_product(pool: &SqlitePool, id: i64, category_id: i64) {
    sqlx::query(
        "INSERT INTO products (id, name, description, price, brand, category_id)
         VALUES (?1, 'p', 'd', 1.0, 'b', ?2)",
    )
    .bind(id)
    .bind(category_id)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn existing_ids_reports_only_present_rows() {
    let pool = test_pool().await;
    seed_category(&pool, 1, "Beverages").await;
    seed_category(&pool, 3, "Snacks").await;

    let found = existing_ids(&pool, "categories", &[1, 2, 3, 4]).await.unwrap();
    assert!(found.contains(&1));
    assert!(found.contains(&3));
    assert_eq!(found.len(), 2);

    let found = existing_ids(&pool, "categories", &[]).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn import_skips_ids_already_in_store() {
    let pool = test_pool().await;
    seed_category(&pool, 1, "Beverages").await;

    let csv = "id,name\n1,Overwrite Attempt\n2,Snacks\n";
    let added = import_csv::<CreateCategoryRequest>(&pool, "categories.csv", csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(added, 1);

    let name: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Beverages");
}

#[tokio::test]
async fn sale_rows_with_bad_dates_are_skipped() {
    let pool = test_pool().await;
    seed_category(&pool, 1, "Beverages").await;
    seed_product(&pool, 10, 1).await;

    let csv = "id,product_id,quantity,total_price,date\n\
               100,10,1,10.0,2024-01-05\n\
               101,10,2,5.0,not-a-date\n\
               102,10,3,7.5,2024-02-01\n";
    let added = import_csv::<CreateSaleRequest>(&pool, "sales.csv", csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(added, 2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn rows_missing_required_values_are_dropped() {
    let pool = test_pool().await;

    // Row 2 has no name, row 3 has no id.
    let csv = "id,name\n1,Beverages\n2,\n,Dairy\n";
    let added = import_csv::<CreateCategoryRequest>(&pool, "categories.csv", csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(added, 1);
}

#[tokio::test]
async fn extra_columns_are_ignored() {
    let pool = test_pool().await;

    let csv = "name,notes,id\nBeverages,irrelevant,1\n";
    let added = import_csv::<CreateCategoryRequest>(&pool, "categories.csv", csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(added, 1);

    let name: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Beverages");
}

#[tokio::test]
async fn missing_required_column_is_invalid_input() {
    let pool = test_pool().await;

    let csv = "id,name,description,brand,category_id\n1,Cola,Fizzy,Acme,1\n";
    let err = import_csv::<CreateProductRequest>(&pool, "products.csv", csv.as_bytes())
        .await
        .unwrap_err();
    match err {
        AppError::InvalidInput(msg) => assert!(msg.contains("price"), "unexpected message: {msg}"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_csv_is_invalid_input() {
    let pool = test_pool().await;

    // Record with more fields than the header row.
    let csv = "id,name\n1,Beverages,extra-field\n";
    let err = import_csv::<CreateCategoryRequest>(&pool, "categories.csv", csv.as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn wrong_extension_is_rejected_before_parsing() {
    let pool = test_pool().await;

    let err = import_csv::<CreateCategoryRequest>(&pool, "data.txt", b"not even csv")
        .await
        .unwrap_err();
    match err {
        AppError::InvalidInput(msg) => assert_eq!(msg, "Only .csv files are supported"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[tokio::test]
async fn import_reports_zero_when_everything_exists() {
    let pool = test_pool().await;
    seed_category(&pool, 1, "Beverages").await;
    seed_category(&pool, 2, "Snacks").await;

    let csv = "id,name\n1,Beverages\n2,Snacks\n";
    let added = import_csv::<CreateCategoryRequest>(&pool, "categories.csv", csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(added, 0);
}

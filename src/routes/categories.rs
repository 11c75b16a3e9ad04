use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::category::{
    create_category, delete_category, get_categories, get_category, import_categories,
    total_categories, update_category,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/import_csv", post(import_categories))
        .route(
            "/categories/dashboard/total_categories",
            get(total_categories),
        )
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

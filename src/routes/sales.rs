use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::sale::{
    create_sale, delete_sale, get_sale, get_sales, import_sales, revenue_summary, update_sale,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(get_sales).post(create_sale))
        .route("/sales/import_csv", post(import_sales))
        .route("/sales/dashboard/revenue", get(revenue_summary))
        .route(
            "/sales/{id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
}

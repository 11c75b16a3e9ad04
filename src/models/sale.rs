use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Sale {
    pub id: i64,
    pub quantity: i64,
    pub total_price: f64,
    pub date: NaiveDate,
    pub product_id: i64,
}

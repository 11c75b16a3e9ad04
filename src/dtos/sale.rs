use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::import::{CsvEntity, ValuesRow};
use crate::models::sale::Sale;

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    /// Optional client-supplied id; the store assigns one when omitted.
    pub id: Option<i64>,
    pub quantity: i64,
    pub total_price: f64,
    pub date: NaiveDate,
    pub product_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSaleRequest {
    pub quantity: Option<i64>,
    pub total_price: Option<f64>,
    pub date: Option<NaiveDate>,
    pub product_id: Option<i64>,
}

/// Optional filters for GET /sales; listing is ordered by date descending.
#[derive(Debug, Deserialize)]
pub struct SaleFilter {
    pub product_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub quantity: i64,
    pub total_price: f64,
    pub date: NaiveDate,
    pub product_id: i64,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.id,
            quantity: sale.quantity,
            total_price: sale.total_price,
            date: sale.date,
            product_id: sale.product_id,
        }
    }
}

impl CsvEntity for CreateSaleRequest {
    const TABLE: &'static str = "sales";
    const COLUMNS: &'static [&'static str] = &["id", "product_id", "quantity", "total_price", "date"];
    const INSERT_COLUMNS: &'static str = "id, product_id, quantity, total_price, date";

    fn from_csv(fields: &[&str]) -> Option<Self> {
        Some(Self {
            id: Some(fields[0].parse().ok()?),
            product_id: fields[1].parse().ok()?,
            quantity: fields[2].parse().ok()?,
            total_price: fields[3].parse().ok()?,
            // A malformed date skips the row instead of failing the import.
            date: NaiveDate::parse_from_str(fields[4], "%Y-%m-%d").ok()?,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn bind(self, row: &mut ValuesRow<'_, '_>) {
        row.push_bind(self.id);
        row.push_bind(self.product_id);
        row.push_bind(self.quantity);
        row.push_bind(self.total_price);
        row.push_bind(self.date);
    }
}

use serde::{Deserialize, Serialize};

use crate::import::{CsvEntity, ValuesRow};
use crate::models::product::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Optional client-supplied id; the store assigns one when omitted.
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    pub category_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub brand: Option<String>,
    pub category_id: Option<i64>,
}

/// Optional equality/range filters for GET /products.
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<i64>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    pub category_id: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            brand: product.brand,
            category_id: product.category_id,
        }
    }
}

impl CsvEntity for CreateProductRequest {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "price", "brand", "category_id"];
    const INSERT_COLUMNS: &'static str = "id, name, description, price, brand, category_id";

    fn from_csv(fields: &[&str]) -> Option<Self> {
        Some(Self {
            id: Some(fields[0].parse().ok()?),
            name: fields[1].to_string(),
            description: fields[2].to_string(),
            price: fields[3].parse().ok()?,
            brand: fields[4].to_string(),
            category_id: fields[5].parse().ok()?,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn bind(self, row: &mut ValuesRow<'_, '_>) {
        row.push_bind(self.id);
        row.push_bind(self.name);
        row.push_bind(self.description);
        row.push_bind(self.price);
        row.push_bind(self.brand);
        row.push_bind(self.category_id);
    }
}

use serde::{Deserialize, Serialize};

use crate::import::{CsvEntity, ValuesRow};
use crate::models::category::Category;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Optional client-supplied id; the store assigns one when omitted.
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl CsvEntity for CreateCategoryRequest {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
    const INSERT_COLUMNS: &'static str = "id, name";

    fn from_csv(fields: &[&str]) -> Option<Self> {
        Some(Self {
            id: Some(fields[0].parse().ok()?),
            name: fields[1].to_string(),
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn bind(self, row: &mut ValuesRow<'_, '_>) {
        row.push_bind(self.id);
        row.push_bind(self.name);
    }
}

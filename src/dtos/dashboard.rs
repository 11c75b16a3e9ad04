use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TotalCategoriesResponse {
    pub total_categories: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyRevenue {
    /// "YYYY-MM" group key.
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub total_sales: i64,
    pub monthly_data: Vec<MonthlyRevenue>,
}

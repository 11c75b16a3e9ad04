use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub rows_imported: u64,
}

pub mod category;
pub mod product;
pub mod sale;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::AppError;

/// Pull the first uploaded file out of a multipart body.
pub(crate) async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_input(format!("Could not read multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::invalid_input(format!("Could not read uploaded file: {e}")))?;
        return Ok((filename, bytes));
    }
    Err(AppError::invalid_input("No file uploaded"))
}

pub mod category;
pub mod dashboard;
pub mod import;
pub mod product;
pub mod sale;

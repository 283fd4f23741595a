pub mod api;
pub mod excel_write;

pub mod header;
pub mod landing;
pub mod upload_area;
pub mod dietary_filters;
pub mod results_table;
pub mod error_fallback;

pub mod http;

// Re-export main utilities
pub use http::{get, http_get, http_status_is_ok, https_get, ResponseData};

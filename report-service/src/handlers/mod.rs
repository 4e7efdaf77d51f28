pub mod health;
pub mod reports;

pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
pub use reports::generate_pdf;

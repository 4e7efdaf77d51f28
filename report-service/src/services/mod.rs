pub mod metrics;

pub use metrics::{get_metrics, init_metrics, record_report_failure, record_report_generated};

//! Observability module
//!
//! Logging and metrics for the render pipeline and the HTTP host.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::init_metrics;

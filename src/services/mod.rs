pub mod aggregate_service;
pub mod feed_service;
pub mod chart_service;
pub mod dashboard_service;
pub mod poll_service;
pub mod scanner_service;

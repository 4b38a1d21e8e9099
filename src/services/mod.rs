pub mod analytics;
pub mod dashboard_service;
pub mod filter;

pub use analytics::*;
pub use dashboard_service::*;
pub use filter::*;

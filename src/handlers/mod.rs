pub mod api;
pub mod dashboard;

pub use api::api_config;
pub use dashboard::dashboard_config;

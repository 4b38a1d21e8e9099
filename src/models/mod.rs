pub mod common;
pub mod dashboard;
pub mod order;

pub use common::*;
pub use dashboard::*;
pub use order::*;

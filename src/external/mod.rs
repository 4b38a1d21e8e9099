pub mod pinot;

pub use pinot::*;

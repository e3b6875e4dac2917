pub mod config;
pub mod error;
pub mod types;

pub use config::{AssumptionSet, ReviewConfig};
pub use error::{Result, ScaleError};
pub use types::{Area, Category, PerCategory};

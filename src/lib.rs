pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod matrix;
pub mod optimization;
pub mod training;

pub use dataset::Dataset;
pub use error::{MlErr, Result};
pub use matrix::Matrix;

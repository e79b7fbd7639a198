//! Error types shared across the estimator.

mod types;

pub use types::{EstimateError, InputField, InvalidInputError, Result};

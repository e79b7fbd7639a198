use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::layout::LayoutError;

/// Unified result type for the estimator crate.
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Input fields accepted by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
    Area,
    Floors,
    Wage,
    Cost,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Area => "area",
            InputField::Floors => "floors",
            InputField::Wage => "wage",
            InputField::Cost => "cost",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected request input. Always names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input for `{field}`: {reason}")]
pub struct InvalidInputError {
    pub field: InputField,
    pub reason: String,
}

impl InvalidInputError {
    pub fn new(field: InputField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the estimation pipeline.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EstimateError {
    /// The rejected input field, when the error came from request validation.
    pub fn input_field(&self) -> Option<InputField> {
        match self {
            EstimateError::InvalidInput(err) => Some(err.field),
            _ => None,
        }
    }
}

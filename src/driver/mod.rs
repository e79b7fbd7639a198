//! Thin boundaries that feed requests to the estimator.

pub mod cli;
pub mod socket;

pub use cli::{CliDriver, CliDriverError, OutputFormat};
pub use socket::{Frame, SocketDriver, SocketDriverError};

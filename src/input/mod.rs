//! Request input validation and floor-spec parsing.

mod core;

pub use self::core::{ProjectInput, parse_floor_spec};

//! Layout module orchestrator.
//!
//! Downstream modules import layout types from here while the solver lives in
//! the private `core` module.

mod core;

pub use self::core::{Direction, LayoutError, LayoutNode, LayoutTree, NodeId};

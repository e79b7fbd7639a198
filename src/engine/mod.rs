//! Estimation engine: four scalar inputs in, one structured bundle out.
//!
//! The pipeline runs in a fixed order with no feedback: crew sizing, role
//! split, duration, costs, materials, weekly tables, plan variants,
//! explanations and finally the floor plan. Every constant comes from
//! [`EstimatorConfig`](crate::config::EstimatorConfig).

mod bundle;
mod core;
pub mod costs;
mod explain;
pub mod materials;
pub mod schedule;
pub mod workforce;

pub use bundle::EstimateBundle;
pub use self::core::{Estimator, estimate};
pub use costs::{CostBreakdown, PlanVariant};
pub use explain::Explanations;
pub use materials::{DeliveryItem, DeliveryWeek, Material, MaterialEstimate};
pub use schedule::ScheduleWeek;
pub use workforce::{Role, RoleAllocation, WorkforcePlan};

//! Estimator configuration table and its reference catalogs.

mod catalog;
mod core;

pub use self::core::{
    Allocation, DeliveryTemplate, EstimatorConfig, FloorPlanConfig, MaterialRates,
    PlanVariantConfig, RoleRule, RoomShare, RowTemplate, SustainabilityOption, TimelinePhase,
    UnitLabels, VariantRule, WeeklyTask, WorkforceConfig,
};

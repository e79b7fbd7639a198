use serde::Serialize;

use super::costs::{CostBreakdown, PlanVariant};
use super::explain::Explanations;
use super::materials::{DeliveryWeek, MaterialEstimate};
use super::schedule::ScheduleWeek;
use super::workforce::{Breakdown, WorkforcePlan};
use crate::config::{SustainabilityOption, TimelinePhase};
use crate::floorplan::FloorPlanLayout;

/// Everything derived for one request.
///
/// Field names are the stable wire contract of the estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateBundle {
    pub total_floors: u32,
    pub total_area: f64,
    pub workers: u32,
    #[serde(rename = "worker_breakdown", serialize_with = "serialize_breakdown")]
    pub workforce: WorkforcePlan,
    pub duration_days: u64,
    #[serde(flatten)]
    pub costs: CostBreakdown,
    pub materials: MaterialEstimate,
    pub weekly_schedule: Vec<ScheduleWeek>,
    pub material_delivery: Vec<DeliveryWeek>,
    pub alternative_plans: Vec<PlanVariant>,
    pub sustainability_options: Vec<SustainabilityOption>,
    pub timeline: Vec<TimelinePhase>,
    /// Relative path of the rendered plan; `None` when it was not written.
    pub floorplan: Option<String>,
    pub floorplan_layout: FloorPlanLayout,
    pub explanations: Explanations,
    /// Non-fatal problems, e.g. the plan image could not be stored.
    pub warnings: Vec<String>,
}

impl EstimateBundle {
    pub fn labor_cost(&self) -> f64 {
        self.costs.labor_cost
    }

    pub fn material_cost(&self) -> f64 {
        self.costs.material_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.total_cost
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

fn serialize_breakdown<S: serde::Serializer>(
    workforce: &WorkforcePlan,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Breakdown(&workforce.roles).serialize(serializer)
}

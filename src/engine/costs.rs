use serde::Serialize;

use super::schedule::duration_days;
use crate::config::PlanVariantConfig;

/// Money figures of one plan. No rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub labor_cost: f64,
    pub material_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    pub fn new(labor_cost: f64, material_cost: f64) -> Self {
        Self {
            labor_cost,
            material_cost,
            total_cost: labor_cost + material_cost,
        }
    }
}

pub fn labor_cost(workers: u32, wage: f64, days: u64) -> f64 {
    f64::from(workers) * wage * days as f64
}

pub fn base_costs(total_area: f64, workers: u32, wage: f64, unit_cost: f64, days: u64) -> CostBreakdown {
    CostBreakdown::new(labor_cost(workers, wage, days), total_area * unit_cost)
}

/// Alternative plan derived by scaling the base crew and material spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanVariant {
    pub name: String,
    pub description: String,
    pub worker_factor: f64,
    pub cost_factor: f64,
    pub workers: u32,
    pub duration_days: u64,
    pub labor_cost: f64,
    pub material_cost: f64,
    pub total_cost: f64,
}

/// Derive every configured variant from the base plan without touching it.
pub fn plan_variants(
    total_area: f64,
    base_workers: u32,
    wage: f64,
    base_material_cost: f64,
    config: &PlanVariantConfig,
) -> Vec<PlanVariant> {
    config
        .variants
        .iter()
        .map(|rule| {
            let scaled = (f64::from(base_workers) * rule.worker_factor).floor() as u32;
            let workers = scaled.max(config.min_workers);
            let days = duration_days(total_area, workers);
            let costs = CostBreakdown::new(
                labor_cost(workers, wage, days),
                (base_material_cost * rule.cost_factor).floor(),
            );
            PlanVariant {
                name: rule.name.clone(),
                description: rule.description.clone(),
                worker_factor: rule.worker_factor,
                cost_factor: rule.cost_factor,
                workers,
                duration_days: days,
                labor_cost: costs.labor_cost,
                material_cost: costs.material_cost,
                total_cost: costs.total_cost,
            }
        })
        .collect()
}

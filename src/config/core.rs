use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::catalog;
use crate::engine::{Material, Role};
use crate::error::{EstimateError, Result};

/// Every tunable constant of the estimator in one table.
///
/// `Default` yields the reference values. Alternative rule sets are loaded
/// from JSON with [`EstimatorConfig::from_json_str`] or
/// [`EstimatorConfig::from_path`]; missing sections fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub units: UnitLabels,
    pub workforce: WorkforceConfig,
    pub materials: MaterialRates,
    pub weekly_tasks: Vec<WeeklyTask>,
    pub deliveries: Vec<DeliveryTemplate>,
    pub plan_variants: PlanVariantConfig,
    pub sustainability: Vec<SustainabilityOption>,
    pub timeline: Vec<TimelinePhase>,
    pub floor_plan: FloorPlanConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            units: UnitLabels::default(),
            workforce: WorkforceConfig::default(),
            materials: MaterialRates::default(),
            weekly_tasks: catalog::weekly_tasks(),
            deliveries: catalog::deliveries(),
            plan_variants: PlanVariantConfig::default(),
            sustainability: catalog::sustainability_options(),
            timeline: catalog::timeline(),
            floor_plan: FloorPlanConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject tables that would produce nonsensical estimates.
    pub fn validate(&self) -> Result<()> {
        let workforce = &self.workforce;
        if workforce.min_workers == 0 {
            return Err(config_error("workforce.min_workers must be at least 1"));
        }
        if !(workforce.area_per_worker.is_finite() && workforce.area_per_worker > 0.0) {
            return Err(config_error("workforce.area_per_worker must be positive"));
        }
        for rule in &workforce.roles {
            if rule.role == Role::Supervisor {
                return Err(config_error(
                    "supervisors absorb the remainder and cannot have a fraction rule",
                ));
            }
            if !(0.0..=1.0).contains(&rule.fraction) {
                return Err(config_error(format!(
                    "fraction for {} must be within 0..=1",
                    rule.role.key()
                )));
            }
        }
        for role in Role::TRADES {
            let count = workforce.roles.iter().filter(|rule| rule.role == role).count();
            if count != 1 {
                return Err(config_error(format!(
                    "workforce.roles must list {} exactly once",
                    role.key()
                )));
            }
        }

        for (name, rate) in self.materials.rates() {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(config_error(format!("materials.{name} must be non-negative")));
            }
        }

        let mut delivered: HashMap<Material, u32> = HashMap::new();
        for template in &self.deliveries {
            for allocation in &template.allocations {
                let total = delivered.entry(allocation.material).or_default();
                *total = total.saturating_add(allocation.percent);
            }
        }
        for (material, percent) in delivered {
            if percent > 100 {
                return Err(config_error(format!(
                    "deliveries allocate {percent}% of {}",
                    material.key()
                )));
            }
        }

        let variants = &self.plan_variants;
        if variants.min_workers == 0 {
            return Err(config_error("plan_variants.min_workers must be at least 1"));
        }
        for variant in &variants.variants {
            if !(variant.worker_factor > 0.0 && variant.cost_factor >= 0.0) {
                return Err(config_error(format!(
                    "plan variant `{}` has invalid factors",
                    variant.name
                )));
            }
        }

        if self.floor_plan.rows.is_empty() {
            return Err(config_error("floor_plan.rows must not be empty"));
        }
        for row in &self.floor_plan.rows {
            if row.rooms.is_empty() {
                return Err(config_error("floor plan rows must hold at least one room"));
            }
            if let Some(room) = row.rooms.iter().find(|room| !(room.share > 0.0)) {
                return Err(config_error(format!(
                    "room `{}` must have a positive share",
                    room.name
                )));
            }
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> EstimateError {
    EstimateError::Config(message.into())
}

/// Labels used when templating explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitLabels {
    pub area: String,
    pub currency: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self {
            area: "sq yards".to_string(),
            currency: "₹".to_string(),
        }
    }
}

/// Throughput model for crew sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceConfig {
    pub min_workers: u32,
    /// Area one worker notionally covers.
    pub area_per_worker: f64,
    pub roles: Vec<RoleRule>,
    pub supervisor_minimum: u32,
    pub supervisor_duty: String,
}

impl Default for WorkforceConfig {
    fn default() -> Self {
        Self {
            min_workers: 6,
            area_per_worker: 180.0,
            roles: catalog::role_rules(),
            supervisor_minimum: 1,
            supervisor_duty: "Oversee site safety, quality checks and daily coordination"
                .to_string(),
        }
    }
}

/// Share of the crew assigned to a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRule {
    pub role: Role,
    pub fraction: f64,
    pub minimum: u32,
    pub duty: String,
}

/// Material consumption per unit of total area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRates {
    pub cement_bags: f64,
    pub steel_kg: f64,
    pub sand_tons: f64,
    pub bricks: f64,
}

impl Default for MaterialRates {
    fn default() -> Self {
        Self {
            cement_bags: 0.4,
            steel_kg: 4.0,
            sand_tons: 0.5,
            bricks: 8.0,
        }
    }
}

impl MaterialRates {
    pub fn rate(&self, material: Material) -> f64 {
        match material {
            Material::Cement => self.cement_bags,
            Material::Steel => self.steel_kg,
            Material::Sand => self.sand_tons,
            Material::Bricks => self.bricks,
        }
    }

    fn rates(&self) -> [(&'static str, f64); 4] {
        Material::ALL.map(|material| (material.key(), self.rate(material)))
    }
}

/// Template for one week of the build schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTask {
    pub week: u32,
    pub task: String,
    pub materials: String,
    /// Trades whose full crews work this week.
    pub crew: Vec<Role>,
}

/// Template for one week of material deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTemplate {
    pub week: u32,
    pub allocations: Vec<Allocation>,
    pub note: String,
}

/// Percentage of a material's total quantity delivered in a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub material: Material,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanVariantConfig {
    /// Crew floor applied to every variant.
    pub min_workers: u32,
    pub variants: Vec<VariantRule>,
}

impl Default for PlanVariantConfig {
    fn default() -> Self {
        Self {
            min_workers: 4,
            variants: catalog::plan_variants(),
        }
    }
}

/// Scaling applied to the base plan to produce an alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRule {
    pub name: String,
    pub worker_factor: f64,
    pub cost_factor: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityOption {
    pub material: String,
    pub co2_impact: String,
    pub cost_change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    pub duration_days: u32,
    pub color: String,
}

/// Rows of rooms tiled into the square footprint, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlanConfig {
    pub rows: Vec<RowTemplate>,
}

impl Default for FloorPlanConfig {
    fn default() -> Self {
        Self {
            rows: catalog::floor_plan_rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTemplate {
    pub rooms: Vec<RoomShare>,
}

/// A room's share of the total built-up area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomShare {
    pub name: String,
    pub share: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        EstimatorConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = EstimatorConfig::from_json_str(
            r#"{"workforce": {"min_workers": 5, "area_per_worker": 200.0}}"#,
        )
        .unwrap();
        assert_eq!(config.workforce.min_workers, 5);
        assert_eq!(config.workforce.area_per_worker, 200.0);
        assert_eq!(config.workforce.roles.len(), 6);
        assert_eq!(config.weekly_tasks.len(), 8);
        assert_eq!(config.units.currency, "₹");
    }

    #[test]
    fn zero_minimum_workers_is_rejected() {
        let mut config = EstimatorConfig::default();
        config.workforce.min_workers = 0;
        assert!(matches!(config.validate(), Err(EstimateError::Config(_))));
    }

    #[test]
    fn over_allocated_deliveries_are_rejected() {
        let mut config = EstimatorConfig::default();
        config.deliveries[0].allocations.push(Allocation {
            material: Material::Bricks,
            percent: 90,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bricks"));
    }

    #[test]
    fn huge_delivery_percentages_are_reported() {
        let mut config = EstimatorConfig::default();
        for percent in [u32::MAX, u32::MAX] {
            config.deliveries[0].allocations.push(Allocation {
                material: Material::Steel,
                percent,
            });
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("steel_kg"));
    }

    #[test]
    fn duplicate_trade_rule_is_rejected() {
        let mut config = EstimatorConfig::default();
        let first = config.workforce.roles[0].clone();
        config.workforce.roles.push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = EstimatorConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, EstimateError::Serde(_)));
    }
}

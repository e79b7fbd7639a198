use serde::Serialize;

use super::costs::CostBreakdown;
use super::materials::MaterialEstimate;
use super::workforce::{Role, WorkforcePlan};
use crate::config::EstimatorConfig;
use crate::input::ProjectInput;

/// Human-readable account of each derived figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanations {
    pub workers: String,
    pub worker_breakdown: String,
    pub duration: String,
    pub labor_cost: String,
    pub material_cost: String,
    pub total_cost: String,
    pub materials: String,
    pub floorplan: String,
}

pub(crate) struct ExplainContext<'a> {
    pub input: &'a ProjectInput,
    pub config: &'a EstimatorConfig,
    pub workforce: &'a WorkforcePlan,
    pub duration_days: u64,
    pub costs: &'a CostBreakdown,
    pub materials: &'a MaterialEstimate,
}

pub(crate) fn explain(ctx: &ExplainContext<'_>) -> Explanations {
    let unit = &ctx.config.units.area;
    let currency = &ctx.config.units.currency;
    let total_area = ctx.input.total_area();
    let workers = ctx.workforce.total_workers;
    let rates = &ctx.config.materials;
    let rows = ctx.config.floor_plan.rows.len();

    let trades = Role::TRADES
        .iter()
        .filter_map(|role| {
            ctx.config
                .workforce
                .roles
                .iter()
                .find(|rule| rule.role == *role)
                .map(|rule| format!("{} {:.0}%", role.key(), rule.fraction * 100.0))
        })
        .collect::<Vec<_>>()
        .join(", ");

    Explanations {
        workers: format!(
            "{workers} workers are estimated from a total built-up area of {} {unit} \
             ({} {unit} x {} floors), assuming 1 worker per {} {unit} with a minimum of {}.",
            number(total_area),
            number(ctx.input.area),
            ctx.input.total_floors,
            number(ctx.config.workforce.area_per_worker),
            ctx.config.workforce.min_workers,
        ),
        worker_breakdown: format!(
            "Trades are allocated as {trades} of the crew, each with a minimum head count; \
             supervisors take the remaining {} position(s).",
            ctx.workforce.count(Role::Supervisor),
        ),
        duration: format!(
            "Project duration is {} days: {} {unit} shared across {workers} workers.",
            ctx.duration_days,
            number(total_area),
        ),
        labor_cost: format!(
            "Labor cost is {workers} workers x {currency}{} per day x {} days = {currency}{}.",
            number(ctx.input.wage),
            ctx.duration_days,
            number(ctx.costs.labor_cost),
        ),
        material_cost: format!(
            "Material cost is {} {unit} x {currency}{} per {unit} = {currency}{}.",
            number(total_area),
            number(ctx.input.cost),
            number(ctx.costs.material_cost),
        ),
        total_cost: format!(
            "Total cost is labor ({currency}{}) plus materials ({currency}{}) = {currency}{}.",
            number(ctx.costs.labor_cost),
            number(ctx.costs.material_cost),
            number(ctx.costs.total_cost),
        ),
        materials: format!(
            "Per {unit}: {} cement bags, {} kg steel, {} tons sand and {} bricks, giving \
             {} bags, {} kg, {} tons and {} bricks in total.",
            number(rates.cement_bags),
            number(rates.steel_kg),
            number(rates.sand_tons),
            number(rates.bricks),
            ctx.materials.cement_bags,
            ctx.materials.steel_kg,
            ctx.materials.sand_tons,
            ctx.materials.bricks,
        ),
        floorplan: format!(
            "The footprint is modelled as a {side:.1} x {side:.1} square split into {rows} \
             equal-height rows; room widths follow each room's share of its row.",
            side = total_area.sqrt(),
        ),
    }
}

/// At most two decimals, trailing zeros dropped.
fn number(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

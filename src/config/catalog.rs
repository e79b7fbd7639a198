//! Reference tables backing `EstimatorConfig::default()`.

use super::core::{
    Allocation, DeliveryTemplate, RoleRule, RoomShare, RowTemplate, SustainabilityOption,
    TimelinePhase, VariantRule, WeeklyTask,
};
use crate::engine::{Material, Role};

pub(crate) fn role_rules() -> Vec<RoleRule> {
    [
        (Role::Mason, 0.25, 1, "Brickwork, blockwork and plastering"),
        (Role::Helper, 0.30, 2, "Carry materials, mix mortar and assist skilled trades"),
        (Role::SteelWorker, 0.15, 1, "Cut, bend and tie reinforcement steel"),
        (Role::Carpenter, 0.10, 1, "Formwork, shuttering, doors and windows"),
        (Role::Electrician, 0.05, 1, "Conduits, wiring and fixtures"),
        (Role::Plumber, 0.05, 1, "Water supply, drainage and sanitary fittings"),
    ]
    .into_iter()
    .map(|(role, fraction, minimum, duty)| RoleRule {
        role,
        fraction,
        minimum,
        duty: duty.to_string(),
    })
    .collect()
}

pub(crate) fn weekly_tasks() -> Vec<WeeklyTask> {
    use Role::*;

    [
        (1, "Site clearing and excavation", "Excavation tools, sand for levelling", vec![Helper, Supervisor]),
        (2, "Foundation and footings", "Cement, sand, steel", vec![Mason, Helper, SteelWorker]),
        (3, "Plinth beams and columns", "Steel, cement, shuttering", vec![Mason, SteelWorker, Carpenter]),
        (4, "Slab shuttering and casting", "Steel, cement, sand", vec![Mason, Helper, SteelWorker, Carpenter]),
        (5, "Brickwork and walls", "Bricks, cement, sand", vec![Mason, Helper]),
        (6, "Electrical and plumbing rough-in", "Conduits, pipes, bricks", vec![Electrician, Plumber, Helper]),
        (7, "Plastering and flooring", "Cement, sand, bricks", vec![Mason, Helper]),
        (8, "Finishing and handover", "Paint, fixtures, cement", vec![Mason, Carpenter, Electrician, Plumber, Supervisor]),
    ]
    .into_iter()
    .map(|(week, task, materials, crew)| WeeklyTask {
        week,
        task: task.to_string(),
        materials: materials.to_string(),
        crew,
    })
    .collect()
}

pub(crate) fn deliveries() -> Vec<DeliveryTemplate> {
    use Material::*;

    [
        (1, vec![(Sand, 10)], "Sand for levelling and site preparation"),
        (2, vec![(Cement, 20), (Sand, 20), (Steel, 15)], "Foundation concrete and footing steel"),
        (3, vec![(Cement, 15), (Steel, 30)], "Column and plinth beam reinforcement"),
        (4, vec![(Cement, 20), (Sand, 15), (Steel, 35)], "Slab casting materials"),
        (5, vec![(Bricks, 50), (Cement, 10), (Sand, 15)], "First brick consignment and mortar"),
        (6, vec![(Bricks, 30)], "Second brick consignment"),
        (7, vec![(Cement, 20), (Sand, 25), (Bricks, 20)], "Plastering and flooring materials"),
        (8, vec![(Cement, 10), (Sand, 10)], "Finishing touches and reserve stock"),
    ]
    .into_iter()
    .map(|(week, allocations, note)| DeliveryTemplate {
        week,
        allocations: allocations
            .into_iter()
            .map(|(material, percent)| Allocation { material, percent })
            .collect(),
        note: note.to_string(),
    })
    .collect()
}

pub(crate) fn plan_variants() -> Vec<VariantRule> {
    [
        ("Fast Track", 1.5, 1.15, "Larger crew and premium sourcing to finish sooner"),
        ("Balanced", 1.0, 1.0, "Reference crew and standard materials"),
        ("Budget Saver", 0.75, 0.9, "Smaller crew and economical materials over a longer build"),
        ("High Quality", 1.2, 1.25, "Extra skilled labour and premium-grade materials"),
    ]
    .into_iter()
    .map(|(name, worker_factor, cost_factor, description)| VariantRule {
        name: name.to_string(),
        worker_factor,
        cost_factor,
        description: description.to_string(),
    })
    .collect()
}

pub(crate) fn sustainability_options() -> Vec<SustainabilityOption> {
    [
        ("Fly ash bricks", "Around 20% lower CO2 than fired clay bricks", "5-10% cheaper"),
        ("AAC blocks", "Up to 30% lower embodied carbon, better insulation", "Roughly cost neutral"),
        ("PPC / slag blended cement", "15-25% lower CO2 than OPC", "Slightly cheaper"),
        ("Recycled steel", "Up to 60% lower CO2 than virgin steel", "0-5% costlier"),
        ("Manufactured sand (M-sand)", "Avoids river sand mining", "10-15% cheaper"),
    ]
    .into_iter()
    .map(|(material, co2_impact, cost_change)| SustainabilityOption {
        material: material.to_string(),
        co2_impact: co2_impact.to_string(),
        cost_change: cost_change.to_string(),
    })
    .collect()
}

pub(crate) fn timeline() -> Vec<TimelinePhase> {
    [
        ("Planning and approvals", 10, "#9e9e9e"),
        ("Foundation", 20, "#8d6e63"),
        ("Structure", 45, "#607d8b"),
        ("Brickwork", 25, "#e57373"),
        ("Electrical and plumbing", 20, "#ffb74d"),
        ("Finishing", 30, "#81c784"),
        ("Handover", 5, "#64b5f6"),
    ]
    .into_iter()
    .map(|(phase, duration_days, color)| TimelinePhase {
        phase: phase.to_string(),
        duration_days,
        color: color.to_string(),
    })
    .collect()
}

pub(crate) fn floor_plan_rows() -> Vec<RowTemplate> {
    [
        vec![("Living Room", 0.30), ("Bedroom", 0.25)],
        vec![("Kitchen", 0.20), ("Bathroom", 0.10), ("Corridor", 0.15)],
    ]
    .into_iter()
    .map(|rooms| RowTemplate {
        rooms: rooms
            .into_iter()
            .map(|(name, share)| RoomShare {
                name: name.to_string(),
                share,
            })
            .collect(),
    })
    .collect()
}

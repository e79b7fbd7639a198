use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::WorkforceConfig;

/// Named trades on the site crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Mason,
    Helper,
    SteelWorker,
    Carpenter,
    Electrician,
    Plumber,
    Supervisor,
}

impl Role {
    /// Trades sized from a crew fraction, in breakdown order.
    pub const TRADES: [Role; 6] = [
        Role::Mason,
        Role::Helper,
        Role::SteelWorker,
        Role::Carpenter,
        Role::Electrician,
        Role::Plumber,
    ];

    /// Key used in the `worker_breakdown` map.
    pub fn key(&self) -> &'static str {
        match self {
            Role::Mason => "masons",
            Role::Helper => "helpers",
            Role::SteelWorker => "steel_workers",
            Role::Carpenter => "carpenters",
            Role::Electrician => "electricians",
            Role::Plumber => "plumbers",
            Role::Supervisor => "supervisors",
        }
    }
}

/// Head count and duty for one trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleAllocation {
    #[serde(skip)]
    pub role: Role,
    pub count: u32,
    pub duty: String,
}

/// Crew size and its split across trades.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkforcePlan {
    pub total_workers: u32,
    /// Trades in `Role::TRADES` order followed by supervisors.
    pub roles: Vec<RoleAllocation>,
}

impl WorkforcePlan {
    pub fn count(&self, role: Role) -> u32 {
        self.roles
            .iter()
            .find(|allocation| allocation.role == role)
            .map(|allocation| allocation.count)
            .unwrap_or(0)
    }

    /// Sum of every listed role, supervisors included. May differ from
    /// `total_workers` because per-role minimums are applied independently.
    pub fn role_sum(&self) -> u32 {
        self.roles
            .iter()
            .fold(0u32, |sum, allocation| sum.saturating_add(allocation.count))
    }

    /// Combined head count of the given trades.
    pub fn crew_size(&self, crew: &[Role]) -> u32 {
        crew.iter()
            .fold(0u32, |sum, role| sum.saturating_add(self.count(*role)))
    }
}

/// Serializes as `{ "<role key>": { "count": .., "duty": .. }, .. }`.
pub struct Breakdown<'a>(pub &'a [RoleAllocation]);

impl Serialize for Breakdown<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for allocation in self.0 {
            map.serialize_entry(allocation.role.key(), allocation)?;
        }
        map.end()
    }
}

/// Number of workers needed for `total_area`, bounded below by the minimum.
pub fn size_crew(total_area: f64, config: &WorkforceConfig) -> u32 {
    let by_throughput = (total_area / config.area_per_worker).floor();
    let by_throughput = if by_throughput >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        by_throughput as u32
    };
    by_throughput.max(config.min_workers)
}

/// Size the crew and split it across trades.
///
/// Each trade gets `max(minimum, floor(total * fraction))`; supervisors take
/// whatever remains, with a floor of the supervisor minimum.
pub fn plan_workforce(total_area: f64, config: &WorkforceConfig) -> WorkforcePlan {
    let total_workers = size_crew(total_area, config);

    let mut roles: Vec<RoleAllocation> = Role::TRADES
        .iter()
        .filter_map(|role| config.roles.iter().find(|rule| rule.role == *role))
        .map(|rule| {
            let share = (f64::from(total_workers) * rule.fraction).floor() as u32;
            RoleAllocation {
                role: rule.role,
                count: share.max(rule.minimum),
                duty: rule.duty.clone(),
            }
        })
        .collect();

    let assigned = roles
        .iter()
        .fold(0u32, |sum, allocation| sum.saturating_add(allocation.count));
    roles.push(RoleAllocation {
        role: Role::Supervisor,
        count: total_workers
            .saturating_sub(assigned)
            .max(config.supervisor_minimum),
        duty: config.supervisor_duty.clone(),
    });

    WorkforcePlan {
        total_workers,
        roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorkforceConfig {
        WorkforceConfig::default()
    }

    #[test]
    fn small_projects_get_the_minimum_crew() {
        assert_eq!(size_crew(10.0, &config()), 6);
        assert_eq!(size_crew(1079.0, &config()), 6);
        assert_eq!(size_crew(1260.0, &config()), 7);
    }

    #[test]
    fn reference_breakdown_for_two_thousand_units() {
        let plan = plan_workforce(2000.0, &config());
        assert_eq!(plan.total_workers, 11);
        assert_eq!(plan.count(Role::Mason), 2);
        assert_eq!(plan.count(Role::Helper), 3);
        assert_eq!(plan.count(Role::SteelWorker), 1);
        assert_eq!(plan.count(Role::Carpenter), 1);
        assert_eq!(plan.count(Role::Electrician), 1);
        assert_eq!(plan.count(Role::Plumber), 1);
        assert_eq!(plan.count(Role::Supervisor), 2);
        assert_eq!(plan.role_sum(), 11);
    }

    #[test]
    fn minimums_can_push_role_sum_past_total() {
        // 6 workers: minimums alone need 7 trade slots, supervisors still get 1.
        let plan = plan_workforce(100.0, &config());
        assert_eq!(plan.total_workers, 6);
        assert_eq!(plan.count(Role::Helper), 2);
        assert_eq!(plan.count(Role::Supervisor), 1);
        assert_eq!(plan.role_sum(), 8);
    }

    #[test]
    fn breakdown_serializes_as_role_map() {
        let plan = plan_workforce(2000.0, &config());
        let value = serde_json::to_value(Breakdown(&plan.roles)).unwrap();
        assert_eq!(value["masons"]["count"], 2);
        assert_eq!(value["supervisors"]["count"], 2);
        assert!(value["steel_workers"]["duty"].as_str().unwrap().contains("steel"));
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn crew_size_sums_named_trades() {
        let plan = plan_workforce(2000.0, &config());
        assert_eq!(plan.crew_size(&[Role::Mason, Role::Helper]), 5);
        assert_eq!(plan.crew_size(&[]), 0);
    }
}

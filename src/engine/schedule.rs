use serde::Serialize;

use super::workforce::{Role, WorkforcePlan};
use crate::config::WeeklyTask;

/// One week of the build schedule with its assigned head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleWeek {
    pub week: u32,
    pub task: String,
    pub materials: String,
    pub crew: Vec<Role>,
    pub workers: u32,
}

/// Whole days needed for `total_area` at one area quantum per worker-day.
///
/// `workers` is never zero for a validated configuration.
pub fn duration_days(total_area: f64, workers: u32) -> u64 {
    (total_area / f64::from(workers.max(1))).floor() as u64
}

pub fn build_schedule(tasks: &[WeeklyTask], workforce: &WorkforcePlan) -> Vec<ScheduleWeek> {
    tasks
        .iter()
        .map(|task| ScheduleWeek {
            week: task.week,
            task: task.task.clone(),
            materials: task.materials.clone(),
            crew: task.crew.clone(),
            workers: workforce.crew_size(&task.crew),
        })
        .collect()
}

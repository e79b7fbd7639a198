use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use super::bundle::EstimateBundle;
use super::costs::{base_costs, plan_variants};
use super::explain::{ExplainContext, explain};
use super::materials::{estimate_materials, plan_deliveries};
use super::schedule::{build_schedule, duration_days};
use super::workforce::plan_workforce;
use crate::artifact::ArtifactStore;
use crate::config::EstimatorConfig;
use crate::error::{InvalidInputError, Result};
use crate::floorplan::{FloorPlanLayout, generate_layout};
use crate::input::ProjectInput;
use crate::logging::{
    ARTIFACT_TARGET, ENGINE_TARGET, LogLevel, Logger, METRICS_TARGET, json_kv, json_str,
};
use crate::metrics::EstimatorMetrics;

/// Estimation pipeline bound to one configuration table.
///
/// Holds no per-request state; every call to [`Estimator::estimate`] derives
/// the bundle from scratch.
#[derive(Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    artifacts: Option<ArtifactStore>,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<EstimatorMetrics>>>,
    started: Instant,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            artifacts: None,
            logger: None,
            metrics: None,
            started: Instant::now(),
        })
    }

    pub fn with_default() -> Self {
        Self {
            config: EstimatorConfig::default(),
            artifacts: None,
            logger: None,
            metrics: None,
            started: Instant::now(),
        }
    }

    /// Persist a rendered floor plan for every estimate.
    pub fn with_artifacts(mut self, store: ArtifactStore) -> Self {
        self.artifacts = Some(store);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EstimatorMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EstimatorMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Log a metrics snapshot, if both metrics and a logger are configured.
    pub fn emit_metrics(&self) {
        let (Some(logger), Some(metrics)) = (&self.logger, &self.metrics) else {
            return;
        };
        let snapshot = match metrics.lock() {
            Ok(metrics) => metrics.snapshot(self.started.elapsed()),
            Err(_) => return,
        };
        let _ = logger.log_event(snapshot.to_log_event(METRICS_TARGET));
    }

    /// Validate textual inputs and estimate. Rejections are logged and
    /// counted before being returned.
    pub fn estimate_raw(&self, area: &str, floors: &str, wage: &str, cost: &str) -> Result<EstimateBundle> {
        let input = ProjectInput::parse(area, floors, wage, cost)
            .map_err(|err| self.reject(err))?;
        Ok(self.estimate(&input))
    }

    /// Validate a JSON request payload and estimate.
    pub fn estimate_json(&self, payload: &serde_json::Value) -> Result<EstimateBundle> {
        let input = ProjectInput::from_json(payload).map_err(|err| self.reject(err))?;
        Ok(self.estimate(&input))
    }

    /// Derive the full bundle for a validated input.
    pub fn estimate(&self, input: &ProjectInput) -> EstimateBundle {
        let config = &self.config;
        let total_area = input.total_area();

        let workforce = plan_workforce(total_area, &config.workforce);
        let workers = workforce.total_workers;
        let days = duration_days(total_area, workers);
        let costs = base_costs(total_area, workers, input.wage, input.cost, days);
        let materials = estimate_materials(total_area, &config.materials);
        let weekly_schedule = build_schedule(&config.weekly_tasks, &workforce);
        let material_delivery = plan_deliveries(&materials, &config.deliveries);
        let alternative_plans = plan_variants(
            total_area,
            workers,
            input.wage,
            costs.material_cost,
            &config.plan_variants,
        );
        let explanations = explain(&ExplainContext {
            input,
            config,
            workforce: &workforce,
            duration_days: days,
            costs: &costs,
            materials: &materials,
        });

        let mut warnings = Vec::new();
        // Area and shares are validated upstream, so the solver only fails on
        // a pathological configuration; fall back to an empty plan then.
        let floorplan_layout = match generate_layout(total_area, &config.floor_plan) {
            Ok(layout) => layout,
            Err(err) => {
                warnings.push(format!("floor plan could not be laid out: {err}"));
                FloorPlanLayout {
                    total_area,
                    side: total_area.sqrt(),
                    rows: 0,
                    rooms: Vec::new(),
                }
            }
        };

        let floorplan = match (&self.artifacts, floorplan_layout.rooms.is_empty()) {
            (Some(store), false) => match store.store(input, &floorplan_layout) {
                Ok(path) => {
                    self.record(|metrics| metrics.record_artifact(true));
                    Some(path.to_string_lossy().replace('\\', "/"))
                }
                Err(err) => {
                    self.record(|metrics| metrics.record_artifact(false));
                    self.log(
                        LogLevel::Warn,
                        ARTIFACT_TARGET,
                        "artifact_write_failed",
                        [json_str("error", err.to_string())],
                    );
                    warnings.push(format!("floor plan image unavailable: {err}"));
                    None
                }
            },
            _ => None,
        };

        self.record(EstimatorMetrics::record_estimate);
        self.log(
            LogLevel::Info,
            ENGINE_TARGET,
            "estimate_completed",
            [
                json_str("floors", input.floors.clone()),
                json_kv("total_area", json!(total_area)),
                json_kv("workers", workers),
                json_kv("duration_days", days),
                json_kv("total_cost", json!(costs.total_cost)),
                json_kv("warnings", warnings.len()),
            ],
        );

        EstimateBundle {
            total_floors: input.total_floors,
            total_area,
            workers,
            workforce,
            duration_days: days,
            costs,
            materials,
            weekly_schedule,
            material_delivery,
            alternative_plans,
            sustainability_options: config.sustainability.clone(),
            timeline: config.timeline.clone(),
            floorplan,
            floorplan_layout,
            explanations,
            warnings,
        }
    }

    fn reject(&self, err: InvalidInputError) -> crate::error::EstimateError {
        self.record(EstimatorMetrics::record_rejected_input);
        self.log(
            LogLevel::Warn,
            ENGINE_TARGET,
            "input_rejected",
            [
                json_str("field", err.field.as_str()),
                json_str("reason", err.reason.clone()),
            ],
        );
        err.into()
    }

    fn record(&self, update: impl FnOnce(&mut EstimatorMetrics)) {
        if let Some(metrics) = &self.metrics {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut *guard);
            }
        }
    }

    fn log<const N: usize>(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: [(String, serde_json::Value); N],
    ) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_with_fields(level, target, message, fields);
        }
    }
}

/// Estimate with the reference configuration and no artifact store.
pub fn estimate(area: f64, floors: &str, wage: f64, cost: f64) -> Result<EstimateBundle> {
    let input = ProjectInput::new(area, floors, wage, cost)?;
    Ok(Estimator::with_default().estimate(&input))
}

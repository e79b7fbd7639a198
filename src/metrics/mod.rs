use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Running counters for an estimator instance.
#[derive(Debug, Default, Clone)]
pub struct EstimatorMetrics {
    estimates: u64,
    rejected_inputs: u64,
    artifacts_written: u64,
    artifact_failures: u64,
}

impl EstimatorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_estimate(&mut self) {
        self.estimates = self.estimates.saturating_add(1);
    }

    pub fn record_rejected_input(&mut self) {
        self.rejected_inputs = self.rejected_inputs.saturating_add(1);
    }

    pub fn record_artifact(&mut self, written: bool) {
        if written {
            self.artifacts_written = self.artifacts_written.saturating_add(1);
        } else {
            self.artifact_failures = self.artifact_failures.saturating_add(1);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            estimates: self.estimates,
            rejected_inputs: self.rejected_inputs,
            artifacts_written: self.artifacts_written,
            artifact_failures: self.artifact_failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub estimates: u64,
    pub rejected_inputs: u64,
    pub artifacts_written: u64,
    pub artifact_failures: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "estimator_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("estimates".to_string(), json!(self.estimates));
        map.insert("rejected_inputs".to_string(), json!(self.rejected_inputs));
        map.insert("artifacts_written".to_string(), json!(self.artifacts_written));
        map.insert("artifact_failures".to_string(), json!(self.artifact_failures));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_counters() {
        let mut metrics = EstimatorMetrics::new();
        metrics.record_estimate();
        metrics.record_estimate();
        metrics.record_rejected_input();
        metrics.record_artifact(true);
        metrics.record_artifact(false);

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.estimates, 2);
        assert_eq!(snapshot.rejected_inputs, 1);
        assert_eq!(snapshot.artifacts_written, 1);
        assert_eq!(snapshot.artifact_failures, 1);

        let event = snapshot.to_log_event("estimator::metrics");
        assert_eq!(event.message, "estimator_metrics");
        assert_eq!(event.fields["uptime_ms"], 1500);
    }
}

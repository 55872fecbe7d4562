use serde::Deserialize;
use serde_json::Value;

/// A single metrics snapshot extracted from one log line.
///
/// The Timely Worlds runtime emits one of these per epoch (plus a final
/// snapshot per run) as a JSON payload. `label` names the scenario or run
/// that produced the snapshot and is the grouping key for summaries. Every
/// counter is optional: a snapshot only carries the fields its producer
/// tracked, and `null` means the same as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsRecord {
    pub label: String,
    pub base_events: Option<f64>,
    pub predicted_events: Option<f64>,
    pub scenario_created: Option<f64>,
    pub scenario_retired: Option<f64>,
    pub scenario_alerts: Option<f64>,
    pub scenario_active_peak: Option<f64>,
    pub elapsed_ms: Option<f64>,
}

impl MetricsRecord {
    /// Convert a parsed JSON object into a typed record.
    ///
    /// Returns `None` when the object has no string `label`, or when a
    /// recognized field holds something other than a number or `null`.
    /// Keys outside the recognized set are ignored.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Per-label aggregation of metric records.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::MetricsRecord;

/// Aggregate statistics for one label.
///
/// `count` is always present. Each counter total is present only if the
/// counter appeared (non-null) in at least one contributing record; records
/// without it contribute zero to an existing total. The two averages are
/// omitted entirely when they can't be computed, never zeroed or nulled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_events: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_events: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_created: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_retired: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_alerts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_active_peak: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_base_throughput_per_sec: Option<f64>,
}

/// Group records by exact label and compute per-label aggregates.
///
/// Label order in the result is not significant; a BTreeMap keeps output
/// deterministic.
pub fn summarize(records: &[MetricsRecord]) -> BTreeMap<String, LabelSummary> {
    let mut groups: BTreeMap<String, LabelAccumulator> = BTreeMap::new();
    for record in records {
        groups.entry(record.label.clone()).or_default().add(record);
    }

    groups
        .into_iter()
        .map(|(label, acc)| (label, acc.finish()))
        .collect()
}

/// Running accumulator for one label's group.
#[derive(Debug, Default)]
struct LabelAccumulator {
    count: usize,
    base_events: Option<f64>,
    predicted_events: Option<f64>,
    scenario_created: Option<f64>,
    scenario_retired: Option<f64>,
    scenario_alerts: Option<f64>,
    scenario_active_peak: Option<f64>,
    elapsed: Vec<f64>,
}

impl LabelAccumulator {
    fn add(&mut self, record: &MetricsRecord) {
        self.count += 1;
        add_total(&mut self.base_events, record.base_events);
        add_total(&mut self.predicted_events, record.predicted_events);
        add_total(&mut self.scenario_created, record.scenario_created);
        add_total(&mut self.scenario_retired, record.scenario_retired);
        add_total(&mut self.scenario_alerts, record.scenario_alerts);
        add_total(&mut self.scenario_active_peak, record.scenario_active_peak);
        if let Some(ms) = record.elapsed_ms {
            self.elapsed.push(ms);
        }
    }

    fn finish(self) -> LabelSummary {
        let avg_elapsed_ms = if self.elapsed.is_empty() {
            None
        } else {
            Some(self.elapsed.iter().sum::<f64>() / self.elapsed.len() as f64)
        };

        // Mean per-record base-event rate in events per second; requires a
        // non-zero mean elapsed time and a positive base total.
        let avg_base_throughput_per_sec = match (avg_elapsed_ms, self.base_events) {
            (Some(avg_ms), Some(total)) if avg_ms != 0.0 && total > 0.0 => {
                Some((total / self.count as f64) / (avg_ms / 1000.0))
            }
            _ => None,
        };

        LabelSummary {
            count: self.count,
            base_events: self.base_events,
            predicted_events: self.predicted_events,
            scenario_created: self.scenario_created,
            scenario_retired: self.scenario_retired,
            scenario_alerts: self.scenario_alerts,
            scenario_active_peak: self.scenario_active_peak,
            avg_elapsed_ms,
            avg_base_throughput_per_sec,
        }
    }
}

/// Fold a record's value into a running total.
///
/// A total exists once its key has appeared in any record; records without
/// the key contribute zero rather than clearing it.
fn add_total(total: &mut Option<f64>, value: Option<f64>) {
    if let Some(v) = value {
        *total = Some(total.unwrap_or(0.0) + v);
    }
}

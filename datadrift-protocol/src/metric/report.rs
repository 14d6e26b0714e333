use serde::{Deserialize, Serialize};

use super::event::ChangeEvent;

/// Chronological outcome of one change-detection run: the ordered event
/// sequence plus the rounded boundary values of the series.
///
/// `first_value`/`last_value` always reflect the chronological extremes,
/// independent of how many observations collapsed into no event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeTimeline {
    pub first_value: i64,
    pub last_value: i64,
    pub events: Vec<ChangeEvent>,
}

/// Aggregate input for chart rendering and report assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    /// Human-readable metric identifier.
    pub metric_name: String,
    pub first_value: i64,
    pub last_value: i64,
    /// Published chart URL; empty when chart generation failed.
    #[serde(default)]
    pub chart_url: String,
    pub events: Vec<ChangeEvent>,
}

impl MetricReport {
    /// Combines metric metadata, a detected timeline and the rendered chart
    /// URL into the report aggregate.
    pub fn new(
        metric_name: impl Into<String>,
        timeline: ChangeTimeline,
        chart_url: impl Into<String>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            first_value: timeline.first_value,
            last_value: timeline.last_value,
            chart_url: chart_url.into(),
            events: timeline.events,
        }
    }
}

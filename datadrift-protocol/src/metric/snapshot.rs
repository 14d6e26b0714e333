use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One timestamped observation of a KPI, as persisted in the snapshot store.
///
/// Snapshots are immutable once loaded; ordering is imposed later by the
/// change detector using `commit_timestamp`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Size of the underlying data source at that commit.
    #[serde(rename = "Lines")]
    pub lines: i64,
    /// KPI value at this observation.
    #[serde(rename = "KPI")]
    pub kpi: f64,
    /// Commit time of the observation, seconds since the Unix epoch.
    #[serde(rename = "CommitTimestamp")]
    pub commit_timestamp: i64,
}

impl Snapshot {
    /// KPI rounded to the nearest integer, half away from zero.
    pub fn rounded_kpi(&self) -> i64 {
        self.kpi.round() as i64
    }

    /// Calendar date of the observation, day precision.
    /// Timestamps outside chrono's representable range clamp to the minimum date.
    pub fn date(&self) -> NaiveDate {
        DateTime::from_timestamp(self.commit_timestamp, 0)
            .map(|ts| ts.date_naive())
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Keyed series of snapshots for one metric, observation key → snapshot.
///
/// Unordered as stored; enumeration over the map is deterministic (key
/// order), which the detector relies on for its timestamp tie-break.
pub type SnapshotSeries = BTreeMap<String, Snapshot>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        let up = Snapshot {
            lines: 0,
            kpi: 8.5,
            commit_timestamp: 0,
        };
        assert_eq!(up.rounded_kpi(), 9);

        let down = Snapshot {
            lines: 0,
            kpi: -2.5,
            commit_timestamp: 0,
        };
        assert_eq!(down.rounded_kpi(), -3);
    }

    #[test]
    fn deserializes_store_field_names() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"Lines": 120, "KPI": 10.4, "CommitTimestamp": 1653523200}"#,
        )
        .expect("snapshot should parse");
        assert_eq!(snapshot.lines, 120);
        assert_eq!(snapshot.kpi, 10.4);
        assert_eq!(snapshot.date().to_string(), "2022-05-26");
    }
}

use tracing::debug;

use datadrift_protocol::metric::{ChangeEvent, ChangeTimeline, Snapshot, SnapshotSeries};

use crate::error::HistoryError;

/// Folds an unordered snapshot series into the chronological sequence of
/// rounded-KPI change events plus the series boundary values.
///
/// Snapshots are sorted ascending by commit timestamp; ties are broken by
/// observation key, so repeated runs over the same series always produce the
/// same output. The first observation always yields a baseline event; later
/// observations yield an event only when their rounded value differs from
/// the previous rounded value.
pub fn detect_changes(series: &SnapshotSeries) -> Result<ChangeTimeline, HistoryError> {
    if series.is_empty() {
        return Err(HistoryError::EmptySeries);
    }

    let mut ordered: Vec<(&str, &Snapshot)> = series
        .iter()
        .map(|(key, snapshot)| (key.as_str(), snapshot))
        .collect();
    ordered.sort_by(|(key_a, a), (key_b, b)| {
        a.commit_timestamp
            .cmp(&b.commit_timestamp)
            .then(key_a.cmp(key_b))
    });

    let mut events = Vec::new();
    let mut first_value = 0;
    let mut last_value = 0;
    // Explicit fold state: None strictly means "no observation seen yet", so
    // a KPI that rounds to 0 is still a valid baseline.
    let mut previous: Option<i64> = None;

    for (key, snapshot) in ordered {
        let rounded = snapshot.rounded_kpi();
        match previous {
            None => {
                first_value = rounded;
                events.push(ChangeEvent::baseline(snapshot.date(), rounded));
            }
            Some(prev) if rounded != prev => {
                debug!(
                    observation = key,
                    previous = prev,
                    current = rounded,
                    "KPI level change"
                );
                events.push(ChangeEvent::transition(snapshot.date(), prev, rounded));
            }
            Some(_) => {}
        }
        previous = Some(rounded);
        last_value = rounded;
    }

    Ok(ChangeTimeline {
        first_value,
        last_value,
        events,
    })
}

mod event;
mod report;
mod snapshot;

pub use event::{ChangeEvent, Direction};
pub use report::{ChangeTimeline, MetricReport};
pub use snapshot::{Snapshot, SnapshotSeries};

pub mod metric;
pub mod report;

pub mod prelude {
    pub use crate::metric::{
        ChangeEvent, ChangeTimeline, Direction, MetricReport, Snapshot, SnapshotSeries,
    };
    pub use crate::report::{Annotations, Block, RichText, TextColor};
}

use std::path::Path;

use tracing::{info, warn};

use datadrift_charts::{ChartRenderer, ChartRequest};
use datadrift_core::errors::Result;
use datadrift_core::CoreConfig;
use datadrift_engine::{detect_changes, SnapshotStore};
use datadrift_protocol::metric::{ChangeTimeline, MetricReport};
use datadrift_reports::{assemble_report, ReportPublisher};

/// Runs the full drift pipeline for one metric: load the snapshot series,
/// detect rounded-KPI changes, render the timeline chart, assemble the
/// narrative report and publish it to the document store.
///
/// Store and detector failures abort the run. A chart failure aborts only
/// when `continue_without_chart` is disabled; otherwise the report is
/// published without its timeline embed. Publish failures surface as-is.
///
/// Each run is strictly sequential and owns its loaded series; independent
/// metrics may be processed concurrently as long as every run gets its own
/// renderer and publisher clients.
pub async fn run_sync(
    config: &CoreConfig,
    renderer: &dyn ChartRenderer,
    publisher: &dyn ReportPublisher,
) -> Result<MetricReport> {
    let store = SnapshotStore::open(&config.history_path)?;
    let series = store.series(&config.metric_key)?;
    let timeline = detect_changes(series)?;
    info!(
        metric = %config.metric_key,
        events = timeline.events.len(),
        first = timeline.first_value,
        last = timeline.last_value,
        "change detection finished"
    );

    let metric_name = format!("KPI of {}", config.metric_key);
    let request =
        ChartRequest::from_events(&metric_name, &timeline.events, config.chart_suggested_min);
    let chart_url = match renderer.render(&request).await {
        Ok(url) => url,
        Err(err) if config.continue_without_chart => {
            warn!(
                metric = %config.metric_key,
                error = %err,
                "chart rendering failed, continuing without a chart"
            );
            String::new()
        }
        Err(err) => return Err(err.into()),
    };

    let report = MetricReport::new(metric_name, timeline, chart_url);
    let blocks = assemble_report(&report);
    publisher.publish(&report.metric_name, &blocks).await?;
    info!(metric = %report.metric_name, blocks = blocks.len(), "report published");

    Ok(report)
}

/// Loads the series and reports the detected timeline without any network
/// calls. Backs the `inspect` subcommand.
pub fn run_inspect(history_path: &Path, metric_key: &str) -> Result<ChangeTimeline> {
    let store = SnapshotStore::open(history_path)?;
    let timeline = detect_changes(store.series(metric_key)?)?;
    Ok(timeline)
}

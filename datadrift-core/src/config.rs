use std::env;
use std::path::PathBuf;

use crate::errors::ConfigError;

const DEFAULT_CHART_SERVICE_URL: &str = "https://quickchart.io/chart/create";

/// Default suggested minimum for the chart's value axis. A presentation
/// constant, not derived from the data.
const DEFAULT_CHART_SUGGESTED_MIN: f64 = 35_000.0;

/// Configuration for one pipeline run, loaded from the process environment.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Path of the persisted keyed snapshot store.
    pub history_path: PathBuf,
    /// Metric key to process within the store.
    pub metric_key: String,
    /// Create endpoint of the chart-rendering service.
    pub chart_service_url: String,
    /// Suggested minimum for the chart's value axis.
    pub chart_suggested_min: f64,
    /// Base URL of the document store API.
    pub docs_base_url: String,
    /// Bearer token for the document store.
    pub docs_token: String,
    /// Collection the report pages live in.
    pub docs_collection_id: String,
    /// Whether a chart-rendering failure still publishes a chartless report.
    pub continue_without_chart: bool,
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let history_path = require("DATADRIFT_HISTORY_PATH").map(PathBuf::from)?;
        let metric_key = require("DATADRIFT_METRIC_KEY")?;

        let chart_service_url = env::var("DATADRIFT_CHART_URL")
            .unwrap_or_else(|_| DEFAULT_CHART_SERVICE_URL.to_string());
        let chart_suggested_min = match env::var("DATADRIFT_CHART_SUGGESTED_MIN") {
            Ok(raw) => raw
                .parse::<f64>()
                .map_err(|err| ConfigError::InvalidEnvVar {
                    key: "DATADRIFT_CHART_SUGGESTED_MIN",
                    message: err.to_string(),
                })?,
            Err(_) => DEFAULT_CHART_SUGGESTED_MIN,
        };

        let docs_base_url = require("DATADRIFT_DOCS_URL")?;
        let docs_token = require("DATADRIFT_DOCS_TOKEN")?;
        let docs_collection_id = require("DATADRIFT_DOCS_COLLECTION_ID")?;

        let continue_without_chart = match env::var("DATADRIFT_CONTINUE_WITHOUT_CHART") {
            Ok(raw) => raw
                .parse::<bool>()
                .map_err(|err| ConfigError::InvalidEnvVar {
                    key: "DATADRIFT_CONTINUE_WITHOUT_CHART",
                    message: err.to_string(),
                })?,
            Err(_) => true,
        };

        Ok(Self {
            history_path,
            metric_key,
            chart_service_url,
            chart_suggested_min,
            docs_base_url,
            docs_token,
            docs_collection_id,
            continue_without_chart,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

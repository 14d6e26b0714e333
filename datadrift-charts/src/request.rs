use serde::{Deserialize, Serialize};

use datadrift_protocol::metric::{ChangeEvent, Direction};

/// Bar color used for upward transitions and the baseline bar.
pub const INCREASE_COLOR: &str = "rgb(100, 181, 246)";
/// Bar color used for downward transitions.
pub const DECREASE_COLOR: &str = "rgb(255, 107, 107)";

const CANVAS_WIDTH: u32 = 500;
const CANVAS_HEIGHT: u32 = 300;

/// One value on the chart's value axis: the baseline as a single bar, every
/// later transition as a floating `(previous, current)` range bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DataPoint {
    Point(i64),
    Range(i64, i64),
}

/// Full request body for the chart-rendering service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub background_color: String,
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
    pub chart: ChartSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub background_color: Vec<String>,
    pub label: String,
    pub data: Vec<DataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scales {
    #[serde(rename = "yAxes")]
    pub y_axes: Vec<ValueAxis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub suggested_min: f64,
}

impl ChartRequest {
    /// Encodes a change-event sequence as a bar chart request.
    ///
    /// Every event contributes one label (its date), one data point and one
    /// color. The baseline event renders as a single bar at its value; each
    /// subsequent event renders as a floating bar from the previous to the
    /// current value, colored by direction.
    pub fn from_events(
        title: impl Into<String>,
        events: &[ChangeEvent],
        suggested_min: f64,
    ) -> Self {
        let mut labels = Vec::with_capacity(events.len());
        let mut data = Vec::with_capacity(events.len());
        let mut colors = Vec::with_capacity(events.len());

        for event in events {
            labels.push(event.date.format("%Y-%m-%d").to_string());
            data.push(if event.is_baseline() {
                DataPoint::Point(event.current_value)
            } else {
                DataPoint::Range(event.previous_value, event.current_value)
            });
            colors.push(match event.direction {
                Direction::Up => INCREASE_COLOR.to_string(),
                Direction::Down => DECREASE_COLOR.to_string(),
            });
        }

        Self {
            background_color: "#fff".to_string(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            device_pixel_ratio: 1.0,
            chart: ChartSpec {
                kind: "bar".to_string(),
                data: ChartData {
                    labels,
                    datasets: vec![Dataset {
                        background_color: colors,
                        label: title.into(),
                        data,
                    }],
                },
                options: ChartOptions {
                    scales: Scales {
                        y_axes: vec![ValueAxis { suggested_min }],
                    },
                },
            },
        }
    }
}

//! Chart payload construction and the chart-rendering service client.

pub mod client;
pub mod request;

pub use client::{ChartClient, ChartClientError, ChartRenderer};
pub use request::{ChartRequest, DataPoint, DECREASE_COLOR, INCREASE_COLOR};

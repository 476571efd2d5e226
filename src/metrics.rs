use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SinkError;
use crate::http_probe::result::CheckResult;

pub const NAMESPACE: &str = "urlCheckResults";
pub const URL_NOT_RESPONDING_METRIC: &str = "UrlNotResponding";
pub const URL_RESPONSE_TIME_METRIC: &str = "UrlResponseTime";
pub const URL_DIMENSION: &str = "url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Count,
    Milliseconds,
}

impl MetricUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricUnit::Count => "Count",
            MetricUnit::Milliseconds => "Milliseconds",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDatum {
    pub name: &'static str,
    pub unit: MetricUnit,
    pub value: f64,
    pub dimensions: Vec<(String, String)>,
    pub timestamp: DateTime<Utc>,
}

impl MetricDatum {
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A set of data points stored with a single sink call.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBatch {
    pub namespace: &'static str,
    pub data: Vec<MetricDatum>,
}

impl MetricBatch {
    pub fn get(&self, name: &str) -> Option<&MetricDatum> {
        self.data.iter().find(|d| d.name == name)
    }
}

/// What the sink answered when a batch was accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkAck {
    pub status: u16,
    pub body: String,
}

/// A time-series backend accepting dimensioned, timestamped data points.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn put_metric_data(&self, batch: MetricBatch) -> Result<SinkAck, SinkError>;
}

/// Builds the two data points reported for a check, timestamped now.
pub fn create_check_metrics(result: &CheckResult) -> MetricBatch {
    let dimensions = vec![(URL_DIMENSION.to_string(), result.url.clone())];

    MetricBatch {
        namespace: NAMESPACE,
        data: vec![
            MetricDatum {
                name: URL_NOT_RESPONDING_METRIC,
                unit: MetricUnit::Count,
                value: result.not_responding(),
                dimensions: dimensions.clone(),
                timestamp: Utc::now(),
            },
            MetricDatum {
                name: URL_RESPONSE_TIME_METRIC,
                unit: MetricUnit::Milliseconds,
                value: result.response_time_ms as f64,
                dimensions,
                timestamp: Utc::now(),
            },
        ],
    }
}

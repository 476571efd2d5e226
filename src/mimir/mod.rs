use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::SinkError;
use crate::metrics::{MetricBatch, MetricsSink, SinkAck};

pub mod client;
pub mod prompb;

const NAMESPACE_LABEL: &str = "namespace";
const UNIT_LABEL: &str = "unit";
const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Converts a batch into one time series per data point. The metric name
/// becomes `__name__`, the namespace, unit and dimensions become labels.
pub fn batch_to_time_series(batch: &MetricBatch) -> Vec<prompb::TimeSeries> {
    batch
        .data
        .iter()
        .map(|datum| {
            let mut labels: Vec<(&str, &str)> = vec![
                (NAMESPACE_LABEL, batch.namespace),
                (UNIT_LABEL, datum.unit.as_str()),
            ];
            labels.extend(datum.dimensions.iter().map(|(n, v)| (n.as_str(), v.as_str())));

            client::create_time_series(
                datum.name,
                &labels,
                datum.value,
                Some(datum.timestamp.timestamp_millis()),
            )
        })
        .collect()
}

/// Metrics sink pushing to a Mimir (Prometheus remote write) endpoint.
pub struct MimirSink {
    client: Client,
    endpoint: String,
    tenant_id: Option<String>,
}

impl MimirSink {
    pub fn new(endpoint: impl Into<String>, tenant_id: Option<String>) -> Result<Self, SinkError> {
        Self::with_timeout(endpoint, tenant_id, DEFAULT_PUSH_TIMEOUT)
    }

    /// A push that has not completed within `timeout` fails with
    /// [`SinkError::Transport`].
    pub fn with_timeout(
        endpoint: impl Into<String>,
        tenant_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        Ok(MimirSink {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            tenant_id,
        })
    }
}

#[async_trait]
impl MetricsSink for MimirSink {
    async fn put_metric_data(&self, batch: MetricBatch) -> Result<SinkAck, SinkError> {
        let series = batch_to_time_series(&batch);
        client::send_to_mimir(
            &self.client,
            &self.endpoint,
            self.tenant_id.as_deref(),
            series,
        )
        .await
    }
}

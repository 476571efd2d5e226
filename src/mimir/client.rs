use chrono::Utc;
use prost::Message;
use reqwest::{
    Client,
    header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use snap::raw::Encoder;

use super::prompb::{Label, Sample, TimeSeries, WriteRequest};
use crate::error::SinkError;
use crate::metrics::SinkAck;

/// Sends Prometheus time series to a Mimir remote write endpoint.
///
/// # Arguments
///
/// * `client` - HTTP client used for the push.
/// * `mimir_endpoint` - The base URL of the Mimir instance (e.g., "http://localhost:9009").
/// * `tenant_id` - An optional tenant ID string for multi-tenant Mimir setups.
/// * `metrics` - The `TimeSeries` to send.
pub async fn send_to_mimir(
    client: &Client,
    mimir_endpoint: &str,
    tenant_id: Option<&str>,
    metrics: Vec<TimeSeries>,
) -> Result<SinkAck, SinkError> {
    let write_request = WriteRequest {
        timeseries: metrics,
    };

    let mut buf = Vec::with_capacity(write_request.encoded_len());
    write_request.encode(&mut buf)?;

    let mut encoder = Encoder::new();
    let compressed_data = encoder.compress_vec(&buf)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("snappy"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-protobuf"),
    );
    headers.insert(
        "X-Prometheus-Remote-Write-Version",
        HeaderValue::from_static("0.1.0"),
    );
    if let Some(id) = tenant_id {
        headers.insert("X-Scope-OrgID", HeaderValue::from_str(id)?);
    }

    let endpoint = mimir_endpoint.trim_end_matches('/');
    let response = client
        .post(format!("{endpoint}/api/v1/push"))
        .headers(headers)
        .body(compressed_data)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        log::debug!("Mimir rejected push: {} - {}", status, body);
        return Err(SinkError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    Ok(SinkAck {
        status: status.as_u16(),
        body,
    })
}

/// Creates a `TimeSeries` with the given metric name, labels, value and optional timestamp.
/// When no timestamp is given the current time is used.
pub fn create_time_series(
    metric_name: &str,
    labels: &[(&str, &str)],
    value: f64,
    timestamp_ms: Option<i64>,
) -> TimeSeries {
    let mut all_labels = Vec::with_capacity(labels.len() + 1);
    all_labels.push(Label {
        name: "__name__".to_string(),
        value: metric_name.to_string(),
    });

    for (name, val) in labels {
        all_labels.push(Label {
            name: name.to_string(),
            value: val.to_string(),
        });
    }

    let sample = Sample {
        value,
        timestamp: timestamp_ms.unwrap_or_else(|| Utc::now().timestamp_millis()),
    };

    TimeSeries {
        labels: all_labels,
        samples: vec![sample],
    }
}

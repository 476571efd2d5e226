use std::sync::Arc;

use reqwest::Client;

use crate::config::model::Checks;
use crate::error::{CheckerError, InvocationError, SinkError};
use crate::http_probe::prelude::*;
use crate::metrics::{MetricsSink, SinkAck, create_check_metrics};

const DEFAULT_NAME_WIDTH: usize = 10;
const MAX_NAME_WIDTH: usize = 32;

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// Outcome of one check: the probe classification and what the sink said.
#[derive(Debug)]
pub struct CheckOutcome {
    pub name: String,
    pub result: CheckResult,
    pub emission: Result<SinkAck, SinkError>,
}

/// Completion of an invocation, one entry per input key.
#[derive(Debug, Default)]
pub struct InvocationReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl InvocationReport {
    pub fn failed_emissions(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.emission.is_err())
    }

    /// Collapses the report into a single result: `Ok` with the sink
    /// acknowledgements, or an error marked `KO` if any emission failed.
    pub fn completion(&self) -> Result<Vec<&SinkAck>, InvocationError> {
        let failures: Vec<String> = self
            .failed_emissions()
            .filter_map(|o| {
                o.emission
                    .as_ref()
                    .err()
                    .map(|e| format!("{}: {}", o.result.url, e))
            })
            .collect();
        if let Some(first) = failures.first() {
            return Err(InvocationError::MetricsEmission {
                failed: failures.len(),
                total: self.outcomes.len(),
                first: first.clone(),
            });
        }
        Ok(self
            .outcomes
            .iter()
            .filter_map(|o| o.emission.as_ref().ok())
            .collect())
    }
}

fn log_result(name: &str, result: &CheckResult) {
    match &result.outcome {
        Outcome::TransportError(err) => log::error!(
            "ERROR   [{name}] failed to connect to url : {} Error: {}",
            result.url,
            err
        ),
        Outcome::BadStatus => log::error!(
            "ERROR   [{name}] {} responded with Status Code: {}, Response Time : {}ms",
            result.url,
            result.http_status.unwrap_or_default(),
            result.response_time_ms
        ),
        Outcome::Success => log::info!(
            "SUCCESS [{name}] {} responded with Status Code: 200, Response Time : {}ms",
            result.url,
            result.response_time_ms
        ),
    }
}

/// Probes URLs and reports two metrics per URL to a sink.
#[derive(Clone)]
pub struct UrlChecker {
    client: Client,
    sink: Arc<dyn MetricsSink>,
}

impl UrlChecker {
    pub fn new(settings: &ProbeSettings, sink: Arc<dyn MetricsSink>) -> Result<Self, CheckerError> {
        Ok(UrlChecker {
            client: build_client(settings)?,
            sink,
        })
    }

    /// Probe one URL, log the classification and emit its metrics.
    pub async fn check_url(&self, name: &str, url: &str) -> CheckOutcome {
        self.check(name, name, url).await
    }

    async fn check(&self, name: &str, label: &str, url: &str) -> CheckOutcome {
        let probe = probe_url(&self.client, url).await;
        let result = CheckResult::classify(url, probe);
        log_result(label, &result);

        let emission = self.sink.put_metric_data(create_check_metrics(&result)).await;
        if let Err(e) = &emission {
            log::error!("ERROR   [{label}] failed to send metrics for {url}: {e}");
        }

        CheckOutcome {
            name: name.to_string(),
            result,
            emission,
        }
    }

    /// Run one invocation: every check in its own task, all joined before
    /// the report is returned. An empty mapping touches neither network nor sink.
    pub async fn run(&self, checks: &Checks) -> InvocationReport {
        let name_width = checks
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(DEFAULT_NAME_WIDTH)
            .min(MAX_NAME_WIDTH);

        let mut handles = Vec::with_capacity(checks.len());
        for (name, url) in checks {
            let checker = self.clone();
            let label = to_fixed_width(name, name_width);
            let handle = {
                let (name, url) = (name.clone(), url.clone());
                tokio::spawn(async move { checker.check(&name, &label, &url).await })
            };
            handles.push((name, url, handle));
        }

        let mut report = InvocationReport::default();
        for (name, url, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("ERROR   [{name}] check task for {url} failed: {e}");
                    CheckOutcome {
                        result: CheckResult::classify(
                            &url,
                            ProbeOutcome::Failed {
                                error: e.to_string(),
                            },
                        ),
                        name: name.clone(),
                        emission: Err(SinkError::Task(e.to_string())),
                    }
                }
            };
            report.outcomes.push(outcome);
        }
        report
    }
}

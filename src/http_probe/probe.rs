use std::time::{Duration, Instant};

use reqwest::{Client, redirect::Policy};
use url::Url;

use super::report;
use super::result::ProbeOutcome;

const DEFAULT_TIMEOUT_MS: u64 = 3000;
const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Request settings shared by every check of an invocation.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Connect and whole-response timeout.
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Skip certificate verification for this client only.
    pub accept_invalid_certs: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            accept_invalid_certs: true,
        }
    }
}

/// Builds the HTTP client used for all checks of an invocation.
pub fn build_client(settings: &ProbeSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(settings.timeout)
        .connect_timeout(settings.timeout)
        .redirect(Policy::limited(settings.max_redirects))
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .user_agent(concat!("urlchecker/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn validate_url(url: &str) -> Result<Url, String> {
    let parsed = Url::parse(url).map_err(|e| format!("invalid url {url}: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(format!("unsupported scheme '{other}' in {url}")),
    }
}

/// Issues a single GET against `url` and reads the response to its end.
/// Never fails: transport problems are returned as [`ProbeOutcome::Failed`].
pub async fn probe_url(client: &Client, url: &str) -> ProbeOutcome {
    let parsed = match validate_url(url) {
        Ok(parsed) => parsed,
        Err(error) => return ProbeOutcome::Failed { error },
    };

    let start = Instant::now();
    let resp = match client.get(parsed).send().await {
        Ok(resp) => resp,
        Err(e) => return ProbeOutcome::Failed { error: report(&e) },
    };
    let status = resp.status().as_u16();

    // The response time covers the whole body; a body that cannot be read
    // to the end counts as no response.
    match resp.bytes().await {
        Ok(_) => ProbeOutcome::Responded {
            status,
            elapsed: start.elapsed(),
        },
        Err(e) => ProbeOutcome::Failed { error: report(&e) },
    }
}

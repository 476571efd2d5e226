use std::time::Duration;

/// What the HTTP client observed for a single GET, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// A response was received (possibly after following redirects).
    Responded { status: u16, elapsed: Duration },
    /// No response object was obtained: DNS failure, refused connection,
    /// timeout, invalid URL or too many redirects.
    Failed { error: String },
}

/// Classification of a check.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success,
    TransportError(String),
    BadStatus,
}

/// Result of probing one URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// The URL exactly as it was given in the input mapping.
    pub url: String,
    pub outcome: Outcome,
    pub http_status: Option<u16>,
    /// Elapsed time in milliseconds, 0 when no response was obtained.
    pub response_time_ms: u64,
}

impl CheckResult {
    pub fn classify(url: &str, probe: ProbeOutcome) -> Self {
        match probe {
            ProbeOutcome::Failed { error } => CheckResult {
                url: url.to_string(),
                outcome: Outcome::TransportError(error),
                http_status: None,
                response_time_ms: 0,
            },
            ProbeOutcome::Responded { status, elapsed } => CheckResult {
                url: url.to_string(),
                outcome: if status == 200 {
                    Outcome::Success
                } else {
                    Outcome::BadStatus
                },
                http_status: Some(status),
                response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Value of the `UrlNotResponding` indicator: 0 for HTTP 200, 1 otherwise.
    pub fn not_responding(&self) -> f64 {
        match self.is_success() {
            true => 0.0,
            false => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_is_success() {
        let result = CheckResult::classify(
            "http://example.com",
            ProbeOutcome::Responded {
                status: 200,
                elapsed: Duration::from_millis(50),
            },
        );
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.not_responding(), 0.0);
        assert_eq!(result.response_time_ms, 50);
        assert_eq!(result.http_status, Some(200));
        assert_eq!(result.url, "http://example.com");
    }

    #[test]
    fn test_not_found_keeps_measured_time() {
        let result = CheckResult::classify(
            "http://example.com/404",
            ProbeOutcome::Responded {
                status: 404,
                elapsed: Duration::from_millis(30),
            },
        );
        assert_eq!(result.outcome, Outcome::BadStatus);
        assert_eq!(result.not_responding(), 1.0);
        assert_eq!(result.response_time_ms, 30);
    }

    #[test]
    fn test_other_2xx_is_not_success() {
        let result = CheckResult::classify(
            "http://example.com/created",
            ProbeOutcome::Responded {
                status: 204,
                elapsed: Duration::from_millis(5),
            },
        );
        assert_eq!(result.not_responding(), 1.0);
    }

    #[test]
    fn test_transport_failure_has_zero_time() {
        let result = CheckResult::classify(
            "http://unreachable.invalid",
            ProbeOutcome::Failed {
                error: "connection refused".to_string(),
            },
        );
        assert_eq!(
            result.outcome,
            Outcome::TransportError("connection refused".to_string())
        );
        assert_eq!(result.not_responding(), 1.0);
        assert_eq!(result.response_time_ms, 0);
        assert_eq!(result.http_status, None);
    }
}

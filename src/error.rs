use thiserror::Error;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid check event: {0}")]
    Event(#[from] serde_json::Error),
}

/// Errors returned by a metrics sink when a batch could not be stored.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode write request: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("failed to compress write request: {0}")]
    Compress(#[from] snap::Error),

    #[error("invalid tenant header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to push metrics: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("metrics push rejected: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("check task ended before emitting metrics: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Aggregated completion error of an invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("KO: metrics emission failed for {failed} of {total} url(s): {first}")]
    MetricsEmission {
        failed: usize,
        total: usize,
        first: String,
    },
}

//! Scheduled HTTP URL checks reporting `UrlNotResponding` and
//! `UrlResponseTime` per URL to a metrics sink.

pub mod checker;
pub mod config;
pub mod error;
pub mod http_probe;
pub mod metrics;
pub mod mimir;
pub mod telemetry;

use std::{process::ExitCode, sync::Arc, time::Duration};

use tokio::time::sleep;

use urlchecker::checker::UrlChecker;
use urlchecker::config::app_config::load_config;
use urlchecker::http_probe::prelude::ProbeSettings;
use urlchecker::mimir::MimirSink;
use urlchecker::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    telemetry::init_logging("info");

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Using Mimir endpoint: {}", app_config.mimir_endpoint);

    let sink = match MimirSink::new(
        app_config.mimir_endpoint.clone(),
        app_config.config.organisation_id.clone(),
    ) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let checker = match UrlChecker::new(&ProbeSettings::default(), sink) {
        Ok(checker) => checker,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let checks = app_config.checks;
    if checks.is_empty() {
        log::warn!("No URLs to check.");
    }

    let Some(interval) = app_config.config.polling_interval_seconds else {
        let report = checker.run(&checks).await;
        return match report.completion() {
            Ok(acks) => {
                log::info!("Metrics sent for {} url(s)", acks.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    };

    log::info!(
        "Checking {} url(s) every {} second(s)",
        checks.len(),
        interval
    );
    loop {
        let report = checker.run(&checks).await;
        if let Err(e) = report.completion() {
            log::error!("{e}");
        }
        sleep(Duration::from_secs(interval)).await;
    }
}

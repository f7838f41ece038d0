//! ThreatLens Demo - Exercise the Telemetry Pipeline
//!
//! Wires a session against the configured classifier backend, starts the
//! simulated trend stream, attempts one prediction per classifier, and
//! prints the resulting telemetry. Prediction failures are logged and
//! never stop the trend stream.

use std::time::Duration;

use threatlens::{
    constants, ClientConfig, MalwareSample, PredictionClient, Session, SimulatedTicks, SpamSample,
    TrendStream,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting ThreatLens v{}...", constants::APP_VERSION);

    let config = ClientConfig::default();
    log::info!("Classifier backend: {}", config.base_url);

    let client = PredictionClient::new(config);
    let session = Session::new(client, constants::get_history_cap());

    let interval = Duration::from_millis(constants::get_trend_interval_ms());
    let mut trend = TrendStream::new();
    trend.start(interval, Box::new(SimulatedTicks::new()));

    match session.client().health().await {
        Ok(health) => log::info!("Backend online: {} ({})", health.service, health.status),
        Err(e) => log::warn!("Backend health check failed: {}", e),
    }

    let email = SpamSample::new(
        "CONGRATULATIONS! You have been selected to WIN a FREE $1000 gift card. \
         Click now to claim your prize!!!",
    );
    match session.classify_spam(&email).await {
        Ok(result) => log::info!(
            "spam sample -> '{}' with {:.1}% confidence",
            result.label,
            result.confidence * 100.0
        ),
        Err(e) => log::warn!("spam prediction failed: {}", e),
    }

    let counters = MalwareSample {
        millisecond: 350,
        state: 1,
        prio: 120,
        static_prio: 120,
        normal_prio: 120,
        total_vm: 48_230,
        map_count: 85,
        utime: 1_200,
        stime: 430,
        ..Default::default()
    };
    match session.classify_malware(&counters).await {
        Ok(result) => log::info!(
            "malware sample -> '{}' with {:.1}% confidence",
            result.label,
            result.confidence * 100.0
        ),
        Err(e) => log::warn!("malware prediction failed: {}", e),
    }

    // Let the simulation accumulate a few points before reporting
    tokio::time::sleep(interval * 3).await;

    for bin in session.histogram(None) {
        log::info!("confidence {:>7}: {}", bin.range_label, bin.count);
    }
    for point in trend.snapshot() {
        log::info!(
            "{} spam={} malware={}",
            point.timestamp.format("%H:%M:%S"),
            point.spam_count,
            point.malware_count
        );
    }

    trend.stop();
    log::info!("ThreatLens demo finished");
}

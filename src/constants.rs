//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default classifier backend, only edit this file.

/// Default classifier API base URL
///
/// This is the fallback URL when no environment variable is set.
/// The FastAPI model server listens on port 8000 by default.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default outbound request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default trend stream tick interval (milliseconds)
pub const DEFAULT_TREND_INTERVAL_MS: u64 = 2_000;

/// Trend window capacity (number of retained tick points)
pub const TREND_CAPACITY: usize = 20;

/// Number of confidence histogram bins over [0.0, 1.0]
pub const HISTOGRAM_BINS: usize = 10;

/// Minimum accepted email length (characters)
pub const MIN_EMAIL_LENGTH: usize = 10;

/// Simulated detections per tick when no live counts are wired (spam)
pub const SIM_SPAM_RANGE: (u32, u32) = (5, 24);

/// Simulated detections per tick when no live counts are wired (malware)
pub const SIM_MALWARE_RANGE: (u32, u32) = (3, 17);

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier API base URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("CLASSIFIER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get request timeout (seconds) from environment or use default
pub fn get_request_timeout_secs() -> u64 {
    std::env::var("CLASSIFIER_REQUEST_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Get per-kind history cap from environment; unset means unbounded
pub fn get_history_cap() -> Option<usize> {
    std::env::var("HISTORY_CAP").ok().and_then(|s| s.parse().ok())
}

/// Get trend tick interval (milliseconds) from environment or use default
pub fn get_trend_interval_ms() -> u64 {
    std::env::var("TREND_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TREND_INTERVAL_MS)
}

//! ThreatLens - Prediction Telemetry Pipeline
//!
//! Core of the ML cybersecurity dashboard: submits samples to the two
//! remote classifiers (spam, malware), records results in a bounded
//! in-memory history, and derives the telemetry the dashboard renders -
//! a confidence-distribution histogram and a sliding window of detection
//! counts over time.
//!
//! The classifiers themselves are external; this crate owns the
//! request/response contract and everything downstream of a result.

pub mod client;
pub mod constants;
pub mod contract;
pub mod error;
pub mod histogram;
pub mod history;
pub mod session;
pub mod trend;

pub use client::{ClientConfig, ModelsInfo, PredictionClient};
pub use contract::{Kind, MalwareSample, PredictionResult, SpamSample};
pub use error::{PredictError, ValidationError};
pub use histogram::{confidence_histogram, HistogramBin};
pub use history::HistoryStore;
pub use session::Session;
pub use trend::{LiveCounters, LiveTicks, SimulatedTicks, TickSource, TrendPoint, TrendStream};

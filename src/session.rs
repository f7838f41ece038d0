//! Dashboard Session
//!
//! Explicitly owned wiring of client, history, and live tick counters.
//! One session per dashboard lifetime: created at session start, dropped
//! at session end. This replaces ambient module-level prediction state
//! with an instance the caller passes around.

use std::sync::Arc;

use crate::client::PredictionClient;
use crate::contract::{Kind, MalwareSample, PredictionResult, SpamSample};
use crate::error::PredictError;
use crate::histogram::{confidence_histogram, HistogramBin};
use crate::history::HistoryStore;
use crate::trend::LiveCounters;

/// Owns the prediction history and live detection counters for one
/// dashboard session
pub struct Session {
    client: PredictionClient,
    history: HistoryStore,
    live: Arc<LiveCounters>,
}

impl Session {
    pub fn new(client: PredictionClient, history_cap: Option<usize>) -> Self {
        Self {
            client,
            history: HistoryStore::new(history_cap),
            live: LiveCounters::new(),
        }
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Counters feeding a live [`TickSource`](crate::trend::TickSource)
    pub fn live_counters(&self) -> Arc<LiveCounters> {
        Arc::clone(&self.live)
    }

    /// Classify an email and record the result.
    ///
    /// On any failure the history and counters are left untouched.
    pub async fn classify_spam(
        &self,
        sample: &SpamSample,
    ) -> Result<PredictionResult, PredictError> {
        let result = self.client.predict_spam(sample).await?;
        Ok(self.record(Kind::Spam, result))
    }

    /// Classify process counters and record the result
    pub async fn classify_malware(
        &self,
        sample: &MalwareSample,
    ) -> Result<PredictionResult, PredictError> {
        let result = self.client.predict_malware(sample).await?;
        Ok(self.record(Kind::Malware, result))
    }

    /// Confidence histogram over recorded results, optionally one kind only
    pub fn histogram(&self, filter: Option<Kind>) -> Vec<HistogramBin> {
        confidence_histogram(&self.history.snapshot(filter))
    }

    fn record(&self, kind: Kind, result: PredictionResult) -> PredictionResult {
        let stored = self.history.append(kind, result);
        if stored.is_threat() {
            self.live.record(kind);
        }
        log::info!(
            "{} classified as '{}' ({:.1}%), {} result(s) in history",
            kind,
            stored.label,
            stored.confidence * 100.0,
            self.history.total()
        );
        stored
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Prediction Client
//!
//! HTTP client for the classifier backend. One outbound scoring request
//! per validated sample; responses are parsed into [`PredictionResult`]
//! with the contract invariants enforced at the boundary. No retries and
//! no history side effects: the caller decides what to do with failures.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::contract::{
    Kind, MalwareSample, PredictionResult, SpamSample, PROBABILITY_TOLERANCE,
};
use crate::error::PredictError;

/// Classifier backend configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: constants::get_api_url(),
            timeout: Duration::from_secs(constants::get_request_timeout_secs()),
        }
    }
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Raw 200 body from either predict endpoint, before contract checks
#[derive(Debug, Deserialize)]
struct RawPrediction {
    prediction: String,
    confidence: f64,
    probabilities: std::collections::BTreeMap<String, f64>,
    #[serde(default)]
    details: serde_json::Value,
}

/// Metadata for the malware model from `GET /models/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalwareModelInfo {
    pub model_type: String,
    pub features: u64,
    #[serde(default)]
    pub feature_names: Vec<String>,
}

/// Metadata for the spam model from `GET /models/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamModelInfo {
    pub model_type: String,
    pub tfidf_features: u64,
    pub manual_features: u64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Per-classifier metadata, surfaced read-only in the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsInfo {
    pub malware: MalwareModelInfo,
    pub spam: SpamModelInfo,
}

/// Backend health payload from `GET /`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Async client for the classifier backend
pub struct PredictionClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl PredictionClient {
    /// Create a new client with a bounded request timeout
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Score one sample against the classifier picked by `kind`
    pub async fn predict(
        &self,
        kind: Kind,
        sample: &serde_json::Value,
    ) -> Result<PredictionResult, PredictError> {
        match kind {
            Kind::Spam => {
                let sample: SpamSample = serde_json::from_value(sample.clone())
                    .map_err(|e| invalid_sample(e.to_string()))?;
                self.predict_spam(&sample).await
            }
            Kind::Malware => {
                let sample = MalwareSample::from_value(sample)?;
                self.predict_malware(&sample).await
            }
        }
    }

    /// Score an email against the spam classifier
    pub async fn predict_spam(
        &self,
        sample: &SpamSample,
    ) -> Result<PredictionResult, PredictError> {
        sample.validate()?;
        let body = serde_json::to_value(sample).map_err(|e| invalid_sample(e.to_string()))?;
        self.post_predict(Kind::Spam, &body).await
    }

    /// Score process counters against the malware classifier
    pub async fn predict_malware(
        &self,
        sample: &MalwareSample,
    ) -> Result<PredictionResult, PredictError> {
        sample.validate()?;
        let body = serde_json::to_value(sample).map_err(|e| invalid_sample(e.to_string()))?;
        self.post_predict(Kind::Malware, &body).await
    }

    /// Fetch per-classifier metadata for the dashboard
    pub async fn models_info(&self) -> Result<ModelsInfo, PredictError> {
        let url = format!("{}/models/info", self.config.base_url);
        let body = self.get_success(&url).await?;
        serde_json::from_str(&body).map_err(|e| PredictError::ContractViolation(e.to_string()))
    }

    /// Check backend liveness
    pub async fn health(&self) -> Result<HealthStatus, PredictError> {
        let url = format!("{}/", self.config.base_url);
        let body = self.get_success(&url).await?;
        serde_json::from_str(&body).map_err(|e| PredictError::ContractViolation(e.to_string()))
    }

    async fn post_predict(
        &self,
        kind: Kind,
        body: &serde_json::Value,
    ) -> Result<PredictionResult, PredictError> {
        let url = format!("{}{}", self.config.base_url, kind.endpoint());

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        if !status.is_success() {
            log::warn!("{} prediction failed ({}): {}", kind, status, text);
            return Err(PredictError::Classifier {
                status: status.as_u16(),
                message: extract_detail(&text),
            });
        }

        let result = parse_prediction(kind, &text)?;
        log::debug!(
            "{} prediction: {} ({:.1}%)",
            kind,
            result.label,
            result.confidence * 100.0
        );
        Ok(result)
    }

    async fn get_success(&self, url: &str) -> Result<String, PredictError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PredictError::Classifier {
                status: status.as_u16(),
                message: extract_detail(&text),
            });
        }
        Ok(text)
    }
}

// ============================================================================
// RESPONSE PARSING
// ============================================================================

/// Parse a 200 predict body and enforce the response contract for `kind`.
///
/// Rejects: missing class keys, extra classes, confidence outside [0,1],
/// probabilities not summing to 1, and `probabilities[label]` disagreeing
/// with `confidence`.
pub fn parse_prediction(kind: Kind, body: &str) -> Result<PredictionResult, PredictError> {
    let raw: RawPrediction = serde_json::from_str(body)
        .map_err(|e| PredictError::ContractViolation(format!("malformed body: {}", e)))?;

    let classes = kind.classes();
    if !classes.contains(&raw.prediction.as_str()) {
        return Err(PredictError::ContractViolation(format!(
            "label '{}' is not a {} class",
            raw.prediction, kind
        )));
    }

    if raw.probabilities.len() != classes.len() {
        return Err(PredictError::ContractViolation(format!(
            "expected {} probability classes, got {}",
            classes.len(),
            raw.probabilities.len()
        )));
    }
    for class in classes {
        if !raw.probabilities.contains_key(class) {
            return Err(PredictError::ContractViolation(format!(
                "missing probability for class '{}'",
                class
            )));
        }
    }

    if !(0.0..=1.0).contains(&raw.confidence) {
        return Err(PredictError::ContractViolation(format!(
            "confidence {} outside [0, 1]",
            raw.confidence
        )));
    }

    let sum: f64 = raw.probabilities.values().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(PredictError::ContractViolation(format!(
            "probabilities sum to {}, expected 1.0",
            sum
        )));
    }

    let label_mass = raw.probabilities[&raw.prediction];
    if (label_mass - raw.confidence).abs() > PROBABILITY_TOLERANCE {
        return Err(PredictError::ContractViolation(format!(
            "probabilities[{}] = {} disagrees with confidence {}",
            raw.prediction, label_mass, raw.confidence
        )));
    }

    Ok(PredictionResult {
        kind,
        label: raw.prediction,
        confidence: raw.confidence,
        probabilities: raw.probabilities,
        details: raw.details,
        observed_at: Utc::now(),
    })
}

/// Wrap a local sample (de)serialization failure as a validation error
fn invalid_sample(message: String) -> PredictError {
    PredictError::Validation(crate::error::ValidationError::new(vec![
        crate::error::FieldError::new("sample", message),
    ]))
}

/// Pull the FastAPI-style `detail` message out of an error body, when present
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

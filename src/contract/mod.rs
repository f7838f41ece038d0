//! Classifier Contract - Kinds, Results, Field Layouts
//!
//! Authoritative request/response shapes shared with the classifier
//! backend. The backend owns the models; this module owns the contract.

pub mod layout;
pub mod sample;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use sample::{MalwareSample, SpamSample};

/// Tolerance for floating comparisons on probabilities
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

// ============================================================================
// CLASSIFIER KIND
// ============================================================================

/// The classifier domain: one of the two deployed models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Spam,
    Malware,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Spam => "spam",
            Kind::Malware => "malware",
        }
    }

    /// The two legal class names for this kind, negative class first
    pub fn classes(&self) -> [&'static str; 2] {
        match self {
            Kind::Spam => ["ham", "spam"],
            Kind::Malware => ["benign", "malware"],
        }
    }

    /// The class name that indicates a detection
    pub fn threat_label(&self) -> &'static str {
        match self {
            Kind::Spam => "spam",
            Kind::Malware => "malware",
        }
    }

    /// Scoring endpoint path on the classifier backend
    pub fn endpoint(&self) -> &'static str {
        match self {
            Kind::Spam => "/predict/spam",
            Kind::Malware => "/predict/malware",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// One completed classification, immutable once recorded.
///
/// Invariants (enforced when parsing the backend response):
/// - `confidence` is within [0.0, 1.0]
/// - `probabilities` holds exactly the two classes of `kind`
/// - the two probabilities sum to 1.0 within tolerance
/// - `probabilities[label] == confidence` within tolerance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub kind: Kind,
    /// Predicted class name (`spam`/`ham` or `malware`/`benign`)
    pub label: String,
    /// Probability mass assigned to `label`
    pub confidence: f64,
    /// Per-class probability mass
    pub probabilities: BTreeMap<String, f64>,
    /// Free-form backend metadata, passed through unchanged
    pub details: serde_json::Value,
    /// When the result was recorded; reassigned by the history store on append
    pub observed_at: DateTime<Utc>,
}

impl PredictionResult {
    /// Whether the predicted label indicates a detection for its kind
    pub fn is_threat(&self) -> bool {
        self.label == self.kind.threat_label()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classes() {
        assert_eq!(Kind::Spam.classes(), ["ham", "spam"]);
        assert_eq!(Kind::Malware.classes(), ["benign", "malware"]);
    }

    #[test]
    fn test_threat_label_is_a_legal_class() {
        for kind in [Kind::Spam, Kind::Malware] {
            assert!(kind.classes().contains(&kind.threat_label()));
        }
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Spam).unwrap(), "\"spam\"");
        let kind: Kind = serde_json::from_str("\"malware\"").unwrap();
        assert_eq!(kind, Kind::Malware);
    }

    #[test]
    fn test_is_threat() {
        let mut probabilities = BTreeMap::new();
        probabilities.insert("ham".to_string(), 0.2);
        probabilities.insert("spam".to_string(), 0.8);

        let result = PredictionResult {
            kind: Kind::Spam,
            label: "spam".to_string(),
            confidence: 0.8,
            probabilities,
            details: serde_json::Value::Null,
            observed_at: Utc::now(),
        };
        assert!(result.is_threat());
    }
}

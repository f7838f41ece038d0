//! Sample Types & Validation
//!
//! Typed request bodies for the two classifiers, validated locally before
//! any network call. Validation reports every bad field, not just the
//! first, so the dashboard can highlight all of them in one pass.

use serde::{Deserialize, Serialize};

use super::layout::{is_known_field, MALWARE_FIELDS};
use crate::constants::MIN_EMAIL_LENGTH;
use crate::error::{FieldError, ValidationError};

// ============================================================================
// SPAM SAMPLE
// ============================================================================

/// Input for the spam classifier: raw email text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamSample {
    pub email_text: String,
}

impl SpamSample {
    pub fn new(email_text: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
        }
    }

    /// Check the email text before a request is issued
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.email_text.trim().is_empty() {
            errors.push(FieldError::new("email_text", "must not be empty"));
        } else if self.email_text.chars().count() < MIN_EMAIL_LENGTH {
            errors.push(FieldError::new(
                "email_text",
                format!("must be at least {} characters", MIN_EMAIL_LENGTH),
            ));
        }

        ValidationError::new(errors).into_result()
    }
}

// ============================================================================
// MALWARE SAMPLE
// ============================================================================

/// Input for the malware classifier: per-process kernel counters.
///
/// Field names and order mirror the backend schema exactly; see
/// [`MALWARE_FIELDS`](super::layout::MALWARE_FIELDS).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MalwareSample {
    pub millisecond: i64,
    pub state: i64,
    pub usage_counter: i64,
    pub prio: i64,
    pub static_prio: i64,
    pub normal_prio: i64,
    pub policy: i64,
    pub vm_pgoff: i64,
    pub vm_truncate_count: i64,
    pub task_size: i64,
    pub cached_hole_size: i64,
    pub free_area_cache: i64,
    pub mm_users: i64,
    pub map_count: i64,
    pub hiwater_rss: i64,
    pub total_vm: i64,
    pub shared_vm: i64,
    pub exec_vm: i64,
    pub reserved_vm: i64,
    pub nr_ptes: i64,
    pub end_data: i64,
    pub last_interval: i64,
    pub nvcsw: i64,
    pub nivcsw: i64,
    pub min_flt: i64,
    pub maj_flt: i64,
    pub fs_excl_counter: i64,
    pub lock: i64,
    pub utime: i64,
    pub stime: i64,
    pub gtime: i64,
    pub cgtime: i64,
    pub signal_nvcsw: i64,
}

impl MalwareSample {
    /// Check counter constraints before a request is issued
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        // Backend schema constraint: ge=0
        if self.millisecond < 0 {
            errors.push(FieldError::new("millisecond", "must be >= 0"));
        }

        ValidationError::new(errors).into_result()
    }

    /// Build a sample from untyped form input, collecting every missing,
    /// non-numeric, and unknown field into one validation report.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        let map = match value.as_object() {
            Some(map) => map,
            None => {
                return Err(ValidationError::new(vec![FieldError::new(
                    "sample",
                    "expected a JSON object",
                )]))
            }
        };

        for name in MALWARE_FIELDS {
            match map.get(*name) {
                None => errors.push(FieldError::new(name, "missing")),
                Some(v) if v.as_i64().is_none() => {
                    errors.push(FieldError::new(name, "must be an integer"))
                }
                Some(_) => {}
            }
        }

        for key in map.keys() {
            if !is_known_field(key) {
                errors.push(FieldError::new(key, "unknown field"));
            }
        }

        ValidationError::new(errors).into_result()?;

        let sample: MalwareSample = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::new(vec![FieldError::new("sample", e.to_string())]))?;
        sample.validate()?;
        Ok(sample)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_email_rejected() {
        // 9 characters: one short of the minimum
        let sample = SpamSample::new("123456789");
        let err = sample.validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "email_text");
    }

    #[test]
    fn test_empty_email_rejected() {
        assert!(SpamSample::new("   ").validate().is_err());
    }

    #[test]
    fn test_valid_email_accepted() {
        assert!(SpamSample::new("Dear customer, you won a prize!")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_malware_sample_serializes_every_field() {
        let value = serde_json::to_value(MalwareSample::default()).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), MALWARE_FIELDS.len());
        for name in MALWARE_FIELDS {
            assert!(map.contains_key(*name), "missing field: {}", name);
        }
    }

    #[test]
    fn test_from_value_reports_all_missing_fields() {
        let err = MalwareSample::from_value(&serde_json::json!({})).unwrap_err();
        assert_eq!(err.errors.len(), MALWARE_FIELDS.len());
    }

    #[test]
    fn test_from_value_rejects_unknown_and_non_numeric() {
        let mut value = serde_json::to_value(MalwareSample::default()).unwrap();
        let map = value.as_object_mut().unwrap();
        map.insert("state".to_string(), serde_json::json!("busy"));
        map.insert("bogus".to_string(), serde_json::json!(1));

        let err = MalwareSample::from_value(&value).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert!(err.errors.iter().any(|e| e.field == "state"));
        assert!(err.errors.iter().any(|e| e.field == "bogus"));
    }

    #[test]
    fn test_from_value_roundtrip() {
        let sample = MalwareSample {
            millisecond: 120,
            total_vm: 4096,
            ..Default::default()
        };
        let value = serde_json::to_value(&sample).unwrap();
        let parsed = MalwareSample::from_value(&value).unwrap();
        assert_eq!(parsed.millisecond, 120);
        assert_eq!(parsed.total_vm, 4096);
    }

    #[test]
    fn test_negative_millisecond_rejected() {
        let sample = MalwareSample {
            millisecond: -1,
            ..Default::default()
        };
        let err = sample.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "millisecond");
    }
}

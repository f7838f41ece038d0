//! Malware Feature Layout - Centralized Field Definition
//!
//! **This file controls the malware request schema**
//!
//! The field list must stay byte-for-byte in sync with the classifier
//! backend's input schema: same names, same order. Reordering or renaming
//! a field silently breaks scoring.

// ============================================================================
// FIELD LAYOUT (Authoritative source)
// ============================================================================

/// Malware sample field names in the exact order the backend declares them.
/// This is the SINGLE SOURCE OF TRUTH for the malware request shape.
pub const MALWARE_FIELDS: &[&str] = &[
    // === Timing ===
    "millisecond",
    // === Scheduling ===
    "state",
    "usage_counter",
    "prio",
    "static_prio",
    "normal_prio",
    "policy",
    // === Memory mapping ===
    "vm_pgoff",
    "vm_truncate_count",
    "task_size",
    "cached_hole_size",
    "free_area_cache",
    "mm_users",
    "map_count",
    "hiwater_rss",
    "total_vm",
    "shared_vm",
    "exec_vm",
    "reserved_vm",
    "nr_ptes",
    "end_data",
    "last_interval",
    // === Context switches ===
    "nvcsw",
    "nivcsw",
    // === Page faults ===
    "min_flt",
    "maj_flt",
    // === Locking ===
    "fs_excl_counter",
    "lock",
    // === CPU time ===
    "utime",
    "stime",
    "gtime",
    "cgtime",
    "signal_nvcsw",
];

/// Fields surfaced first in the dashboard's input form.
///
/// Display hint only: this ordering prioritizes form layout and is NOT a
/// feature-importance ranking from the model.
pub const IMPORTANT_FIELDS: &[&str] = &[
    "millisecond",
    "state",
    "prio",
    "total_vm",
    "utime",
    "stime",
];

// ============================================================================
// FIELD LOOKUP
// ============================================================================

/// Get field index by name (O(n) but fields are few)
pub fn field_index(name: &str) -> Option<usize> {
    MALWARE_FIELDS.iter().position(|&n| n == name)
}

/// Get field name by index
pub fn field_name(index: usize) -> Option<&'static str> {
    MALWARE_FIELDS.get(index).copied()
}

/// Check whether a field name belongs to the layout
pub fn is_known_field(name: &str) -> bool {
    field_index(name).is_some()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_no_duplicates() {
        for (i, name) in MALWARE_FIELDS.iter().enumerate() {
            assert_eq!(field_index(name), Some(i), "duplicate field: {}", name);
        }
    }

    #[test]
    fn test_field_index() {
        assert_eq!(field_index("millisecond"), Some(0));
        assert_eq!(field_index("state"), Some(1));
        assert_eq!(field_index("signal_nvcsw"), Some(MALWARE_FIELDS.len() - 1));
        assert_eq!(field_index("nonexistent"), None);
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name(0), Some("millisecond"));
        assert_eq!(field_name(MALWARE_FIELDS.len()), None);
    }

    #[test]
    fn test_important_fields_are_in_layout() {
        assert_eq!(IMPORTANT_FIELDS.len(), 6);
        for name in IMPORTANT_FIELDS {
            assert!(is_known_field(name), "unknown important field: {}", name);
        }
    }
}

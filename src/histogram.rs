//! Confidence Histogram
//!
//! Pure aggregation over a history snapshot: ten fixed-width bins over
//! [0.0, 1.0], the last bin closed at 1.0. Same snapshot in, same bins
//! out; no hidden state.

use serde::Serialize;

use crate::constants::HISTOGRAM_BINS;
use crate::contract::PredictionResult;

/// Bin edges; bin `i` covers `[EDGES[i], EDGES[i+1])`, the last bin
/// additionally includes 1.0
const EDGES: [f64; HISTOGRAM_BINS + 1] = [
    0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0,
];

/// One fixed-width confidence bin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub range_label: String,
    pub count: u64,
}

/// Bucket the confidence values of a snapshot into ten fixed-width bins.
///
/// The sum of all bin counts always equals the snapshot length; an empty
/// snapshot yields all-zero bins.
pub fn confidence_histogram(snapshot: &[PredictionResult]) -> Vec<HistogramBin> {
    let mut counts = [0u64; HISTOGRAM_BINS];

    for result in snapshot {
        let index = EDGES
            .windows(2)
            .position(|w| result.confidence >= w[0] && result.confidence < w[1])
            // confidence == 1.0 belongs to the last bin, not an eleventh
            .unwrap_or(HISTOGRAM_BINS - 1);
        counts[index] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            range_label: bin_label(i),
            count,
        })
        .collect()
}

/// Label for bin `i`, e.g. `"30-40%"`
pub fn bin_label(index: usize) -> String {
    format!(
        "{:.0}-{:.0}%",
        EDGES[index] * 100.0,
        EDGES[index + 1] * 100.0
    )
}

// ============================================================================
// TESTS
// ============================================================================

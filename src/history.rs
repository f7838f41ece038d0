//! History Store
//!
//! Process-lifetime record of completed predictions, partitioned by
//! classifier kind. Append-only from the caller's point of view, with an
//! optional per-kind capacity cap that evicts the oldest entry. Readers
//! always get owned snapshots; nothing handed out can corrupt the store.

use std::collections::VecDeque;

use chrono::Utc;
use parking_lot::RwLock;

use crate::contract::{Kind, PredictionResult};

struct Partitions {
    spam: VecDeque<PredictionResult>,
    malware: VecDeque<PredictionResult>,
}

impl Partitions {
    fn get_mut(&mut self, kind: Kind) -> &mut VecDeque<PredictionResult> {
        match kind {
            Kind::Spam => &mut self.spam,
            Kind::Malware => &mut self.malware,
        }
    }

    fn get(&self, kind: Kind) -> &VecDeque<PredictionResult> {
        match kind {
            Kind::Spam => &self.spam,
            Kind::Malware => &self.malware,
        }
    }
}

/// Bounded per-kind prediction history with copy-on-read snapshots
pub struct HistoryStore {
    partitions: RwLock<Partitions>,
    /// Per-kind cap; `None` keeps every prediction for the session
    cap: Option<usize>,
}

impl HistoryStore {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            partitions: RwLock::new(Partitions {
                spam: VecDeque::new(),
                malware: VecDeque::new(),
            }),
            cap,
        }
    }

    /// Record a completed prediction under `kind`.
    ///
    /// Assigns `observed_at` at the moment of recording and evicts the
    /// oldest entry of the same kind when the cap is reached. Returns the
    /// stored result.
    pub fn append(&self, kind: Kind, mut result: PredictionResult) -> PredictionResult {
        result.kind = kind;
        result.observed_at = Utc::now();

        let mut partitions = self.partitions.write();
        let partition = partitions.get_mut(kind);
        if let Some(cap) = self.cap {
            while partition.len() >= cap.max(1) {
                partition.pop_front();
            }
        }
        partition.push_back(result.clone());
        result
    }

    /// Immutable point-in-time view, in insertion order.
    ///
    /// With a kind filter this is the partition's order; without one the
    /// two partitions are merged by `observed_at` (each is already
    /// time-ordered, so the merge preserves global insertion order).
    pub fn snapshot(&self, filter: Option<Kind>) -> Vec<PredictionResult> {
        let partitions = self.partitions.read();
        match filter {
            Some(kind) => partitions.get(kind).iter().cloned().collect(),
            None => {
                let mut all: Vec<PredictionResult> = partitions
                    .spam
                    .iter()
                    .chain(partitions.malware.iter())
                    .cloned()
                    .collect();
                all.sort_by_key(|r| r.observed_at);
                all
            }
        }
    }

    /// Number of retained results for one kind
    pub fn len(&self, kind: Kind) -> usize {
        self.partitions.read().get(kind).len()
    }

    /// Number of retained results across both kinds
    pub fn total(&self) -> usize {
        let partitions = self.partitions.read();
        partitions.spam.len() + partitions.malware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

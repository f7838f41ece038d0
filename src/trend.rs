//! Trend Stream
//!
//! Live, bounded time series of detection counts. A repeating timer pulls
//! one [`TickCounts`] per tick from an injected source and appends a
//! [`TrendPoint`] to a capacity-bounded FIFO window. The source strategy
//! is swappable: simulated counts for demos, live counters when real
//! classifications are flowing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::constants::{SIM_MALWARE_RANGE, SIM_SPAM_RANGE, TREND_CAPACITY};
use crate::contract::Kind;

// ============================================================================
// TICK SOURCES
// ============================================================================

/// Detections counted during one tick interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    pub spam: u32,
    pub malware: u32,
}

/// Strategy supplying per-tick detection counts.
///
/// Swapping the source never changes the windowing behavior.
pub trait TickSource: Send {
    fn next_counts(&mut self) -> TickCounts;
}

/// Pseudo-random placeholder used when no live counts are available
#[derive(Debug, Default)]
pub struct SimulatedTicks;

impl SimulatedTicks {
    pub fn new() -> Self {
        Self
    }
}

impl TickSource for SimulatedTicks {
    fn next_counts(&mut self) -> TickCounts {
        let mut rng = rand::thread_rng();
        TickCounts {
            spam: rng.gen_range(SIM_SPAM_RANGE.0..=SIM_SPAM_RANGE.1),
            malware: rng.gen_range(SIM_MALWARE_RANGE.0..=SIM_MALWARE_RANGE.1),
        }
    }
}

/// Shared counters of real detections since the previous tick
#[derive(Debug, Default)]
pub struct LiveCounters {
    spam: AtomicU32,
    malware: AtomicU32,
}

impl LiveCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Count one detection of the given kind
    pub fn record(&self, kind: Kind) {
        match kind {
            Kind::Spam => self.spam.fetch_add(1, Ordering::Relaxed),
            Kind::Malware => self.malware.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Take the counts accumulated since the last drain, resetting to zero
    pub fn drain(&self) -> TickCounts {
        TickCounts {
            spam: self.spam.swap(0, Ordering::Relaxed),
            malware: self.malware.swap(0, Ordering::Relaxed),
        }
    }
}

/// Tick source backed by real classification counts
pub struct LiveTicks(pub Arc<LiveCounters>);

impl TickSource for LiveTicks {
    fn next_counts(&mut self) -> TickCounts {
        self.0.drain()
    }
}

// ============================================================================
// TREND WINDOW
// ============================================================================

/// One per-interval sample of detection counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub spam_count: u32,
    pub malware_count: u32,
}

struct Window {
    points: RwLock<VecDeque<TrendPoint>>,
    running: AtomicBool,
}

impl Window {
    fn new() -> Self {
        Self {
            points: RwLock::new(VecDeque::with_capacity(TREND_CAPACITY)),
            running: AtomicBool::new(false),
        }
    }

    /// Append one point, evicting the oldest at capacity. Returns false
    /// without appending once the stream has been stopped.
    fn push(&self, point: TrendPoint) -> bool {
        let mut points = self.points.write();
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        if points.len() >= TREND_CAPACITY {
            points.pop_front();
        }
        points.push_back(point);
        true
    }

    fn snapshot(&self) -> Vec<TrendPoint> {
        self.points.read().iter().cloned().collect()
    }
}

// ============================================================================
// TREND STREAM
// ============================================================================

/// Bounded detection-count time series driven by a repeating timer.
///
/// State machine: Stopped -> Running -> Stopped. `stop` is idempotent and
/// synchronous: no tick appends a point after it returns.
pub struct TrendStream {
    window: Arc<Window>,
    handle: Option<JoinHandle<()>>,
}

impl Default for TrendStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendStream {
    pub fn new() -> Self {
        Self {
            window: Arc::new(Window::new()),
            handle: None,
        }
    }

    /// Begin ticking every `interval`, pulling counts from `source`.
    /// A second call while running is ignored.
    pub fn start(&mut self, interval: Duration, mut source: Box<dyn TickSource>) {
        if self.window.running.swap(true, Ordering::SeqCst) {
            log::warn!("trend stream already running, start ignored");
            return;
        }

        log::info!("trend stream started (interval {:?})", interval);
        let window = Arc::clone(&self.window);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval fires immediately; the first point comes one interval in
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let counts = source.next_counts();
                let point = TrendPoint {
                    timestamp: Utc::now(),
                    spam_count: counts.spam,
                    malware_count: counts.malware,
                };
                if !window.push(point) {
                    break;
                }
            }
        }));
    }

    /// Cancel the timer. After this returns no further point is appended,
    /// even by a tick that was mid-flight.
    pub fn stop(&mut self) {
        {
            // Clearing the flag under the write lock fences out any tick
            // that has not yet appended its point.
            let _points = self.window.points.write();
            if !self.window.running.swap(false, Ordering::SeqCst) {
                return;
            }
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        log::info!("trend stream stopped ({} points retained)", self.len());
    }

    pub fn is_running(&self) -> bool {
        self.window.running.load(Ordering::SeqCst)
    }

    /// Owned snapshot of the current window, oldest first
    pub fn snapshot(&self) -> Vec<TrendPoint> {
        self.window.snapshot()
    }

    pub fn len(&self) -> usize {
        self.window.points.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for TrendStream {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic source: tick n yields (n, n)
    struct SequenceTicks(u32);

    impl TickSource for SequenceTicks {
        fn next_counts(&mut self) -> TickCounts {
            self.0 += 1;
            TickCounts {
                spam: self.0,
                malware: self.0,
            }
        }
    }

    fn tick(window: &Window, source: &mut dyn TickSource) {
        let counts = source.next_counts();
        window.push(TrendPoint {
            timestamp: Utc::now(),
            spam_count: counts.spam,
            malware_count: counts.malware,
        });
    }

    #[test]
    fn test_window_evicts_oldest_at_capacity() {
        let window = Window::new();
        window.running.store(true, Ordering::SeqCst);
        let mut source = SequenceTicks(0);

        for _ in 0..25 {
            tick(&window, &mut source);
        }

        let points = window.snapshot();
        assert_eq!(points.len(), TREND_CAPACITY);
        // Ticks 1-5 evicted; 6-25 remain in order
        assert_eq!(points.first().unwrap().spam_count, 6);
        assert_eq!(points.last().unwrap().spam_count, 25);
        for pair in points.windows(2) {
            assert_eq!(pair[1].spam_count, pair[0].spam_count + 1);
        }
    }

    #[test]
    fn test_push_refused_when_stopped() {
        let window = Window::new();
        let mut source = SequenceTicks(0);
        tick(&window, &mut source);
        assert!(window.snapshot().is_empty());
    }

    #[test]
    fn test_simulated_ticks_within_documented_ranges() {
        let mut source = SimulatedTicks::new();
        for _ in 0..100 {
            let counts = source.next_counts();
            assert!((SIM_SPAM_RANGE.0..=SIM_SPAM_RANGE.1).contains(&counts.spam));
            assert!((SIM_MALWARE_RANGE.0..=SIM_MALWARE_RANGE.1).contains(&counts.malware));
        }
    }

    #[test]
    fn test_live_counters_drain_resets() {
        let counters = LiveCounters::new();
        counters.record(Kind::Spam);
        counters.record(Kind::Spam);
        counters.record(Kind::Malware);

        let counts = counters.drain();
        assert_eq!(counts.spam, 2);
        assert_eq!(counts.malware, 1);
        assert_eq!(counters.drain(), TickCounts::default());
    }

    #[tokio::test]
    async fn test_stream_ticks_and_stays_bounded() {
        let mut stream = TrendStream::new();
        stream.start(Duration::from_millis(10), Box::new(SequenceTicks(0)));
        assert!(stream.is_running());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let len = stream.len();
        assert!(len > 0, "expected ticks within 150ms");
        assert!(len <= TREND_CAPACITY);
        stream.stop();
    }

    #[tokio::test]
    async fn test_no_ticks_after_stop() {
        let mut stream = TrendStream::new();
        stream.start(Duration::from_millis(10), Box::new(SequenceTicks(0)));
        tokio::time::sleep(Duration::from_millis(50)).await;

        stream.stop();
        assert!(!stream.is_running());
        let len_at_stop = stream.len();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(stream.len(), len_at_stop);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut stream = TrendStream::new();
        stream.start(Duration::from_millis(10), Box::new(SimulatedTicks::new()));
        stream.stop();
        stream.stop();
        assert!(!stream.is_running());
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let mut stream = TrendStream::new();
        stream.start(Duration::from_millis(10), Box::new(SequenceTicks(0)));
        tokio::time::sleep(Duration::from_millis(30)).await;
        stream.stop();

        stream.start(Duration::from_millis(10), Box::new(SequenceTicks(0)));
        assert!(stream.is_running());
        tokio::time::sleep(Duration::from_millis(30)).await;
        stream.stop();
    }
}

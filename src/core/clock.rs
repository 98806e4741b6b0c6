//! Time sources for throttling and penalty expiry.
//!
//! The engine never reads the wall clock directly. Hosts pick a [`Clock`]:
//! [`SystemClock`] for live play, [`TickClock`] when game time should only
//! move while the host is ticking, [`PausableClock`] to carve pauses out of
//! another clock, and [`ManualClock`] for tests and replays.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Millisecond time source.
pub trait Clock: Send {
    /// Current time in milliseconds. Must never go backwards.
    fn now_ms(&self) -> u64;

    /// Called once per engine update with the host's frame delta.
    /// Clocks that follow real time ignore it.
    fn advance(&self, _delta_ms: u64) {}
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Clock that only moves when told to. Clones share the same time, so a test
/// can keep one handle while the engine owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Moves time forward without going through an engine update.
    pub fn advance_by(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Game-time clock driven by the deltas passed to the engine's update.
/// A paused host that stops calling update also stops this clock.
#[derive(Debug, Default, Clone)]
pub struct TickClock {
    elapsed: Arc<AtomicU64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    fn advance(&self, delta_ms: u64) {
        self.elapsed.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

/// Wraps another clock and hides the time spent paused.
#[derive(Debug, Clone)]
pub struct PausableClock<C: Clock> {
    inner: C,
    state: Arc<PauseState>,
}

#[derive(Debug, Default)]
struct PauseState {
    paused: AtomicBool,
    paused_at: AtomicU64,
    paused_total: AtomicU64,
}

impl<C: Clock> PausableClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            state: Arc::new(PauseState::default()),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
    }

    /// Freezes `now_ms`. Pausing twice is a no-op.
    pub fn pause(&self) {
        if self.state.paused.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state
            .paused_at
            .store(self.inner.now_ms(), Ordering::SeqCst);
    }

    /// Resumes time, excluding everything since `pause()`.
    pub fn resume(&self) {
        if !self.state.paused.swap(false, Ordering::SeqCst) {
            return;
        }
        let paused_at = self.state.paused_at.load(Ordering::SeqCst);
        let gap = self.inner.now_ms().saturating_sub(paused_at);
        self.state.paused_total.fetch_add(gap, Ordering::SeqCst);
    }
}

impl<C: Clock> Clock for PausableClock<C> {
    fn now_ms(&self) -> u64 {
        let raw = if self.is_paused() {
            self.state.paused_at.load(Ordering::SeqCst)
        } else {
            self.inner.now_ms()
        };
        raw.saturating_sub(self.state.paused_total.load(Ordering::SeqCst))
    }

    fn advance(&self, delta_ms: u64) {
        if !self.is_paused() {
            self.inner.advance(delta_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        handle.advance_by(500);
        assert_eq!(clock.now_ms(), 1_500);
        clock.set(10);
        assert_eq!(handle.now_ms(), 10);
    }

    #[test]
    fn test_manual_clock_ignores_engine_deltas() {
        let clock = ManualClock::new(0);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_tick_clock_accumulates_deltas() {
        let clock = TickClock::new();
        clock.advance(16);
        clock.advance(17);
        assert_eq!(clock.now_ms(), 33);
    }

    #[test]
    fn test_pausable_clock_excludes_paused_time() {
        let base = ManualClock::new(0);
        let clock = PausableClock::new(base.clone());

        base.advance_by(1_000);
        clock.pause();
        base.advance_by(60_000);
        assert_eq!(clock.now_ms(), 1_000, "time frozen while paused");

        clock.resume();
        assert_eq!(clock.now_ms(), 1_000);
        base.advance_by(250);
        assert_eq!(clock.now_ms(), 1_250);
    }

    #[test]
    fn test_pausable_clock_double_pause_and_resume() {
        let base = ManualClock::new(100);
        let clock = PausableClock::new(base.clone());
        clock.resume();
        assert_eq!(clock.now_ms(), 100);

        clock.pause();
        base.advance_by(50);
        clock.pause();
        base.advance_by(50);
        clock.resume();
        clock.resume();
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn test_pausable_tick_clock_drops_deltas_while_paused() {
        let clock = PausableClock::new(TickClock::new());
        clock.advance(100);
        clock.pause();
        clock.advance(100);
        clock.resume();
        clock.advance(100);
        assert_eq!(clock.now_ms(), 200);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}

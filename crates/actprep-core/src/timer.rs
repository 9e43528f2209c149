//! Session-time counter and its clock driver.
//!
//! The counter is a plain monotonic seconds value, incremented by exactly
//! one per tick of a fixed 1-second clock. It keeps running whether or not
//! a session is active; the session layer computes per-passage deltas from
//! it. The visibility flag is a display concern colocated here because it
//! shares the same observable state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use crate::session::SessionEngine;

/// Monotonic seconds counter plus the timer-visibility flag.
#[derive(Debug)]
pub struct SessionTimer {
    seconds: u64,
    visible: bool,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self {
            seconds: 0,
            visible: true,
        }
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter by one second.
    pub fn tick(&mut self) {
        self.seconds += 1;
    }

    /// Seconds elapsed since the last reset.
    pub fn current_value(&self) -> u64 {
        self.seconds
    }

    /// Restart the counter at zero. Visibility is untouched.
    pub fn reset(&mut self) {
        self.seconds = 0;
    }

    /// Flip the display flag.
    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The fixed-period external clock driving a [`SessionEngine`]'s timer.
///
/// Spawns a tokio task that calls `tick_timer` once per second until
/// stopped or dropped, so the recurring task can never leak past the
/// handle's lifetime.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking the engine once per second.
    ///
    /// Each tick holds the engine mutex while observer callbacks run, so
    /// observers on a ticker-driven engine must not lock the same
    /// `Arc<Mutex<SessionEngine>>` from inside a callback.
    pub fn spawn(engine: Arc<Mutex<SessionEngine>>) -> Self {
        Self::spawn_with_period(engine, Duration::from_secs(1))
    }

    /// Same as [`Ticker::spawn`] with a custom period, for tests.
    pub fn spawn_with_period(engine: Arc<Mutex<SessionEngine>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                engine.lock().unwrap().tick_timer();
            }
        });
        Self { handle }
    }

    /// Cancel the recurring tick.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero_and_ticks() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.current_value(), 0);
        timer.tick();
        timer.tick();
        assert_eq!(timer.current_value(), 2);
    }

    #[test]
    fn reset_preserves_visibility() {
        let mut timer = SessionTimer::new();
        timer.tick();
        timer.toggle_visible();
        timer.reset();
        assert_eq!(timer.current_value(), 0);
        assert!(!timer.is_visible());
    }

    #[test]
    fn visibility_toggles_both_ways() {
        let mut timer = SessionTimer::new();
        assert!(timer.is_visible());
        timer.toggle_visible();
        assert!(!timer.is_visible());
        timer.toggle_visible();
        assert!(timer.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_drives_engine_counter() {
        let engine = Arc::new(Mutex::new(SessionEngine::new()));
        let ticker = Ticker::spawn(Arc::clone(&engine));

        time::sleep(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;

        // No session is active; the counter runs anyway.
        assert!(engine.lock().unwrap().session_time() >= 2);
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_ticker_goes_quiet() {
        let engine = Arc::new(Mutex::new(SessionEngine::new()));
        let ticker = Ticker::spawn(Arc::clone(&engine));

        time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        ticker.stop();
        let frozen = engine.lock().unwrap().session_time();

        time::sleep(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(engine.lock().unwrap().session_time(), frozen);
    }
}

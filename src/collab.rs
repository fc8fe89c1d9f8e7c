//! Interfaces the session drives but does not implement: sound and the
//! gravity timer.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sound {
    Rotate,
    Move,
    Drop,
    Clear,
    GameOver,
}

/// Fire-and-forget sound playback. Implementations must not block or panic.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// A repeating gravity tick. `schedule` replaces any pending tick.
pub trait GravityTimer {
    fn schedule(&mut self, interval_ms: u64);
    fn cancel(&mut self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: Sound) {}
}

// ============================================================================
// Deadline timer
// ============================================================================

/// Timer for a poll-based event loop: the loop asks how long it may wait
/// and then whether a tick is due.
#[derive(Debug)]
pub struct DeadlineTimer {
    interval: Option<Duration>,
    next_due: Instant,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self {
            interval: None,
            next_due: Instant::now(),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Time left before the next tick, `None` while cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.interval
            .map(|_| self.next_due.saturating_duration_since(now))
    }

    /// Returns true once per elapsed interval and arms the next deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.interval {
            Some(interval) if now >= self.next_due => {
                self.next_due = now + interval;
                true
            }
            _ => false,
        }
    }

    fn schedule_from(&mut self, now: Instant, interval_ms: u64) {
        let interval = Duration::from_millis(interval_ms);
        self.interval = Some(interval);
        self.next_due = now + interval;
    }
}

impl Default for DeadlineTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityTimer for DeadlineTimer {
    fn schedule(&mut self, interval_ms: u64) {
        self.schedule_from(Instant::now(), interval_ms);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = DeadlineTimer::new();
        timer.schedule(10);
        timer.cancel();
        let later = Instant::now() + Duration::from_secs(5);
        assert!(!timer.fire_if_due(later));
        assert_eq!(timer.time_until_due(later), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.schedule_from(start, 100);

        assert!(!timer.fire_if_due(start + Duration::from_millis(50)));
        assert!(timer.fire_if_due(start + Duration::from_millis(100)));
        assert!(!timer.fire_if_due(start + Duration::from_millis(150)));
        assert!(timer.fire_if_due(start + Duration::from_millis(200)));
    }

    #[test]
    fn rescheduling_replaces_the_pending_tick() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.schedule_from(start, 1000);
        timer.schedule_from(start, 900);

        assert_eq!(timer.interval(), Some(Duration::from_millis(900)));
        assert_eq!(
            timer.time_until_due(start),
            Some(Duration::from_millis(900))
        );
    }
}

//! Frame-driven timing primitives.
//!
//! All waiting in the game is expressed as explicit per-frame countdowns
//! advanced by the fixed-timestep loop. Cancelling any of these is a plain
//! state transition and is always safe to repeat; a cancelled timer never
//! delivers a completion afterwards.

use std::collections::VecDeque;

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Repeating timer with a fixed millisecond period.
#[derive(Clone, Debug)]
pub struct Interval {
    period: f32,
    elapsed: f32,
    running: bool,
}

impl Interval {
    /// Creates a stopped interval. Periods below one millisecond are raised
    /// to one to keep [`Interval::advance`] finite.
    pub fn new(period_ms: f32) -> Self {
        Self {
            period: period_ms.max(1.0),
            elapsed: 0.0,
            running: false,
        }
    }

    /// Starts (or restarts) the interval from zero.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = 0.0;
    }

    /// Stops the interval. Safe to call when not running.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    /// Returns whether the interval is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances by `dt_ms` and returns how many periods elapsed.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += dt_ms;
        let mut fires = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fires += 1;
        }
        fires
    }
}

/// One-shot countdown. Completes at most once; cancelling prevents the
/// completion from ever being reported.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: f32,
    running: bool,
}

impl Countdown {
    /// Creates a running countdown of `duration_ms`.
    pub fn new(duration_ms: f32) -> Self {
        Self {
            remaining: duration_ms,
            running: true,
        }
    }

    /// Creates an already-finished countdown that never fires.
    pub fn idle() -> Self {
        Self {
            remaining: 0.0,
            running: false,
        }
    }

    /// Returns whether the countdown is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Milliseconds left, zero once finished or cancelled.
    pub fn remaining(&self) -> f32 {
        if self.running {
            self.remaining.max(0.0)
        } else {
            0.0
        }
    }

    /// Cancels the countdown. Idempotent.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Advances by `dt_ms`; returns `true` exactly once, on completion.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt_ms;
        if self.remaining <= 0.0 {
            self.running = false;
            return true;
        }
        false
    }
}

/// Sequence of delayed cues, drained by the frame loop.
///
/// Each entry is `(delay_ms, value)`: wait the delay, then yield the value,
/// then start waiting on the next entry.
#[derive(Clone, Debug)]
pub struct CueSheet<T> {
    cues: VecDeque<(f32, T)>,
    elapsed: f32,
}

impl<T> CueSheet<T> {
    /// Creates a sheet from `(delay_ms, value)` pairs played in order.
    pub fn new(cues: Vec<(f32, T)>) -> Self {
        Self {
            cues: cues.into(),
            elapsed: 0.0,
        }
    }

    /// Creates an empty, finished sheet.
    pub fn empty() -> Self {
        Self {
            cues: VecDeque::new(),
            elapsed: 0.0,
        }
    }

    /// Returns whether all cues have been delivered or cancelled.
    pub fn is_finished(&self) -> bool {
        self.cues.is_empty()
    }

    /// Drops all pending cues. Idempotent.
    pub fn cancel(&mut self) {
        self.cues.clear();
        self.elapsed = 0.0;
    }

    /// Advances by `dt_ms`, yielding at most one due cue per call. Leftover
    /// time is carried into the next cue's delay.
    pub fn advance(&mut self, dt_ms: f32) -> Option<T> {
        let delay = match self.cues.front() {
            Some((delay, _)) => *delay,
            None => return None,
        };
        self.elapsed += dt_ms;
        if self.elapsed >= delay {
            self.elapsed -= delay;
            return self.cues.pop_front().map(|(_, value)| value);
        }
        None
    }
}

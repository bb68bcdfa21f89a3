//! Session countdown.
//!
//! The countdown only moves when [`SessionTimer::tick`] is called with the
//! current clock reading, so it can be driven by an input loop or by tests
//! with a [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

pub const DEFAULT_MINUTES: u32 = 30;
pub const PRESET_MINUTES: [u32; 3] = [30, 45, 60];
pub const MIN_MINUTES: u32 = 5;
pub const MAX_MINUTES: u32 = 180;

/// Monotonic milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        ManualClock { now: Cell::new(start_ms) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_MINUTES, MAX_MINUTES)
}

pub fn minutes_to_ms(minutes: u32) -> u64 {
    minutes as u64 * 60 * 1000
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimer {
    minutes: u32,
    remaining_ms: u64,
    running: bool,
    over: bool,
    last_tick: Option<u64>,
}

impl SessionTimer {
    pub fn new(minutes: u32) -> Self {
        SessionTimer {
            minutes,
            remaining_ms: minutes_to_ms(minutes),
            running: false,
            over: false,
            last_tick: None,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn total_ms(&self) -> u64 {
        minutes_to_ms(self.minutes)
    }

    /// Applies the time elapsed since the previous tick. The first tick after
    /// starting only records the reading.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.running {
            self.last_tick = None;
            return;
        }
        let prev = self.last_tick.unwrap_or(now_ms);
        self.last_tick = Some(now_ms);
        let delta = now_ms.saturating_sub(prev);
        if delta >= self.remaining_ms {
            self.remaining_ms = 0;
            self.running = false;
            self.over = true;
            self.last_tick = None;
            tracing::debug!("session timer ran out");
        } else {
            self.remaining_ms -= delta;
        }
    }

    pub fn set_running(&mut self, running: bool) {
        if self.over {
            return;
        }
        self.running = running;
        if !running {
            self.last_tick = None;
        }
    }

    pub fn toggle(&mut self) {
        let next = !self.running;
        self.set_running(next);
    }

    pub fn reset(&mut self, minutes: Option<u32>) {
        if let Some(m) = minutes {
            self.minutes = m;
        }
        self.remaining_ms = minutes_to_ms(self.minutes);
        self.running = false;
        self.over = false;
        self.last_tick = None;
    }

    pub fn set_minutes(&mut self, minutes: u32) {
        self.reset(Some(clamp_minutes(minutes)));
    }

    pub fn time_ratio(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        (self.remaining_ms as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// Renders milliseconds as `MM:SS`, rounding partial seconds up.
pub fn format_time(ms: u64) -> String {
    let total = ms.div_ceil(1000);
    format!("{:02}:{:02}", total / 60, total % 60)
}

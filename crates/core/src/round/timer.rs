/// Seconds a player gets per round unless configured otherwise.
pub const DEFAULT_ROUND_SECONDS: u32 = 6;

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer not armed; nothing happened.
    Idle,
    /// Still counting; seconds left.
    Running(u32),
    /// Reached zero on this tick. Reported once, after which the timer is idle.
    Expired,
}

/// Countdown for the active round, driven by external one-second ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
    duration: u32,
    remaining: u32,
    armed: bool,
}

impl RoundTimer {
    /// Create a disarmed timer. A zero duration is bumped to one second.
    pub fn new(duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            duration,
            remaining: duration,
            armed: false,
        }
    }

    /// Restart the countdown from the full duration.
    pub fn arm(&mut self) {
        self.remaining = self.duration;
        self.armed = true;
    }

    /// Stop counting and restore the full duration for display.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.remaining = self.duration;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TimerTick {
        if !self.armed {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }

    /// Seconds left in the round.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Full round length.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Whether the countdown is running.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SECONDS)
    }
}

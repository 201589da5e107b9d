#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }

    /// Label shown next to the progress bar.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Working",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }

    pub(crate) fn emoji(&self) -> &'static str {
        match self {
            Phase::Work => "🍅",
            Phase::ShortBreak => "☕",
            Phase::LongBreak => "🧺",
        }
    }
}

/// Counters carried from one phase to the next.
///
/// `completed_in_cycle` counts work intervals since the last long break and
/// is only zero between a reset and the next work interval.
/// `baskets_earned` only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleState {
    pub completed_in_cycle: u32,
    pub baskets_earned: u32,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_work(&mut self) {
        self.completed_in_cycle += 1;
    }

    /// Break that follows the current work interval. `threshold` must be non-zero.
    pub fn next_break(&self, threshold: u32) -> Phase {
        if self.completed_in_cycle % threshold == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    pub fn finish_long_break(&mut self) {
        self.baskets_earned += 1;
        self.completed_in_cycle = 0;
    }

    /// Work intervals started over the whole session.
    pub fn pomodoros_started(&self, threshold: u32) -> u64 {
        u64::from(self.baskets_earned) * u64::from(threshold) + u64::from(self.completed_in_cycle)
    }
}

use crate::hand::HandSide;

/// Introduces new balls into play at a fixed cadence, alternating the hand
/// of origin by spawn-index parity, until the target count is reached.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    target_count: usize,
    interval: f64,
    next_spawn_time: f64,
    spawned: usize,
    /// Discard the first due opportunity instead of spawning, delaying the
    /// first ball by one interval. See
    /// `SessionConfig::skip_first_spawn_opportunity`.
    skip_first_opportunity: bool,
    first_opportunity_skipped: bool,
}

impl SpawnScheduler {
    pub fn new(target_count: usize, interval: f64, skip_first_opportunity: bool) -> Self {
        Self {
            target_count,
            interval,
            next_spawn_time: 0.0,
            spawned: 0,
            skip_first_opportunity,
            first_opportunity_skipped: false,
        }
    }

    /// Hand the next ball should spawn above, if one is due at `now`.
    /// No-op once the target count is reached.
    pub fn poll(&mut self, now: f64) -> Option<HandSide> {
        if self.spawned >= self.target_count {
            return None;
        }
        if now <= self.next_spawn_time {
            return None;
        }
        if self.skip_first_opportunity && !self.first_opportunity_skipped {
            self.first_opportunity_skipped = true;
            self.next_spawn_time = now + self.interval;
            return None;
        }
        let side = if self.spawned % 2 == 0 {
            HandSide::Left
        } else {
            HandSide::Right
        };
        self.spawned += 1;
        self.next_spawn_time = now + self.interval;
        Some(side)
    }

    /// Balls introduced so far.
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn is_done(&self) -> bool {
        self.spawned >= self.target_count
    }
}

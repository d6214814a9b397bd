use std::time::Duration;

/// Fixed-interval stepper driven by elapsed time.
///
/// The driver feeds it whatever time passed (wall clock in the game loop,
/// made-up durations in tests) and runs one simulation step per tick it
/// reports. At most one tick is due per call: time lost to a stall is
/// dropped instead of replayed. Re-arming discards any partial interval, so
/// a restarted game never inherits ticks from the previous one.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: Duration,
    elapsed: Duration,
    armed: bool,
}

impl FixedStep {
    pub fn new(interval: Duration) -> Self {
        FixedStep { interval, elapsed: Duration::from_millis(0), armed: false }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn start(&mut self) {
        self.elapsed = Duration::from_millis(0);
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.elapsed = Duration::from_millis(0);
        self.armed = false;
    }

    /// Whether a tick became due during `dt`.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.armed || self.interval == Duration::from_millis(0) {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }
        let leftover = self.elapsed.as_nanos() % self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(leftover as u64);
        true
    }
}

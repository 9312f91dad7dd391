/// A cancellable repeating task that drives a swarm's ticks.
///
/// The scheduler owns the timer; the host wires its callback to
/// [`ZergRush::tick`](crate::ZergRush::tick). Cancelling must be safe to call
/// from inside that callback and must be idempotent.
pub trait Scheduler {
    fn start(&mut self, period_ms: u32);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Scheduler for hosts that call `tick` themselves, such as tests and native loops.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualScheduler {
    period_ms: Option<u32>,
    starts: usize,
    cancels: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period requested by the last `start`, while active.
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    pub fn start_count(&self) -> usize {
        self.starts
    }

    /// Number of cancellations that actually stopped an active task.
    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period_ms: u32) {
        self.period_ms = Some(period_ms);
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.period_ms.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.period_ms.is_some()
    }
}

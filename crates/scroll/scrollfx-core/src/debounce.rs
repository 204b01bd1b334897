//! Trailing-edge debounce driven by caller-supplied time.

/// Single-slot debounce: each [`trigger`](Debounce::trigger) restarts the
/// quiet window, and [`poll`](Debounce::poll) reports `true` exactly once
/// after the window elapses without a new trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct Debounce {
    wait_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms: wait_ms.max(0.0),
            deadline: None,
        }
    }

    #[inline]
    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.wait_ms);
    }

    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

//! One-shot delayed tasks (settle delays, deferred reveals).

/// Tasks keyed by due time. [`due`](TimerQueue::due) drains every task whose
/// time has come, earliest first; ties keep scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    seq: u64,
    pending: Vec<(f64, u64, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_ms: f64, task: T) {
        self.pending.push((at_ms, self.seq, task));
        self.seq += 1;
    }

    pub fn due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut ready, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(at, _, _)| *at <= now_ms);
        self.pending = rest;
        ready.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ready.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

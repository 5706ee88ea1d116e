use std::collections::VecDeque;

/// Number of recent velocities averaged by the estimator
pub const HISTORY_CAPACITY: usize = 10;

/// FIFO of the most recent velocities, oldest evicted first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocityHistory {
    samples: VecDeque<f64>,
}

impl VelocityHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    pub fn push(&mut self, velocity: f64) {
        if self.samples.len() == HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(velocity);
    }

    /// Mean of the window, 0 when empty
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

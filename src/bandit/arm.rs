use crate::Reward;
use serde::Deserialize;
use serde::Serialize;
use std::collections::VecDeque;

/// one action's empirical return distribution: sample count,
/// running sums, and a fixed-width window of recent mean
/// estimates backing the convergence test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arm {
    count: usize,
    capacity: usize,
    sum_reward: Reward,
    sum_squared_reward: Reward,
    window: VecDeque<Reward>,
}

impl Arm {
    pub fn new(capacity: usize) -> Self {
        Self {
            count: 0,
            capacity,
            sum_reward: 0.,
            sum_squared_reward: 0.,
            window: std::iter::repeat(0.).take(capacity + 1).collect(),
        }
    }

    /// absorb one reward sample. once the sample count clears
    /// the window capacity, the running mean is recorded and the
    /// oldest estimate falls off.
    pub fn update(&mut self, reward: Reward) {
        self.count += 1;
        self.sum_reward += reward;
        self.sum_squared_reward += reward * reward;
        if self.count > self.capacity {
            self.window.pop_front();
            self.window.push_back(self.mean());
        }
    }

    pub fn mean(&self) -> Reward {
        if self.count == 0 {
            0.
        } else {
            self.sum_reward / self.count as Reward
        }
    }

    /// standard deviation of the observed rewards. the raw
    /// variance is clamped at zero first; cancellation can drive
    /// it slightly negative.
    pub fn std(&self) -> Reward {
        if self.count == 0 {
            return 0.;
        }
        let mean = self.mean();
        let raw = self.sum_squared_reward / self.count as Reward - mean * mean;
        raw.max(0.).sqrt()
    }

    /// mean absolute drift across the recorded window, once
    /// enough samples have been seen to fill it
    pub fn has_converged(&self, epsilon: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.count < self.capacity + 1 {
            return false;
        }
        let drift = self
            .window
            .iter()
            .zip(self.window.iter().skip(1))
            .map(|(previous, current)| (current - previous).abs())
            .sum::<Reward>();
        drift / (self.capacity as Reward) < epsilon
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.sum_reward = 0.;
        self.sum_squared_reward = 0.;
        for estimate in self.window.iter_mut() {
            *estimate = 0.;
        }
    }
}

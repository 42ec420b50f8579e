use super::bandit::Arms;
use super::bandit::Bandit;
use crate::Reward;
use crate::search::rng::Rng;

/// optimism under uncertainty: empirical mean plus a scaled
/// confidence radius. unvisited arms score infinite, so every
/// arm is tried before any estimate is trusted.
pub struct Ucb1 {
    arms: Arms,
    exploration_constant: f64,
}

impl Ucb1 {
    pub fn new(
        number_of_arms: usize,
        reward_buffer_size: usize,
        exploration_constant: f64,
        rng: Rng,
    ) -> Self {
        Self {
            arms: Arms::new(number_of_arms, reward_buffer_size, rng),
            exploration_constant,
        }
    }
}

impl Bandit for Ucb1 {
    fn arms(&self) -> &Arms {
        &self.arms
    }
    fn arms_mut(&mut self) -> &mut Arms {
        &mut self.arms
    }
    fn sample_arm_from(&mut self, legal: &[usize]) -> usize {
        let total = legal
            .iter()
            .map(|&arm| self.arms.arm(arm).size())
            .sum::<usize>();
        let scores = legal
            .iter()
            .map(|&arm| match self.arms.arm(arm).size() {
                0 => Reward::INFINITY,
                // the radius divides by the legal-set size, not
                // the per-arm visit count
                _ => {
                    let radius = (2. * (total as f64).ln() / legal.len() as f64).sqrt();
                    self.arms.arm(arm).mean() + self.exploration_constant * radius
                }
            })
            .collect::<Vec<Reward>>();
        legal[self.arms.argmax(&scores)]
    }
}

use super::bandit::Arms;
use super::bandit::Bandit;
use crate::Probability;
use crate::search::rng::Rng;

/// explore uniformly with probability epsilon, otherwise
/// exploit the best empirical mean
pub struct EpsilonGreedy {
    arms: Arms,
    epsilon: Probability,
}

impl EpsilonGreedy {
    pub fn new(
        number_of_arms: usize,
        reward_buffer_size: usize,
        epsilon: Probability,
        rng: Rng,
    ) -> Self {
        assert!((0. ..=1.).contains(&epsilon));
        Self {
            arms: Arms::new(number_of_arms, reward_buffer_size, rng),
            epsilon,
        }
    }
}

impl Bandit for EpsilonGreedy {
    fn arms(&self) -> &Arms {
        &self.arms
    }
    fn arms_mut(&mut self) -> &mut Arms {
        &mut self.arms
    }
    fn sample_arm_from(&mut self, legal: &[usize]) -> usize {
        if self.arms.rng().unit() <= self.epsilon {
            legal[self.arms.rng().index(legal.len())]
        } else {
            self.arms.play_from(legal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_epsilon_is_pure_exploitation() {
        let mut bandit = EpsilonGreedy::new(3, 0, 0., Rng::seeded(8));
        bandit.sample_from(&[1]);
        bandit.update(10.);
        bandit.sample_from(&[2]);
        bandit.update(-10.);
        for _ in 0..32 {
            assert!(bandit.sample_from(&[1, 2]) == 1);
        }
    }

    #[test]
    fn full_epsilon_still_respects_the_legal_set() {
        let mut bandit = EpsilonGreedy::new(4, 0, 1., Rng::seeded(9));
        for _ in 0..64 {
            let arm = bandit.sample_from(&[0, 2]);
            assert!(arm == 0 || arm == 2);
        }
    }
}

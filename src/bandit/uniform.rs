use super::bandit::Arms;
use super::bandit::Bandit;
use crate::search::rng::Rng;

/// uninformed baseline: every sample is a uniform draw from the
/// legal set
pub struct Uniform(Arms);

impl Uniform {
    pub fn new(number_of_arms: usize, rng: Rng) -> Self {
        Self(Arms::new(number_of_arms, 1, rng))
    }
}

impl Bandit for Uniform {
    fn arms(&self) -> &Arms {
        &self.0
    }
    fn arms_mut(&mut self) -> &mut Arms {
        &mut self.0
    }
    fn sample_arm_from(&mut self, legal: &[usize]) -> usize {
        legal[self.0.rng().index(legal.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_the_legal_set() {
        let mut bandit = Uniform::new(5, Rng::seeded(6));
        let legal = [1, 3];
        for _ in 0..64 {
            let arm = bandit.sample_from(&legal);
            assert!(arm == 1 || arm == 3);
            bandit.update(1.);
        }
        assert!(bandit.arms().arm(0).size() == 0);
        assert!(bandit.arms().arm(1).size() + bandit.arms().arm(3).size() == 64);
    }
}

use super::arm::Arm;
use crate::Reward;
use crate::search::rng::Rng;

/// the state every bandit variant shares: K owned arms, the
/// index committed by the most recent sample, and the generator
/// driving tie-breaks and variant-specific draws.
pub struct Arms {
    arms: Vec<Arm>,
    play_index: Option<usize>,
    rng: Rng,
}

impl Arms {
    pub fn new(number_of_arms: usize, reward_buffer_size: usize, rng: Rng) -> Self {
        Self {
            arms: (0..number_of_arms).map(|_| Arm::new(reward_buffer_size)).collect(),
            play_index: None,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
    pub fn arm(&self, index: usize) -> &Arm {
        &self.arms[index]
    }
    pub fn play_index(&self) -> Option<usize> {
        self.play_index
    }
    /// commit an arm so the next update can route its reward
    pub fn commit(&mut self, index: usize) {
        assert!(index < self.arms.len());
        self.play_index = Some(index);
    }
    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// index of the maximum score, breaking exact ties by a
    /// uniform random choice. the randomized tie-break is what
    /// spreads exploration across arms whose scores are all
    /// infinite.
    pub fn argmax(&mut self, scores: &[Reward]) -> usize {
        let mut candidates = Vec::with_capacity(scores.len());
        let mut best = Reward::NEG_INFINITY;
        for (index, &score) in scores.iter().enumerate() {
            if score >= best {
                if score > best {
                    candidates.clear();
                }
                best = score;
                candidates.push(index);
            }
        }
        assert!(!candidates.is_empty());
        candidates[self.rng.index(candidates.len())]
    }

    /// greedy argmax of arm means over the legal subset
    pub fn play_from(&mut self, legal: &[usize]) -> usize {
        let means = legal
            .iter()
            .map(|&arm| self.arms[arm].mean())
            .collect::<Vec<Reward>>();
        legal[self.argmax(&means)]
    }

    /// greedy over the arms that have any data. exploit-only;
    /// with no data at all the choice is arbitrary and we return
    /// the first arm.
    pub fn play(&mut self) -> usize {
        let candidates = (0..self.arms.len())
            .filter(|&arm| self.arms[arm].size() > 0)
            .collect::<Vec<usize>>();
        if candidates.is_empty() {
            return 0;
        }
        self.play_from(&candidates)
    }

    /// route a reward to the last committed arm
    pub fn update(&mut self, reward: Reward) {
        if let Some(index) = self.play_index {
            self.arms[index].update(reward);
        }
    }

    /// clear every arm, preserving structure
    pub fn reset(&mut self) {
        for arm in self.arms.iter_mut() {
            arm.reset();
        }
    }

    /// convergence test on the last committed arm
    pub fn has_converged(&self, epsilon: f64) -> bool {
        match self.play_index {
            Some(index) => self.arms[index].has_converged(epsilon),
            None => false,
        }
    }
}

/// common protocol across the bandit variants. `sample*`
/// explores and commits the chosen arm; `play*` exploits;
/// `update` pays the committed arm.
pub trait Bandit {
    fn arms(&self) -> &Arms;
    fn arms_mut(&mut self) -> &mut Arms;
    /// variant-specific exploration policy over the legal subset
    fn sample_arm_from(&mut self, legal: &[usize]) -> usize;

    /// greedy over arms with any data, for the final decision
    fn play(&mut self) -> usize {
        self.arms_mut().play()
    }
    /// greedy over the legal subset
    fn play_from(&mut self, legal: &[usize]) -> usize {
        self.arms_mut().play_from(legal)
    }
    /// explore over the full action set and commit the choice
    fn sample(&mut self) -> usize {
        let actions = (0..self.arms().len()).collect::<Vec<usize>>();
        self.sample_from(&actions)
    }
    /// explore over the legal subset and commit the choice
    fn sample_from(&mut self, legal: &[usize]) -> usize {
        assert!(!legal.is_empty());
        let index = self.sample_arm_from(legal);
        self.arms_mut().commit(index);
        index
    }
    /// route a reward to the arm committed by the last sample
    fn update(&mut self, reward: Reward) {
        self.arms_mut().update(reward);
    }
    /// clear all arms, preserving structure
    fn reset(&mut self) {
        self.arms_mut().reset();
    }
    /// convergence test on the arm committed by the last sample
    fn has_converged(&self, epsilon: f64) -> bool {
        self.arms().has_converged(epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_breaks_ties_uniformly() {
        let mut arms = Arms::new(4, 0, Rng::seeded(42));
        let scores = [1., 1., 1., 1.];
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[arms.argmax(&scores)] += 1;
        }
        for &count in counts.iter() {
            assert!(count > 850 && count < 1150);
        }
    }

    #[test]
    fn argmax_prefers_the_strict_maximum() {
        let mut arms = Arms::new(4, 0, Rng::seeded(0));
        assert!(arms.argmax(&[0., 3., 2., 1.]) == 1);
        assert!(arms.argmax(&[f64::INFINITY, 3., 2., 1.]) == 0);
    }

    #[test]
    fn update_routes_to_the_committed_arm() {
        let mut arms = Arms::new(3, 0, Rng::seeded(0));
        arms.commit(2);
        arms.update(7.);
        assert!(arms.arm(0).size() == 0);
        assert!(arms.arm(1).size() == 0);
        assert!(arms.arm(2).size() == 1);
        assert!(arms.arm(2).mean() == 7.);
    }

    #[test]
    fn update_without_commit_is_a_no_op() {
        let mut arms = Arms::new(2, 0, Rng::seeded(0));
        arms.update(5.);
        assert!(arms.arm(0).size() == 0);
        assert!(arms.arm(1).size() == 0);
    }

    #[test]
    fn play_ignores_empty_arms() {
        let mut arms = Arms::new(3, 0, Rng::seeded(0));
        arms.commit(1);
        arms.update(-2.);
        // arm 1 is the only one with data, despite its bad mean
        for _ in 0..16 {
            assert!(arms.play() == 1);
        }
    }

    #[test]
    fn play_with_no_data_returns_the_first_arm() {
        let mut arms = Arms::new(3, 0, Rng::seeded(0));
        assert!(arms.play() == 0);
    }

    #[test]
    fn reset_preserves_structure() {
        let mut arms = Arms::new(3, 0, Rng::seeded(0));
        arms.commit(0);
        arms.update(1.);
        arms.reset();
        assert!(arms.len() == 3);
        assert!(arms.arm(0).size() == 0);
    }
}

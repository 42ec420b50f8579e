use super::bandit::Arms;
use super::bandit::Bandit;
use crate::PRIOR_MEAN;
use crate::PRIOR_PRECISION;
use crate::PRIOR_SHAPE;
use crate::Reward;
use crate::search::rng::Rng;

/// Bayesian exploration with a Normal-Gamma conjugate prior
/// over each arm's mean reward. every sample draws a precision
/// from the Gamma posterior, then a mean from the matching
/// Normal, and plays the argmax of the draws.
///
/// the cached sufficient statistics are refreshed only on every
/// `update_delay`-th reward an arm absorbs, so the posterior can
/// lag the raw arm counters on purpose.
pub struct Thompson {
    arms: Arms,
    beta0: f64,
    update_delay: usize,
    counts: Vec<usize>,
    means: Vec<Reward>,
    vars: Vec<Reward>,
}

impl Thompson {
    pub fn new(
        number_of_arms: usize,
        reward_buffer_size: usize,
        update_delay: usize,
        beta0: f64,
        rng: Rng,
    ) -> Self {
        assert!(update_delay > 0);
        Self {
            arms: Arms::new(number_of_arms, reward_buffer_size, rng),
            beta0,
            update_delay,
            counts: vec![0; number_of_arms],
            means: vec![0.; number_of_arms],
            vars: vec![0.; number_of_arms],
        }
    }

    /// hook point for deferred posterior maintenance
    pub fn flush(&mut self) {}

    /// one draw from the Normal-Gamma posterior over this arm's
    /// mean, using the cached sufficient statistics
    fn posterior_mean_sample(&mut self, arm: usize) -> Reward {
        let n = self.counts[arm] as f64;
        let mean = self.means[arm];
        let var = self.vars[arm];
        let delta = mean - PRIOR_MEAN;
        let lambda1 = PRIOR_PRECISION + n;
        assert!(lambda1 > 0.);
        let mu1 = (PRIOR_PRECISION * PRIOR_MEAN + n * mean) / lambda1;
        let alpha1 = PRIOR_SHAPE + n / 2.;
        assert!(alpha1 >= 1.);
        let beta1 = self.beta0 + 0.5 * (n * var + PRIOR_PRECISION * n * delta * delta / lambda1);
        assert!(beta1 >= 0.);
        let tau = self.arms.rng().gamma(alpha1, 1. / beta1);
        self.arms.rng().normal(mu1, (1. / (lambda1 * tau)).sqrt())
    }
}

impl Bandit for Thompson {
    fn arms(&self) -> &Arms {
        &self.arms
    }
    fn arms_mut(&mut self) -> &mut Arms {
        &mut self.arms
    }

    fn update(&mut self, reward: Reward) {
        self.arms.update(reward);
        if let Some(index) = self.arms.play_index() {
            let count = self.arms.arm(index).size();
            if count % self.update_delay == 0 {
                self.counts[index] += 1;
                self.means[index] = self.arms.arm(index).mean();
                self.vars[index] = self.arms.arm(index).std().powi(2);
            }
        }
    }

    fn reset(&mut self) {
        self.arms.reset();
        for count in self.counts.iter_mut() {
            *count = 0;
        }
        for mean in self.means.iter_mut() {
            *mean = 0.;
        }
        for var in self.vars.iter_mut() {
            *var = 0.;
        }
    }

    fn sample_arm_from(&mut self, legal: &[usize]) -> usize {
        let mut scores = Vec::with_capacity(legal.len());
        for &arm in legal {
            if self.counts[arm] == 0 {
                scores.push(Reward::INFINITY);
            } else {
                scores.push(self.posterior_mean_sample(arm));
            }
        }
        legal[self.arms.argmax(&scores)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posterior_concentrates_on_the_true_mean() {
        let mut source = Rng::seeded(12);
        let mut bandit = Thompson::new(1, 0, 1, 1., Rng::seeded(13));
        for _ in 0..1000 {
            bandit.sample_from(&[0]);
            bandit.update(source.normal(5., 1.));
        }
        let draws = (0..1000)
            .map(|_| bandit.posterior_mean_sample(0))
            .collect::<Vec<Reward>>();
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let variance = draws.iter().map(|theta| (theta - mean).powi(2)).sum::<f64>() / n;
        assert!(mean > 4.7 && mean < 5.3);
        assert!(variance < 0.1);
    }

    #[test]
    fn unvisited_arms_come_first() {
        let mut bandit = Thompson::new(2, 0, 1, 1., Rng::seeded(14));
        bandit.sample_from(&[0]);
        bandit.update(1e6);
        assert!(bandit.sample_from(&[0, 1]) == 1);
    }

    #[test]
    fn update_delay_gates_the_cached_statistics() {
        let mut bandit = Thompson::new(1, 0, 3, 1., Rng::seeded(15));
        bandit.sample_from(&[0]);
        bandit.update(2.);
        bandit.update(4.);
        // two rewards absorbed, none of them on a refresh tick
        assert!(bandit.counts[0] == 0);
        assert!(bandit.means[0] == 0.);
        bandit.update(6.);
        // the third reward lands on the tick and snapshots the mean
        assert!(bandit.counts[0] == 1);
        assert!(bandit.means[0] == 4.);
    }

    #[test]
    fn reset_clears_the_posterior_caches() {
        let mut bandit = Thompson::new(2, 0, 1, 1., Rng::seeded(16));
        bandit.sample_from(&[1]);
        bandit.update(3.);
        assert!(bandit.counts[1] == 1);
        bandit.reset();
        assert!(bandit.counts[1] == 0);
        assert!(bandit.means[1] == 0.);
        assert!(bandit.vars[1] == 0.);
        assert!(bandit.arms().arm(1).size() == 0);
    }
}

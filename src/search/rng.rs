use rand::Rng as _;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Distribution;

/// seedable generator behind every sampling decision in the
/// crate. planners, bandits, and domains all draw from forks of
/// one root generator, so a fixed seed reproduces a run exactly.
pub struct Rng(SmallRng);

impl Rng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// derive a seed for a child generator
    pub fn seed(&mut self) -> u64 {
        self.0.random::<u64>()
    }

    /// derive an independent deterministic generator
    pub fn fork(&mut self) -> Self {
        Self(SmallRng::seed_from_u64(self.seed()))
    }

    /// uniform draw from [0, range)
    pub fn index(&mut self, range: usize) -> usize {
        assert!(range > 0);
        self.0.random_range(0..range)
    }

    /// uniform draw from [min, min + len)
    pub fn range(&mut self, min: usize, len: usize) -> usize {
        min + self.index(len)
    }

    /// uniform draw from the unit interval
    pub fn unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }

    /// Gamma(shape, scale) variate
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        rand_distr::Gamma::new(shape, scale)
            .expect("positive shape and scale")
            .sample(&mut self.0)
    }

    /// Normal(mean, sd) variate
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        rand_distr::Normal::new(mean, sd)
            .expect("finite mean and sd")
            .sample(&mut self.0)
    }
}

use serde::Deserialize;
use serde::Serialize;

/// running aggregate over a stream of samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistic {
    count: f64,
    sum: f64,
    sum_squared: f64,
    min: f64,
    max: f64,
}

impl Default for Statistic {
    fn default() -> Self {
        Self {
            count: 0.,
            sum: 0.,
            sum_squared: 0.,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Statistic {
    pub fn add(&mut self, sample: f64) {
        self.count += 1.;
        self.sum += sample;
        self.sum_squared += sample * sample;
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
    }
    pub fn count(&self) -> f64 {
        self.count
    }
    pub fn total(&self) -> f64 {
        self.sum
    }
    pub fn mean(&self) -> f64 {
        if self.count == 0. {
            0.
        } else {
            self.sum / self.count
        }
    }
    pub fn std(&self) -> f64 {
        if self.count == 0. {
            return 0.;
        }
        let mean = self.mean();
        (self.sum_squared / self.count - mean * mean).max(0.).sqrt()
    }
    pub fn std_err(&self) -> f64 {
        if self.count == 0. {
            0.
        } else {
            self.std() / self.count.sqrt()
        }
    }
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} +- {:.3}", self.mean(), self.std_err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_track_the_stream() {
        let mut statistic = Statistic::default();
        for sample in [1., 2., 3., 4.] {
            statistic.add(sample);
        }
        assert!(statistic.count() == 4.);
        assert!(statistic.total() == 10.);
        assert!(statistic.mean() == 2.5);
        assert!((statistic.std() - 1.25f64.sqrt()).abs() < 1e-12);
        assert!((statistic.std_err() - 1.25f64.sqrt() / 2.).abs() < 1e-12);
    }

    #[test]
    fn clear_resets_everything() {
        let mut statistic = Statistic::default();
        statistic.add(9.);
        statistic.clear();
        assert!(statistic.count() == 0.);
        assert!(statistic.mean() == 0.);
        assert!(statistic.std() == 0.);
    }
}

use super::rng::Rng;

/// particle representation of the belief over hidden state.
/// particles are owned concrete states; sampling clones one out
/// so the simulation can mutate it freely.
pub struct Beliefs<State>(Vec<State>);

impl<State: Clone> Beliefs<State> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn add(&mut self, state: State) {
        self.0.push(state);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// clone a uniformly random particle
    pub fn sample(&self, rng: &mut Rng) -> State {
        assert!(!self.0.is_empty());
        self.0[rng.index(self.0.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_covers_particles() {
        let mut beliefs = Beliefs::empty();
        beliefs.add(0usize);
        beliefs.add(1usize);
        let mut rng = Rng::seeded(5);
        let mut seen = [false; 2];
        for _ in 0..64 {
            seen[beliefs.sample(&mut rng)] = true;
        }
        assert!(seen[0] && seen[1]);
        assert!(beliefs.len() == 2);
    }
}

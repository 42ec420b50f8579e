/// knobs visible to the planners. the experiment harness owns
/// the outer schedule (runs, doubling sweeps, timeouts) and
/// rewrites `num_simulations` / `num_start_states` between runs.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// maximum trajectory length per simulation
    pub max_depth: usize,
    /// simulated trajectories per planning call
    pub num_simulations: usize,
    /// particles seeded into the root belief
    pub num_start_states: usize,
    /// replenishment budget when advancing the belief
    pub max_attempts: usize,
    /// UCB exploration constant for the root decision; the
    /// harness overwrites it with the reward range when
    /// auto-exploration is on
    pub exploration_constant: f64,
    /// beta prior of the Normal-Gamma posterior
    pub bandit_beta_prior: f64,
    /// convergence-window length of each arm (depth-sequenced
    /// planner only)
    pub bandit_arm_capacity: usize,
    /// mean-drift threshold below which an arm counts as
    /// converged (depth-sequenced planner only)
    pub bandit_convergence_epsilon: f64,
    /// root seed for the whole planning episode
    pub seed: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 100,
            num_simulations: 1000,
            num_start_states: 1000,
            max_attempts: 16000,
            exploration_constant: 1.,
            bandit_beta_prior: 1.,
            bandit_arm_capacity: 30,
            bandit_convergence_epsilon: 0.1,
            seed: 1,
        }
    }
}

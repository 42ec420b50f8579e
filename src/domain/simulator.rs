use crate::Discount;
use crate::Reward;
use crate::search::history::History;
use crate::search::rng::Rng;
use crate::search::status::Status;

/// what the planners consume from a problem domain. states are
/// plain owned values: the planner clones particles out of the
/// belief, mutates them through `step`, and drops them when the
/// simulated trajectory ends.
pub trait Simulator {
    type State: Clone;

    fn num_actions(&self) -> usize;
    fn num_observations(&self) -> usize;
    /// discount factor in (0, 1]
    fn discount(&self) -> Discount;
    /// spread between the best and worst single-step reward
    fn reward_range(&self) -> Reward;

    /// fill `legal` with the actions available in `state`. the
    /// set must never be empty. `follow_on` distinguishes
    /// mid-trajectory queries from root-level ones, for domains
    /// whose knowledge level depends on it.
    fn generate_actions(
        &self,
        state: &Self::State,
        history: &History,
        status: &Status,
        follow_on: bool,
        legal: &mut Vec<usize>,
    );

    /// advance the state, returning (observation, reward,
    /// terminal)
    fn step(&self, state: &mut Self::State, action: usize, rng: &mut Rng) -> (usize, Reward, bool);

    /// sample from the initial state distribution
    fn create_start_state(&self, rng: &mut Rng) -> Self::State;

    /// fallback policy once the planner is out of particles
    fn select_random(
        &self,
        state: &Self::State,
        history: &History,
        status: &Status,
        rng: &mut Rng,
    ) -> usize {
        let mut legal = Vec::new();
        self.generate_actions(state, history, status, true, &mut legal);
        assert!(!legal.is_empty());
        legal[rng.index(legal.len())]
    }

    /// debug-time state invariant hook
    fn validate(&self, _state: &Self::State) {}

    /// steps until discounting shrinks any reward below
    /// `accuracy`, capped
    fn horizon(&self, accuracy: f64, cap: usize) -> usize {
        let gamma = self.discount();
        if gamma >= 1. {
            return cap;
        }
        cap.min((accuracy.ln() / gamma.ln()) as usize)
    }
}

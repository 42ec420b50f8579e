use super::history::History;
use super::mcts::Mcts;
use super::params::SearchParams;
use super::planner::Planner;
use super::status::Status;
use crate::Reward;
use crate::bandit::bandit::Bandit;
use crate::bandit::thompson::Thompson;
use crate::domain::simulator::Simulator;

/// flat sampling tree search: one Thompson bandit per search
/// depth, shared across every simulated trajectory of a
/// planning call. `current_index` rotates which bandit owns
/// depth zero; the episode loop advances it between real steps,
/// never the planner itself.
pub struct Posts<S: Simulator> {
    mcts: Mcts<S>,
    bandits: Vec<Thompson>,
    current_index: usize,
}

impl<S: Simulator> Posts<S> {
    pub fn new(simulator: S, params: SearchParams) -> Self {
        let mut mcts = Mcts::new(simulator, params);
        let number_of_actions = mcts.simulator().num_actions();
        let beta0 = mcts.params.bandit_beta_prior;
        let depth = mcts.params.max_depth;
        let bandits = (0..depth)
            .map(|_| Thompson::new(number_of_actions, 0, 1, beta0, mcts.rng().fork()))
            .collect();
        Self {
            mcts,
            bandits,
            current_index: 0,
        }
    }

    pub fn mcts(&self) -> &Mcts<S> {
        &self.mcts
    }

    fn reset(&mut self) {
        for bandit in self.bandits.iter_mut() {
            bandit.reset();
        }
    }

    /// outer loop: one trajectory per simulation, credited to
    /// the depth-zero bandit and the root's action child
    fn rollout(&mut self) {
        let history_depth = self.mcts.history.len();
        let mut legal = Vec::new();
        assert!(!self.mcts.root().beliefs.is_empty());
        for _ in 0..self.mcts.params.num_simulations {
            let mut state = self.mcts.sample_particle();
            self.mcts.generate_actions(&state, false, &mut legal);
            let bandit_index = self.current_index % self.mcts.params.max_depth;
            let action = self.bandits[bandit_index].sample_from(&legal);
            self.mcts.simulator().validate(&state);
            let (observation, immediate, terminal) = self.mcts.step(&mut state, action);
            if !terminal && self.mcts.root().child(action).child(observation).is_none() {
                let mut vnode = self.mcts.expand_node();
                vnode.beliefs.add(state.clone());
                self.mcts.root_mut().child_mut(action).set_child(observation, vnode);
            }
            self.mcts.history.add(action, observation);
            let delayed = match terminal {
                true => 0.,
                false => self.rollout_from(&mut state, &mut legal, 1),
            };
            let total = immediate + self.mcts.simulator().discount() * delayed;
            self.mcts.root_mut().child_mut(action).value.add(total);
            self.bandits[bandit_index].update(total);
            self.mcts.history.truncate(history_depth);
        }
    }

    /// inner recursion at depth `t`: the depth-t bandit picks
    /// from the regenerated legal set, the domain steps, and the
    /// discounted return is credited on the way back up
    fn rollout_from(&mut self, state: &mut S::State, legal: &mut Vec<usize>, t: usize) -> Reward {
        if t >= self.mcts.params.max_depth {
            return 0.;
        }
        let bandit_index = (self.current_index + t) % self.mcts.params.max_depth;
        self.mcts.generate_actions(state, true, legal);
        let action = self.bandits[bandit_index].sample_from(legal);
        let (observation, immediate, terminal) = self.mcts.step(state, action);
        self.mcts.history.add(action, observation);
        if terminal {
            self.bandits[bandit_index].update(immediate);
            return immediate;
        }
        let successor = self.rollout_from(state, legal, t + 1);
        let total = immediate + self.mcts.simulator().discount() * successor;
        self.bandits[bandit_index].update(total);
        total
    }
}

impl<S: Simulator> Planner for Posts<S> {
    fn select_action(&mut self) -> usize {
        self.reset();
        self.rollout();
        let action = self.mcts.greedy_ucb(false);
        log::trace!("posts selected {}", action);
        action
    }
    fn update(&mut self, action: usize, observation: usize) -> bool {
        self.mcts.update(action, observation)
    }
    fn advance(&mut self) {
        self.current_index += 1;
    }
    fn history(&self) -> &History {
        &self.mcts.history
    }
    fn status(&self) -> &Status {
        &self.mcts.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rocksample::RockSample;
    use crate::domain::tiger::Tiger;

    fn tiger_params() -> SearchParams {
        SearchParams {
            max_depth: 4,
            num_simulations: 32,
            num_start_states: 32,
            max_attempts: 512,
            seed: 40,
            ..SearchParams::default()
        }
    }

    #[test]
    fn planning_leaves_no_trace_in_the_history() {
        let mut planner = Posts::new(Tiger, tiger_params());
        assert!(planner.update(0, 0));
        let depth = planner.history().len();
        let index = planner.current_index;
        let action = planner.select_action();
        assert!(action < 3);
        assert!(planner.history().len() == depth);
        assert!(planner.current_index == index);
    }

    #[test]
    fn advance_rotates_the_depth_zero_bandit() {
        let mut planner = Posts::new(Tiger, tiger_params());
        planner.advance();
        planner.advance();
        assert!(planner.current_index == 2);
    }

    #[test]
    fn rocksample_decision_is_reproducible_under_one_seed() {
        let params = SearchParams {
            max_depth: 10,
            num_simulations: 64,
            num_start_states: 64,
            max_attempts: 1024,
            bandit_beta_prior: 1.,
            seed: 1,
            ..SearchParams::default()
        };
        let mut first = Posts::new(RockSample::new(7, 8), params.clone());
        let mut second = Posts::new(RockSample::new(7, 8), params);
        let a = first.select_action();
        let b = second.select_action();
        assert!(a < 13);
        assert!(a == b);
    }
}

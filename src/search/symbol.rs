use super::history::History;
use super::mcts::Mcts;
use super::params::SearchParams;
use super::planner::Planner;
use super::status::Status;
use crate::Reward;
use crate::bandit::bandit::Bandit;
use crate::bandit::thompson::Thompson;
use crate::domain::simulator::Simulator;

/// depth-sequenced planner. every depth owns a Thompson bandit
/// with a convergence window; a bandit only starts receiving
/// credit once every shallower bandit has empirically settled,
/// so the effective planning horizon grows with the evidence.
pub struct Symbol<S: Simulator> {
    mcts: Mcts<S>,
    bandits: Vec<Thompson>,
    rewards: Vec<Reward>,
    convergence_epsilon: f64,
    max_number_of_bandits: usize,
}

impl<S: Simulator> Symbol<S> {
    pub fn new(simulator: S, params: SearchParams) -> Self {
        let mut mcts = Mcts::new(simulator, params);
        let number_of_actions = mcts.simulator().num_actions();
        let beta0 = mcts.params.bandit_beta_prior;
        let capacity = mcts.params.bandit_arm_capacity;
        let epsilon = mcts.params.bandit_convergence_epsilon;
        let depth = mcts.params.max_depth;
        let bandits = (0..depth)
            .map(|_| Thompson::new(number_of_actions, capacity, 1, beta0, mcts.rng().fork()))
            .collect();
        Self {
            mcts,
            bandits,
            rewards: vec![0.; depth],
            convergence_epsilon: epsilon,
            max_number_of_bandits: 0,
        }
    }

    pub fn mcts(&self) -> &Mcts<S> {
        &self.mcts
    }

    /// deepest credit front reached by any single trajectory of
    /// the last planning call
    pub fn max_number_of_bandits(&self) -> usize {
        self.max_number_of_bandits
    }

    fn reset(&mut self) {
        for bandit in self.bandits.iter_mut() {
            bandit.reset();
        }
        for reward in self.rewards.iter_mut() {
            *reward = 0.;
        }
        self.max_number_of_bandits = 0;
    }

    fn rollout(&mut self) {
        let history_depth = self.mcts.history.len();
        let mut legal = Vec::new();
        assert!(!self.mcts.root().beliefs.is_empty());
        for _ in 0..self.mcts.params.num_simulations {
            let mut state = self.mcts.sample_particle();
            self.mcts.generate_actions(&state, false, &mut legal);
            let first_action = self.bandits[0].sample_from(&legal);
            self.mcts.simulator().validate(&state);
            let (observation, immediate, mut terminal) = self.mcts.step(&mut state, first_action);
            if !terminal && self.mcts.root().child(first_action).child(observation).is_none() {
                let mut vnode = self.mcts.expand_node();
                vnode.beliefs.add(state.clone());
                self.mcts
                    .root_mut()
                    .child_mut(first_action)
                    .set_child(observation, vnode);
            }
            self.mcts.history.add(first_action, observation);
            self.rewards[0] = immediate;
            let mut step_count = 1;
            for t in 1..self.mcts.params.max_depth {
                if terminal {
                    break;
                }
                self.mcts.generate_actions(&state, true, &mut legal);
                let action = self.bandits[t].sample_from(&legal);
                let (observation, immediate, now_terminal) = self.mcts.step(&mut state, action);
                terminal = now_terminal;
                self.mcts.history.add(action, observation);
                self.rewards[step_count] = immediate;
                step_count += 1;
            }
            // fold the discounted suffix returns in from the tail
            let discount = self.mcts.simulator().discount();
            let mut running = 0.;
            for t in (0..step_count).rev() {
                running = self.rewards[t] + discount * running;
                self.rewards[t] = running;
            }
            self.mcts
                .root_mut()
                .child_mut(first_action)
                .value
                .add(self.rewards[0]);
            self.credit(step_count);
            self.mcts.history.truncate(history_depth);
        }
    }

    /// convergence-gated credit propagation: depth zero is
    /// always paid; each deeper bandit is paid only while every
    /// shallower one has converged, stopping at the first that
    /// has not.
    fn credit(&mut self, step_count: usize) -> usize {
        self.bandits[0].update(self.rewards[0]);
        let mut converged = self.bandits[0].has_converged(self.convergence_epsilon);
        let mut number_of_bandits = 1;
        for t in 1..step_count {
            if !converged {
                break;
            }
            self.bandits[t].update(self.rewards[t]);
            number_of_bandits += 1;
            converged = self.bandits[t].has_converged(self.convergence_epsilon);
        }
        self.max_number_of_bandits = self.max_number_of_bandits.max(number_of_bandits);
        number_of_bandits
    }
}

impl<S: Simulator> Planner for Symbol<S> {
    fn select_action(&mut self) -> usize {
        self.reset();
        self.rollout();
        let action = self.mcts.greedy_ucb(false);
        log::trace!(
            "symbol selected {} crediting {} bandits deep",
            action,
            self.max_number_of_bandits
        );
        action
    }
    fn update(&mut self, action: usize, observation: usize) -> bool {
        self.mcts.update(action, observation)
    }
    fn history(&self) -> &History {
        &self.mcts.history
    }
    fn status(&self) -> &Status {
        &self.mcts.status
    }
}

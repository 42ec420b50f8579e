use super::belief::Beliefs;
use super::history::History;
use super::node::Vnode;
use super::params::SearchParams;
use super::rng::Rng;
use super::status::Phase;
use super::status::Status;
use crate::Reward;
use crate::domain::simulator::Simulator;
use crate::experiment::statistic::Statistic;

/// scaffolding shared by the planners: the root belief tree,
/// the episode history, the phase tag, and the random-policy
/// rollout fallback. planners compose one of these and drive
/// their own simulation loops through it.
pub struct Mcts<S: Simulator> {
    pub params: SearchParams,
    pub history: History,
    pub status: Status,
    pub tree_depth: usize,
    pub peak_tree_depth: usize,
    pub stat_total_reward: Statistic,
    pub stat_tree_depth: Statistic,
    simulator: S,
    root: Vnode<S::State>,
    rng: Rng,
}

impl<S: Simulator> Mcts<S> {
    pub fn new(simulator: S, params: SearchParams) -> Self {
        let mut rng = Rng::seeded(params.seed);
        let mut root = Vnode::new(simulator.num_actions(), simulator.num_observations());
        for _ in 0..params.num_start_states {
            root.beliefs.add(simulator.create_start_state(&mut rng));
        }
        Self {
            params,
            history: History::new(),
            status: Status::default(),
            tree_depth: 0,
            peak_tree_depth: 0,
            stat_total_reward: Statistic::default(),
            stat_tree_depth: Statistic::default(),
            simulator,
            root,
            rng,
        }
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }
    pub fn root(&self) -> &Vnode<S::State> {
        &self.root
    }
    pub fn root_mut(&mut self) -> &mut Vnode<S::State> {
        &mut self.root
    }
    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// clone one particle out of the root belief
    pub fn sample_particle(&mut self) -> S::State {
        self.root.beliefs.sample(&mut self.rng)
    }

    /// query the domain for the legal set at this state
    pub fn generate_actions(&self, state: &S::State, follow_on: bool, legal: &mut Vec<usize>) {
        self.simulator
            .generate_actions(state, &self.history, &self.status, follow_on, legal);
    }

    /// advance a simulated state through the domain
    pub fn step(&mut self, state: &mut S::State, action: usize) -> (usize, Reward, bool) {
        self.simulator.step(state, action, &mut self.rng)
    }

    /// fresh node for an unvisited (action, observation) branch
    pub fn expand_node(&self) -> Vnode<S::State> {
        Vnode::new(self.simulator.num_actions(), self.simulator.num_observations())
    }

    /// random-policy return estimate from `depth` to the horizon
    pub fn rollout(&mut self, state: &mut S::State, depth: usize) -> Reward {
        self.status.phase = Phase::Rollout;
        let mut total = 0.;
        let mut discount = 1.;
        for _ in depth..self.params.max_depth {
            let action =
                self.simulator
                    .select_random(state, &self.history, &self.status, &mut self.rng);
            let (observation, reward, terminal) =
                self.simulator.step(state, action, &mut self.rng);
            self.history.add(action, observation);
            total += discount * reward;
            discount *= self.simulator.discount();
            if terminal {
                break;
            }
        }
        self.status.phase = Phase::Tree;
        total
    }

    /// argmax over the root's action children, breaking exact
    /// ties uniformly at random. the exploration bonus is only
    /// for in-tree selection; the final decision runs with it
    /// disabled.
    pub fn greedy_ucb(&mut self, use_exploration: bool) -> usize {
        let total = self
            .root
            .children()
            .iter()
            .map(|qnode| qnode.value.count())
            .sum::<f64>();
        let log_total = (total + 1.).ln();
        let mut best = Reward::NEG_INFINITY;
        let mut candidates: Vec<usize> = Vec::new();
        for action in 0..self.simulator.num_actions() {
            let qnode = self.root.child(action);
            let mut score = qnode.value.mean();
            if use_exploration {
                score += match qnode.value.count() {
                    n if n == 0. => Reward::INFINITY,
                    n => self.params.exploration_constant * (log_total / n).sqrt(),
                };
            }
            if score >= best {
                if score > best {
                    candidates.clear();
                }
                best = score;
                candidates.push(action);
            }
        }
        assert!(!candidates.is_empty());
        candidates[self.rng.index(candidates.len())]
    }

    /// fold a real (action, observation) step into the belief:
    /// inherit the matching child's particles, replenish by
    /// replaying the action from the outgoing root, and promote
    /// the result to the new root. false means the belief could
    /// not be repopulated.
    pub fn update(&mut self, action: usize, observation: usize) -> bool {
        self.history.add(action, observation);
        let mut beliefs = match self.root.child_mut(action).take_child(observation) {
            Some(vnode) => vnode.beliefs,
            None => Beliefs::empty(),
        };
        let mut attempts = 0;
        while beliefs.len() < self.params.num_start_states && attempts < self.params.max_attempts {
            let mut state = self.root.beliefs.sample(&mut self.rng);
            let (simulated, _, terminal) = self.simulator.step(&mut state, action, &mut self.rng);
            if simulated == observation && !terminal {
                beliefs.add(state);
            }
            attempts += 1;
        }
        if beliefs.is_empty() {
            log::debug!("belief exhausted after {} attempts", attempts);
            return false;
        }
        let mut root = self.expand_node();
        root.beliefs = beliefs;
        self.root = root;
        true
    }
}

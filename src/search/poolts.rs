use super::history::History;
use super::mcts::Mcts;
use super::params::SearchParams;
use super::planner::Planner;
use super::status::Phase;
use super::status::Status;
use crate::Reward;
use crate::bandit::bandit::Bandit;
use crate::bandit::thompson::Thompson;
use crate::domain::simulator::Simulator;
use crate::search::rng::Rng;
use std::collections::VecDeque;

/// search-tree node owning its own bandit and children. nodes
/// are recycled by value through the free-list pool, so steady
/// state planning allocates nothing.
pub struct PooltsNode {
    bandit: Thompson,
    children: Vec<Option<Box<PooltsNode>>>,
    is_leaf: bool,
}

impl PooltsNode {
    fn new(number_of_actions: usize, beta0: f64, rng: Rng) -> Self {
        Self {
            bandit: Thompson::new(number_of_actions, 0, 1, beta0, rng),
            children: Vec::new(),
            is_leaf: true,
        }
    }

    /// exploit-only decision over this node's bandit
    fn select_action(&mut self) -> usize {
        self.bandit.play()
    }

    fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// reserve child slots and leave leaf status behind
    fn expand(&mut self, number_of_actions: usize) {
        if self.children.is_empty() {
            for _ in 0..number_of_actions {
                self.children.push(None);
            }
        }
        self.is_leaf = false;
    }

    fn update(&mut self, reward: Reward) {
        self.bandit.update(reward);
    }

    /// lazily attach the child under `action`, recycling a
    /// pooled node before allocating a fresh one
    fn descend(
        &mut self,
        action: usize,
        pool: &mut VecDeque<PooltsNode>,
        number_of_actions: usize,
        beta0: f64,
        rng: &mut Rng,
    ) -> &mut PooltsNode {
        if self.children[action].is_none() {
            let node = pool
                .pop_front()
                .unwrap_or_else(|| PooltsNode::new(number_of_actions, beta0, rng.fork()));
            self.children[action] = Some(Box::new(node));
        }
        self.children[action].as_mut().expect("just attached")
    }

    fn reset(&mut self) {
        self.is_leaf = true;
        self.bandit.reset();
    }

    /// push every descendant to the pool and reset in place.
    /// afterwards this node is a bare leaf and nothing pooled is
    /// reachable from it.
    fn save_to_pool(&mut self, pool: &mut VecDeque<PooltsNode>) {
        for child in self.children.drain(..).flatten() {
            let mut child = *child;
            child.save_to_pool(pool);
            pool.push_back(child);
        }
        self.reset();
    }
}

/// pooled-node tree search: every tree node owns its own
/// Thompson bandit; subtrees are recycled between planning
/// calls instead of freed.
pub struct Poolts<S: Simulator> {
    mcts: Mcts<S>,
    root_node: PooltsNode,
    pool: VecDeque<PooltsNode>,
}

impl<S: Simulator> Poolts<S> {
    pub fn new(simulator: S, params: SearchParams) -> Self {
        let mut mcts = Mcts::new(simulator, params);
        let number_of_actions = mcts.simulator().num_actions();
        let beta0 = mcts.params.bandit_beta_prior;
        let root_node = PooltsNode::new(number_of_actions, beta0, mcts.rng().fork());
        Self {
            mcts,
            root_node,
            pool: VecDeque::new(),
        }
    }

    pub fn mcts(&self) -> &Mcts<S> {
        &self.mcts
    }

    fn tree_search(&mut self) {
        let history_depth = self.mcts.history.len();
        for _ in 0..self.mcts.params.num_simulations {
            let mut state = self.mcts.sample_particle();
            self.mcts.simulator().validate(&state);
            self.mcts.status.phase = Phase::Tree;
            self.mcts.tree_depth = 0;
            self.mcts.peak_tree_depth = 0;
            let total = Self::simulate(
                &mut self.mcts,
                &mut self.pool,
                &mut self.root_node,
                &mut state,
                0,
            );
            let peak = self.mcts.peak_tree_depth;
            self.mcts.stat_total_reward.add(total);
            self.mcts.stat_tree_depth.add(peak as f64);
            self.mcts.history.truncate(history_depth);
        }
    }

    /// walk the bandit tree until a leaf, then fall back to the
    /// base random rollout for the tail of the trajectory
    fn simulate(
        mcts: &mut Mcts<S>,
        pool: &mut VecDeque<PooltsNode>,
        node: &mut PooltsNode,
        state: &mut S::State,
        t: usize,
    ) -> Reward {
        let mut legal = Vec::new();
        mcts.generate_actions(state, false, &mut legal);
        let action = node.bandit.sample_from(&legal);
        mcts.peak_tree_depth = mcts.tree_depth;
        if t >= mcts.params.max_depth {
            return 0.;
        }
        let was_leaf = node.is_leaf();
        if was_leaf {
            node.expand(mcts.simulator().num_actions());
        }
        let (observation, immediate, terminal) = mcts.step(state, action);
        if t == 0 && !terminal && mcts.root().child(action).child(observation).is_none() {
            let mut vnode = mcts.expand_node();
            vnode.beliefs.add(state.clone());
            mcts.root_mut().child_mut(action).set_child(observation, vnode);
        }
        mcts.history.add(action, observation);
        if terminal {
            node.update(immediate);
            return immediate;
        }
        assert!(observation < mcts.simulator().num_observations());
        mcts.tree_depth += 1;
        let delayed = if was_leaf {
            mcts.rollout(state, t + 1)
        } else {
            let number_of_actions = mcts.simulator().num_actions();
            let beta0 = mcts.params.bandit_beta_prior;
            let child = node.descend(action, pool, number_of_actions, beta0, mcts.rng());
            Self::simulate(mcts, pool, child, state, t + 1)
        };
        mcts.tree_depth -= 1;
        let total = immediate + mcts.simulator().discount() * delayed;
        node.update(total);
        total
    }
}

impl<S: Simulator> Planner for Poolts<S> {
    fn select_action(&mut self) -> usize {
        self.tree_search();
        let action = self.root_node.select_action();
        self.root_node.save_to_pool(&mut self.pool);
        log::trace!("poolts selected {} with pool size {}", action, self.pool.len());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tiger::Tiger;

    fn planner() -> Poolts<Tiger> {
        let params = SearchParams {
            max_depth: 3,
            num_simulations: 24,
            num_start_states: 32,
            max_attempts: 512,
            seed: 50,
            ..SearchParams::default()
        };
        Poolts::new(Tiger, params)
    }

    fn assert_pooled_invariants(pool: &VecDeque<PooltsNode>) {
        for node in pool.iter() {
            assert!(node.is_leaf());
            assert!(node.children.is_empty());
            for arm in 0..node.bandit.arms().len() {
                assert!(node.bandit.arms().arm(arm).size() == 0);
            }
        }
    }

    #[test]
    fn planning_resets_the_live_tree_to_one_leaf() {
        let mut poolts = planner();
        let action = poolts.select_action();
        assert!(action < 3);
        assert!(poolts.root_node.is_leaf());
        assert!(poolts.root_node.children.is_empty());
        assert_pooled_invariants(&poolts.pool);
    }

    #[test]
    fn pool_tracks_the_historical_peak_tree() {
        let mut poolts = planner();
        let mut peak = 0;
        for _ in 0..3 {
            poolts.select_action();
            // live tree is exactly the reset root after each call
            let live_and_pooled = 1 + poolts.pool.len();
            assert!(live_and_pooled >= peak);
            peak = live_and_pooled;
            assert_pooled_invariants(&poolts.pool);
        }
        assert!(peak > 1);
    }

    #[test]
    fn planning_leaves_no_trace_in_the_history() {
        let mut poolts = planner();
        assert!(poolts.update(0, 1));
        let depth = poolts.history().len();
        poolts.select_action();
        assert!(poolts.history().len() == depth);
    }
}

use super::belief::Beliefs;
use crate::Reward;

/// running value estimate at a tree node
#[derive(Debug, Clone, Copy, Default)]
pub struct Value {
    count: f64,
    total: Reward,
}

impl Value {
    pub fn add(&mut self, reward: Reward) {
        self.count += 1.;
        self.total += reward;
    }
    pub fn count(&self) -> f64 {
        self.count
    }
    pub fn mean(&self) -> Reward {
        if self.count == 0. {
            0.
        } else {
            self.total / self.count
        }
    }
}

/// per-action child of a belief node: the aggregated return for
/// taking this action at the parent, and the per-observation
/// successor lattice
pub struct Qnode<State> {
    pub value: Value,
    children: Vec<Option<Box<Vnode<State>>>>,
}

impl<State: Clone> Qnode<State> {
    fn new(num_observations: usize) -> Self {
        Self {
            value: Value::default(),
            children: (0..num_observations).map(|_| None).collect(),
        }
    }
    pub fn child(&self, observation: usize) -> Option<&Vnode<State>> {
        self.children[observation].as_deref()
    }
    pub fn set_child(&mut self, observation: usize, node: Vnode<State>) {
        assert!(self.children[observation].is_none());
        self.children[observation] = Some(Box::new(node));
    }
    pub fn take_child(&mut self, observation: usize) -> Option<Vnode<State>> {
        self.children[observation].take().map(|node| *node)
    }
}

/// belief-state node. the root Vnode carries the particle
/// belief the planners sample start states from; children are
/// indexed by (action, observation) pairs.
pub struct Vnode<State> {
    pub beliefs: Beliefs<State>,
    children: Vec<Qnode<State>>,
}

impl<State: Clone> Vnode<State> {
    pub fn new(num_actions: usize, num_observations: usize) -> Self {
        Self {
            beliefs: Beliefs::empty(),
            children: (0..num_actions).map(|_| Qnode::new(num_observations)).collect(),
        }
    }
    pub fn child(&self, action: usize) -> &Qnode<State> {
        &self.children[action]
    }
    pub fn child_mut(&mut self, action: usize) -> &mut Qnode<State> {
        &mut self.children[action]
    }
    pub fn children(&self) -> &[Qnode<State>] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_tracks_mean() {
        let mut value = Value::default();
        assert!(value.mean() == 0.);
        value.add(2.);
        value.add(4.);
        assert!(value.count() == 2.);
        assert!(value.mean() == 3.);
    }

    #[test]
    fn observation_children_start_unset() {
        let mut vnode = Vnode::<usize>::new(3, 2);
        assert!(vnode.child(0).child(1).is_none());
        let child = Vnode::<usize>::new(3, 2);
        vnode.child_mut(0).set_child(1, child);
        assert!(vnode.child(0).child(1).is_some());
        assert!(vnode.child_mut(0).take_child(1).is_some());
        assert!(vnode.child(0).child(1).is_none());
    }
}

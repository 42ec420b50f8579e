/// one (action, observation) step of the episode record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub action: usize,
    pub observation: usize,
}

/// append-only record of real and simulated steps. every
/// simulation notes its entry depth and truncates back to it on
/// exit, whichever way the trajectory ended.
#[derive(Debug, Clone, Default)]
pub struct History(Vec<Entry>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, action: usize, observation: usize) {
        self.0.push(Entry {
            action,
            observation,
        });
    }
    pub fn truncate(&mut self, depth: usize) {
        self.0.truncate(depth);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn back(&self) -> Option<&Entry> {
        self.0.last()
    }
}

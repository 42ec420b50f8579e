/// which phase of a simulated trajectory we are in. domains can
/// condition their action-space knowledge on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Tree,
    Rollout,
}

/// search phase tag handed to the domain on every query
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub phase: Phase,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            phase: Phase::Tree,
        }
    }
}

use super::simulator::Simulator;
use crate::Discount;
use crate::Reward;
use crate::search::history::History;
use crate::search::rng::Rng;
use crate::search::status::Status;

pub const LISTEN: usize = 0;
pub const OPEN_LEFT: usize = 1;
pub const OPEN_RIGHT: usize = 2;

pub const HEAR_LEFT: usize = 0;
pub const HEAR_RIGHT: usize = 1;

/// the two-door listening problem. tiny state space, noisy
/// observations, and unbounded episodes unless a door is
/// opened, which makes it a convenient exercise rig for the
/// planners.
#[derive(Debug, Clone, Default)]
pub struct Tiger;

/// where the tiger is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TigerState {
    Left,
    Right,
}

impl Simulator for Tiger {
    type State = TigerState;

    fn num_actions(&self) -> usize {
        3
    }
    fn num_observations(&self) -> usize {
        2
    }
    fn discount(&self) -> Discount {
        0.95
    }
    fn reward_range(&self) -> Reward {
        110.
    }

    fn generate_actions(
        &self,
        _state: &Self::State,
        _history: &History,
        _status: &Status,
        _follow_on: bool,
        legal: &mut Vec<usize>,
    ) {
        legal.clear();
        legal.extend([LISTEN, OPEN_LEFT, OPEN_RIGHT]);
    }

    fn step(&self, state: &mut Self::State, action: usize, rng: &mut Rng) -> (usize, Reward, bool) {
        let tiger = *state;
        match action {
            LISTEN => {
                let truthful = rng.unit() < 0.85;
                let heard = match (tiger, truthful) {
                    (TigerState::Left, true) | (TigerState::Right, false) => HEAR_LEFT,
                    _ => HEAR_RIGHT,
                };
                (heard, -1., false)
            }
            OPEN_LEFT => {
                let reward = if tiger == TigerState::Left { -100. } else { 10. };
                (HEAR_LEFT, reward, true)
            }
            OPEN_RIGHT => {
                let reward = if tiger == TigerState::Right { -100. } else { 10. };
                (HEAR_LEFT, reward, true)
            }
            _ => panic!("unknown action"),
        }
    }

    fn create_start_state(&self, rng: &mut Rng) -> Self::State {
        if rng.unit() < 0.5 {
            TigerState::Left
        } else {
            TigerState::Right
        }
    }
}

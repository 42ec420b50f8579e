use super::simulator::Simulator;
use crate::Discount;
use crate::Reward;
use crate::search::history::History;
use crate::search::rng::Rng;
use crate::search::status::Status;

pub const NORTH: usize = 0;
pub const EAST: usize = 1;
pub const SOUTH: usize = 2;
pub const WEST: usize = 3;
pub const SAMPLE: usize = 4;

pub const OBS_NONE: usize = 0;
pub const OBS_GOOD: usize = 1;
pub const OBS_BAD: usize = 2;

/// coordinates on the square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    fn distance(self, other: Coord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// per-rock bookkeeping: whether it pays to sample it (hidden)
/// and whether it has been sampled already (observed)
#[derive(Debug, Clone)]
pub struct RockEntry {
    pub valuable: bool,
    pub collected: bool,
}

#[derive(Debug, Clone)]
pub struct RockSampleState {
    pub agent: Coord,
    pub rocks: Vec<RockEntry>,
}

/// the classic grid-exploration benchmark: roam an n-by-n grid,
/// probe rocks with a range-degraded sensor, sample the good
/// ones, exit east for the terminal bonus. rock quality is the
/// hidden state; everything else is observable.
#[derive(Debug, Clone)]
pub struct RockSample {
    size: i32,
    rocks: Vec<Coord>,
    start: Coord,
    half_efficiency_distance: f64,
}

impl RockSample {
    pub fn new(size: i32, number_of_rocks: usize) -> Self {
        let rocks = match (size, number_of_rocks) {
            (7, 8) => vec![
                Coord { x: 2, y: 0 },
                Coord { x: 0, y: 1 },
                Coord { x: 3, y: 1 },
                Coord { x: 6, y: 3 },
                Coord { x: 2, y: 4 },
                Coord { x: 3, y: 4 },
                Coord { x: 5, y: 5 },
                Coord { x: 1, y: 6 },
            ],
            (11, 11) => vec![
                Coord { x: 0, y: 3 },
                Coord { x: 0, y: 7 },
                Coord { x: 1, y: 8 },
                Coord { x: 2, y: 4 },
                Coord { x: 3, y: 3 },
                Coord { x: 3, y: 8 },
                Coord { x: 4, y: 3 },
                Coord { x: 5, y: 8 },
                Coord { x: 6, y: 1 },
                Coord { x: 9, y: 3 },
                Coord { x: 9, y: 9 },
            ],
            _ => panic!("no canonical layout for this size"),
        };
        Self {
            size,
            rocks,
            start: Coord {
                x: 0,
                y: size / 2,
            },
            half_efficiency_distance: 20.,
        }
    }

    pub fn num_rocks(&self) -> usize {
        self.rocks.len()
    }

    fn rock_at(&self, position: Coord) -> Option<usize> {
        self.rocks.iter().position(|&rock| rock == position)
    }

    /// probability that the sensor reads the rock correctly,
    /// decaying with distance toward a coin flip
    fn efficiency(&self, agent: Coord, rock: usize) -> f64 {
        let distance = agent.distance(self.rocks[rock]);
        (1. + (2f64).powf(-distance / self.half_efficiency_distance)) * 0.5
    }
}

impl Simulator for RockSample {
    type State = RockSampleState;

    fn num_actions(&self) -> usize {
        self.rocks.len() + 5
    }
    fn num_observations(&self) -> usize {
        3
    }
    fn discount(&self) -> Discount {
        0.95
    }
    fn reward_range(&self) -> Reward {
        20.
    }

    fn generate_actions(
        &self,
        state: &Self::State,
        _history: &History,
        _status: &Status,
        _follow_on: bool,
        legal: &mut Vec<usize>,
    ) {
        legal.clear();
        if state.agent.y + 1 < self.size {
            legal.push(NORTH);
        }
        // east is always legal: the edge is the exit
        legal.push(EAST);
        if state.agent.y > 0 {
            legal.push(SOUTH);
        }
        if state.agent.x > 0 {
            legal.push(WEST);
        }
        if let Some(rock) = self.rock_at(state.agent) {
            if !state.rocks[rock].collected {
                legal.push(SAMPLE);
            }
        }
        for rock in 0..self.rocks.len() {
            if !state.rocks[rock].collected {
                legal.push(SAMPLE + 1 + rock);
            }
        }
    }

    fn step(&self, state: &mut Self::State, action: usize, rng: &mut Rng) -> (usize, Reward, bool) {
        match action {
            NORTH => {
                assert!(state.agent.y + 1 < self.size);
                state.agent.y += 1;
                (OBS_NONE, 0., false)
            }
            EAST => {
                if state.agent.x + 1 == self.size {
                    return (OBS_NONE, 10., true);
                }
                state.agent.x += 1;
                (OBS_NONE, 0., false)
            }
            SOUTH => {
                assert!(state.agent.y > 0);
                state.agent.y -= 1;
                (OBS_NONE, 0., false)
            }
            WEST => {
                assert!(state.agent.x > 0);
                state.agent.x -= 1;
                (OBS_NONE, 0., false)
            }
            SAMPLE => {
                let rock = self.rock_at(state.agent).expect("sampling on a rock");
                let entry = &mut state.rocks[rock];
                assert!(!entry.collected);
                entry.collected = true;
                let reward = if entry.valuable { 10. } else { -10. };
                (OBS_NONE, reward, false)
            }
            _ => {
                let rock = action - SAMPLE - 1;
                assert!(rock < self.rocks.len());
                let truthful = rng.unit() < self.efficiency(state.agent, rock);
                let good = state.rocks[rock].valuable == truthful;
                (if good { OBS_GOOD } else { OBS_BAD }, 0., false)
            }
        }
    }

    fn create_start_state(&self, rng: &mut Rng) -> Self::State {
        RockSampleState {
            agent: self.start,
            rocks: self
                .rocks
                .iter()
                .map(|_| RockEntry {
                    valuable: rng.unit() < 0.5,
                    collected: false,
                })
                .collect(),
        }
    }

    fn validate(&self, state: &Self::State) {
        assert!(state.agent.x >= 0 && state.agent.x < self.size);
        assert!(state.agent.y >= 0 && state.agent.y < self.size);
        assert!(state.rocks.len() == self.rocks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(problem: &RockSample) -> RockSampleState {
        let mut rng = Rng::seeded(20);
        problem.create_start_state(&mut rng)
    }

    #[test]
    fn action_space_counts() {
        let problem = RockSample::new(7, 8);
        assert!(problem.num_actions() == 13);
        assert!(problem.num_observations() == 3);
        assert!(problem.num_rocks() == 8);
    }

    #[test]
    fn exit_east_terminates_with_the_bonus() {
        let problem = RockSample::new(7, 8);
        let mut rng = Rng::seeded(21);
        let mut state = start(&problem);
        for _ in 0..6 {
            let (_, reward, terminal) = problem.step(&mut state, EAST, &mut rng);
            assert!(reward == 0. && !terminal);
        }
        let (_, reward, terminal) = problem.step(&mut state, EAST, &mut rng);
        assert!(reward == 10. && terminal);
    }

    #[test]
    fn west_is_illegal_on_the_starting_column() {
        let problem = RockSample::new(7, 8);
        let state = start(&problem);
        let mut legal = Vec::new();
        problem.generate_actions(&state, &History::new(), &Status::default(), false, &mut legal);
        assert!(!legal.contains(&WEST));
        assert!(legal.contains(&EAST));
        // all eight checks are available while no rock is collected
        assert!(legal.iter().filter(|&&a| a > SAMPLE).count() == 8);
    }

    #[test]
    fn sampling_pays_by_rock_quality() {
        let problem = RockSample::new(7, 8);
        let mut rng = Rng::seeded(22);
        let mut state = start(&problem);
        // rock 1 sits at (0, 1); walk down two cells from (0, 3)
        problem.step(&mut state, SOUTH, &mut rng);
        problem.step(&mut state, SOUTH, &mut rng);
        let valuable = state.rocks[1].valuable;
        let (_, reward, terminal) = problem.step(&mut state, SAMPLE, &mut rng);
        assert!(!terminal);
        assert!(reward == if valuable { 10. } else { -10. });
        assert!(state.rocks[1].collected);
        let mut legal = Vec::new();
        problem.generate_actions(&state, &History::new(), &Status::default(), false, &mut legal);
        assert!(!legal.contains(&SAMPLE));
    }

    #[test]
    fn checking_returns_a_quality_reading() {
        let problem = RockSample::new(7, 8);
        let mut rng = Rng::seeded(23);
        let mut state = start(&problem);
        for rock in 0..problem.num_rocks() {
            let (observation, reward, terminal) =
                problem.step(&mut state, SAMPLE + 1 + rock, &mut rng);
            assert!(observation == OBS_GOOD || observation == OBS_BAD);
            assert!(reward == 0. && !terminal);
        }
    }

    #[test]
    fn sensor_is_sharper_up_close() {
        let problem = RockSample::new(7, 8);
        let near = problem.efficiency(Coord { x: 2, y: 0 }, 0);
        let far = problem.efficiency(Coord { x: 6, y: 6 }, 0);
        assert!(near == 1.);
        assert!(far < near && far > 0.5);
    }

    #[test]
    fn horizon_follows_the_discount() {
        let problem = RockSample::new(7, 8);
        assert!(problem.horizon(0.01, 1000) == 89);
        assert!(problem.horizon(0.01, 10) == 10);
    }
}

use super::statistic::Statistic;
use crate::domain::simulator::Simulator;
use crate::search::params::SearchParams;
use crate::search::planner::Planner;
use crate::search::poolts::Poolts;
use crate::search::posts::Posts;
use crate::search::rng::Rng;
use crate::search::symbol::Symbol;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

/// which search variant drives the episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    Posts,
    Poolts,
    Symbol,
}

/// outer schedule knobs: how many episodes, how long, and how
/// the simulation budget doubles across the sweep
#[derive(Debug, Clone)]
pub struct ExperimentParams {
    pub num_runs: usize,
    pub num_steps: usize,
    pub sim_steps: usize,
    pub time_out: Duration,
    pub min_doubles: u32,
    pub max_doubles: u32,
    pub accuracy: f64,
    pub undiscounted_horizon: usize,
    pub auto_exploration: bool,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            num_runs: 100,
            num_steps: 100000,
            sim_steps: 1000,
            time_out: Duration::from_secs(12 * 3600),
            min_doubles: 1,
            max_doubles: 14,
            accuracy: 0.01,
            undiscounted_horizon: 1000,
            auto_exploration: true,
        }
    }
}

/// per-sweep aggregates
#[derive(Debug, Clone, Default)]
pub struct Results {
    pub reward: Statistic,
    pub time: Statistic,
    pub undiscounted_return: Statistic,
    pub discounted_return: Statistic,
}

impl Results {
    fn clear(&mut self) {
        self.reward.clear();
        self.time.clear();
        self.undiscounted_return.clear();
        self.discounted_return.clear();
    }
}

/// schedules planning episodes against the real environment and
/// aggregates returns across runs and simulation budgets
pub struct Experiment<S: Simulator + Clone> {
    real: S,
    method: Method,
    exp_params: ExperimentParams,
    search_params: SearchParams,
    results: Results,
    rng: Rng,
}

impl<S: Simulator + Clone + 'static> Experiment<S> {
    pub fn new(
        real: S,
        method: Method,
        exp_params: ExperimentParams,
        mut search_params: SearchParams,
    ) -> Self {
        if exp_params.auto_exploration {
            search_params.exploration_constant = real.reward_range();
        }
        let rng = Rng::seeded(search_params.seed);
        Self {
            real,
            method,
            exp_params,
            search_params,
            results: Results::default(),
            rng,
        }
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    fn planner(&mut self) -> Box<dyn Planner> {
        let mut params = self.search_params.clone();
        params.seed = self.rng.seed();
        match self.method {
            Method::Posts => Box::new(Posts::new(self.real.clone(), params)),
            Method::Poolts => Box::new(Poolts::new(self.real.clone(), params)),
            Method::Symbol => Box::new(Symbol::new(self.real.clone(), params)),
        }
    }

    /// one episode against the real environment
    pub fn run(&mut self) {
        let timer = Instant::now();
        let mut planner = self.planner();
        let mut undiscounted = 0.;
        let mut discounted = 0.;
        let mut discount = 1.;
        let mut out_of_particles = false;
        let mut state = self.real.create_start_state(&mut self.rng);
        let mut t = 0;
        while t < self.exp_params.num_steps {
            let action = planner.select_action();
            let (observation, reward, terminal) = self.real.step(&mut state, action, &mut self.rng);
            self.results.reward.add(reward);
            undiscounted += reward;
            discounted += reward * discount;
            discount *= self.real.discount();
            if terminal {
                log::debug!("terminated after {} steps", t + 1);
                break;
            }
            out_of_particles = !planner.update(action, observation);
            if out_of_particles {
                break;
            }
            planner.advance();
            if timer.elapsed() > self.exp_params.time_out {
                log::info!("timed out after {} steps", t + 1);
                break;
            }
            t += 1;
        }
        if out_of_particles {
            // finish the episode on the domain's random policy
            log::debug!("out of particles, finishing on the fallback policy");
            let mut history = planner.history().clone();
            loop {
                t += 1;
                if t >= self.exp_params.num_steps {
                    break;
                }
                let action =
                    self.real
                        .select_random(&state, &history, planner.status(), &mut self.rng);
                let (observation, reward, terminal) =
                    self.real.step(&mut state, action, &mut self.rng);
                self.results.reward.add(reward);
                undiscounted += reward;
                discounted += reward * discount;
                discount *= self.real.discount();
                if terminal {
                    break;
                }
                history.add(action, observation);
            }
        }
        self.results.time.add(timer.elapsed().as_secs_f64());
        self.results.undiscounted_return.add(undiscounted);
        self.results.discounted_return.add(discounted);
        log::info!(
            "discounted return = {:.3}, average = {:.3}",
            discounted,
            self.results.discounted_return.mean()
        );
    }

    /// repeat episodes until the run budget or the clock runs out
    pub fn multi_run(&mut self) {
        for n in 0..self.exp_params.num_runs {
            log::info!(
                "starting run {} with {} simulations",
                n + 1,
                self.search_params.num_simulations
            );
            self.run();
            if self.results.time.total() > self.exp_params.time_out.as_secs_f64() {
                log::info!("timed out after {} runs", n + 1);
                break;
            }
        }
    }

    /// sweep the simulation budget through the doubling range,
    /// appending one aggregate row per budget to the output file
    pub fn discounted_return(&mut self, output: &str) -> anyhow::Result<()> {
        let mut file = std::fs::File::create(output)?;
        writeln!(
            file,
            "Simulations\tRuns\tUndiscounted return\tUndiscounted error\tDiscounted return\tDiscounted error\tTime"
        )?;
        self.exp_params.sim_steps = self
            .real
            .horizon(self.exp_params.accuracy, self.exp_params.undiscounted_horizon);
        self.exp_params.num_steps = self.exp_params.sim_steps;
        for doubles in self.exp_params.min_doubles..=self.exp_params.max_doubles {
            self.search_params.num_simulations = 1 << doubles;
            self.search_params.num_start_states = 1 << doubles;
            self.search_params.max_attempts = 16 << doubles;
            self.results.clear();
            self.multi_run();
            log::info!(
                "simulations = {}, runs = {}, undiscounted = {}, discounted = {}, time = {:.1}s",
                self.search_params.num_simulations,
                self.results.time.count(),
                self.results.undiscounted_return,
                self.results.discounted_return,
                self.results.time.mean()
            );
            writeln!(
                file,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                self.search_params.num_simulations,
                self.results.time.count(),
                self.results.undiscounted_return.mean(),
                self.results.undiscounted_return.std_err(),
                self.results.discounted_return.mean(),
                self.results.discounted_return.std_err(),
                self.results.time.mean()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tiger::Tiger;

    fn tiny(method: Method) -> Experiment<Tiger> {
        let exp_params = ExperimentParams {
            num_runs: 2,
            num_steps: 5,
            min_doubles: 1,
            max_doubles: 2,
            ..ExperimentParams::default()
        };
        let search_params = SearchParams {
            max_depth: 3,
            num_simulations: 8,
            num_start_states: 16,
            max_attempts: 256,
            seed: 70,
            ..SearchParams::default()
        };
        Experiment::new(Tiger, method, exp_params, search_params)
    }

    #[test]
    fn auto_exploration_adopts_the_reward_range() {
        let experiment = tiny(Method::Posts);
        assert!(experiment.search_params.exploration_constant == 110.);
    }

    #[test]
    fn episodes_accumulate_results() {
        for method in [Method::Posts, Method::Poolts, Method::Symbol] {
            let mut experiment = tiny(method);
            experiment.run();
            assert!(experiment.results().reward.count() >= 1.);
            assert!(experiment.results().discounted_return.count() == 1.);
        }
    }

    #[test]
    fn multi_run_honors_the_run_budget() {
        let mut experiment = tiny(Method::Posts);
        experiment.multi_run();
        assert!(experiment.results().discounted_return.count() == 2.);
    }
}

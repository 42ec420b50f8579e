use beliefsearch::domain::rocksample::RockSample;
use beliefsearch::domain::simulator::Simulator;
use beliefsearch::experiment::experiment::Experiment;
use beliefsearch::experiment::experiment::ExperimentParams;
use beliefsearch::experiment::experiment::Method;
use beliefsearch::search::params::SearchParams;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "bandit-driven online planning experiments", long_about = None)]
struct Args {
    /// search variant to run
    #[arg(long, value_enum, default_value = "posts")]
    method: Method,
    /// rocksample grid size (7 or 11)
    #[arg(long, default_value_t = 7)]
    size: i32,
    /// search horizon per simulation
    #[arg(long, default_value_t = 10)]
    horizon: usize,
    /// beta prior of the Normal-Gamma posterior
    #[arg(long, default_value_t = 1.)]
    beta_prior: f64,
    /// arm convergence-window length (symbol only)
    #[arg(long, default_value_t = 30)]
    arm_capacity: usize,
    /// arm convergence threshold (symbol only)
    #[arg(long, default_value_t = 0.1)]
    convergence_epsilon: f64,
    /// smallest simulation budget, as a power of two
    #[arg(long, default_value_t = 1)]
    min_doubles: u32,
    /// largest simulation budget, as a power of two
    #[arg(long, default_value_t = 10)]
    max_doubles: u32,
    /// episodes per simulation budget
    #[arg(long, default_value_t = 100)]
    runs: usize,
    /// root seed for the whole sweep
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    beliefsearch::init();
    let args = Args::parse();
    let real = match args.size {
        7 => RockSample::new(7, 8),
        11 => RockSample::new(11, 11),
        _ => anyhow::bail!("rocksample ships the 7 and 11 layouts"),
    };
    let exp_params = ExperimentParams {
        num_runs: args.runs,
        min_doubles: args.min_doubles,
        max_doubles: args.max_doubles,
        ..ExperimentParams::default()
    };
    let search_params = SearchParams {
        max_depth: args.horizon,
        bandit_beta_prior: args.beta_prior,
        bandit_arm_capacity: args.arm_capacity,
        bandit_convergence_epsilon: args.convergence_epsilon,
        seed: args.seed,
        ..SearchParams::default()
    };
    let output = format!(
        "rocksample-{}_{:?}_prior-{}_horizon-{}.txt",
        args.size, args.method, args.beta_prior, args.horizon
    );
    log::info!("writing sweep to {}", output);
    log::info!(
        "{} actions over a horizon of {}",
        real.num_actions(),
        real.horizon(exp_params.accuracy, exp_params.undiscounted_horizon)
    );
    let mut experiment = Experiment::new(real, args.method, exp_params, search_params);
    experiment.discounted_return(&output)?;
    Ok(())
}

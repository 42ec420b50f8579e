pub mod bandit;
pub mod domain;
pub mod experiment;
pub mod search;

/// dimensional analysis types
type Reward = f64;
type Probability = f64;
type Discount = f64;

// normal-gamma prior hyperparameters. the scale prior (beta)
// is the one knob left open; it comes in through SearchParams.
const PRIOR_MEAN: Reward = 0.;
const PRIOR_PRECISION: f64 = 0.01;
const PRIOR_SHAPE: f64 = 1.;

/// initialize logging
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

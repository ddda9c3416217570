use std::process::ExitCode;

use clap::Parser;
use log::error;

use convoy_v2x::simulation::builder::{ScenarioBuilder, Services};
use convoy_v2x::simulation::config::BaseConfig;
use convoy_v2x::simulation::error::ScenarioError;
use convoy_v2x::simulation::runner::run_simulation;
use convoy_v2x::v2x::services::{BeaconControlService, LaneMobilityService, TraceVideoService};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: Option<String>,
    #[arg(long = "ue-number", alias = "ueNumber", value_name = "VEHICLES")]
    ue_number: Option<usize>,
    #[arg(long = "sim-time", alias = "simTime", value_name = "SECONDS")]
    sim_time: Option<f64>,
}

fn run(args: &CliArgs) -> Result<(), ScenarioError> {
    let mut builder = match &args.config {
        Some(config_file) => ScenarioBuilder::from_file(config_file)?,
        None => ScenarioBuilder::new(BaseConfig::default()),
    };
    builder.apply_overrides(args.ue_number, args.sim_time);
    builder.initiate_logger()?;

    let descriptor = builder.config().mobility_descriptor()?;
    let mut services = Services {
        mobility: LaneMobilityService::new(&descriptor)?,
        control: BeaconControlService,
        video: TraceVideoService,
    };
    let results = builder.results()?;
    let scenario = builder.build(&mut services, results)?;
    run_simulation(scenario.scheduler);
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    if let Err(e) = run(&args) {
        error!("Simulation aborted: {}", e);
        eprintln!("Simulation aborted: {}", e);
        return ExitCode::FAILURE;
    }
    let elapsed = start.elapsed();
    println!("Simulation finished in {} ms.", elapsed.as_millis());
    ExitCode::SUCCESS
}

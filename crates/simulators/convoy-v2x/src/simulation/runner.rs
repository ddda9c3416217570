use log::{debug, info};

use convoy_core::bucket::{Bucket, TimeUS};
use convoy_core::scheduler::Scheduler;

/// Runs the event loop to the end of the simulation and tears the scheduler down.
pub fn run_simulation<B, S>(mut scheduler: S)
where
    S: Scheduler<B>,
    B: Bucket,
{
    let end_time = scheduler.duration();
    info!("Running the simulation until {}", end_time);

    let mut now = TimeUS::ZERO;
    scheduler.initialize();
    while now < end_time {
        scheduler.activate();
        now = scheduler.trigger();
        debug!("{} applications active, next event at {}", scheduler.active_agents(), now);
    }
    scheduler.terminate();
    info!("Simulation reached {}", end_time);
}

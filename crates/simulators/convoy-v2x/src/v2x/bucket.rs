use log::{error, info};
use typed_builder::TypedBuilder;

use convoy_core::bucket::{Bucket, TimeUS};
use convoy_output::result::Results;
use convoy_output::tables::timeline::{Transition, TimelineRow};

use crate::v2x::apps::AppAgent;

/// Shared state of a running scenario: the result tables and a tally of transitions.
#[derive(Debug, TypedBuilder)]
pub struct V2XBucket {
    pub results: Results,
    #[builder(default)]
    pub step: TimeUS,
    #[builder(default)]
    pub starts: usize,
    #[builder(default)]
    pub stops: usize,
}

impl V2XBucket {
    pub fn record(&mut self, now: TimeUS, app: &AppAgent, transition: Transition) {
        match transition {
            Transition::Start => self.starts += 1,
            Transition::Stop => self.stops += 1,
        }
        self.results.add_transition(TimelineRow {
            time: now.as_secs(),
            app_id: app.id.as_u64(),
            node_id: app.node.as_u64(),
            app: app.kind.to_string(),
            transition,
        });
    }
}

impl Bucket for V2XBucket {
    fn initialize(&mut self, step: TimeUS) {
        self.step = step;
        if let Err(e) = self.results.write_to_file() {
            error!("Failed to write scenario tables: {}", e);
        }
    }

    fn before_agents(&mut self, step: TimeUS) {
        self.step = step;
    }

    fn after_agents(&mut self, step: TimeUS) {
        self.step = step;
    }

    fn terminate(self, step: TimeUS) {
        info!(
            "Simulation stopped at {} after {} starts and {} stops",
            step, self.starts, self.stops
        );
        if let Err(e) = self.results.close_files() {
            error!("Failed to close result files: {}", e);
        }
    }
}

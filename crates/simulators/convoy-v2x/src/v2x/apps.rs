use std::fmt::{Display, Formatter};

use log::debug;
use typed_builder::TypedBuilder;

use convoy_core::agent::{Activatable, Agent, AgentId, AgentOrder, Orderable};
use convoy_core::bucket::TimeUS;
use convoy_models::lifecycle::LifecycleWindow;
use convoy_models::services::Application;
use convoy_output::tables::timeline::Transition;

use crate::v2x::bucket::V2XBucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    VideoServer,
    VideoClient,
    Control,
}

impl AppKind {
    /// Servers start before clients that are due at the same instant.
    pub fn order(&self) -> AgentOrder {
        match self {
            AppKind::VideoServer => AgentOrder(0),
            AppKind::VideoClient => AgentOrder(1),
            AppKind::Control => AgentOrder(2),
        }
    }
}

impl Display for AppKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppKind::VideoServer => write!(f, "VideoServer"),
            AppKind::VideoClient => write!(f, "VideoClient"),
            AppKind::Control => write!(f, "Control"),
        }
    }
}

/// One application instance installed on a node, started and stopped by the scheduler at the
/// edges of its lifecycle window.
#[derive(TypedBuilder)]
pub struct AppAgent {
    pub id: AgentId,
    pub node: AgentId,
    pub kind: AppKind,
    pub window: LifecycleWindow,
    pub endpoint: Box<dyn Application>,
    #[builder(default)]
    pub running: bool,
}

impl Activatable<V2XBucket> for AppAgent {
    fn activate(&mut self, now: TimeUS, bucket: &mut V2XBucket) {
        debug!("Starting {} {} on node {}", self.kind, self.id, self.node);
        self.endpoint.start(now);
        self.running = true;
        bucket.record(now, self, Transition::Start);
    }

    fn deactivate(&mut self, now: TimeUS, bucket: &mut V2XBucket) {
        debug!("Stopping {} {} on node {}", self.kind, self.id, self.node);
        self.endpoint.stop(now);
        self.running = false;
        bucket.record(now, self, Transition::Stop);
    }

    fn is_deactivated(&self) -> bool {
        !self.running
    }

    fn time_of_activation(&self) -> TimeUS {
        self.window.start
    }

    fn time_of_deactivation(&self) -> TimeUS {
        self.window.stop
    }
}

impl Orderable for AppAgent {
    fn order(&self) -> AgentOrder {
        self.kind.order()
    }
}

impl Agent<V2XBucket> for AppAgent {
    fn id(&self) -> AgentId {
        self.id
    }
}

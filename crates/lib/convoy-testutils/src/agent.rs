use std::sync::{Arc, Mutex};

use convoy_core::agent::{Activatable, Agent, AgentId, AgentOrder, Orderable};
use convoy_core::bucket::TimeUS;

use crate::bucket::{MyBucket, Transition};

/// Transitions seen by test devices, kept outside the scheduler so that they survive
/// `terminate`, which consumes the bucket.
pub type TransitionLog = Arc<Mutex<Vec<Transition>>>;

#[derive(Clone, Debug)]
pub struct TDevice {
    pub id: AgentId,
    pub order: AgentOrder,
    pub start: TimeUS,
    pub stop: TimeUS,
    pub active: bool,
    pub log: TransitionLog,
}

impl Activatable<MyBucket> for TDevice {
    fn activate(&mut self, now: TimeUS, bucket: &mut MyBucket) {
        self.active = true;
        bucket.transitions.push(Transition::Started(self.id, now));
        self.log.lock().unwrap().push(Transition::Started(self.id, now));
    }

    fn deactivate(&mut self, now: TimeUS, bucket: &mut MyBucket) {
        self.active = false;
        bucket.transitions.push(Transition::Stopped(self.id, now));
        self.log.lock().unwrap().push(Transition::Stopped(self.id, now));
    }

    fn is_deactivated(&self) -> bool {
        !self.active
    }

    fn time_of_activation(&self) -> TimeUS {
        self.start
    }

    fn time_of_deactivation(&self) -> TimeUS {
        self.stop
    }
}

impl Orderable for TDevice {
    fn order(&self) -> AgentOrder {
        self.order
    }
}

impl Agent<MyBucket> for TDevice {
    fn id(&self) -> AgentId {
        self.id
    }
}

impl TDevice {
    pub fn make_device(id: u64, order: u32, start: u64, stop: u64, log: &TransitionLog) -> Self {
        Self {
            id: AgentId::from(id),
            order: AgentOrder::from(order),
            start: TimeUS::from(start),
            stop: TimeUS::from(stop),
            active: false,
            log: Arc::clone(log),
        }
    }
}

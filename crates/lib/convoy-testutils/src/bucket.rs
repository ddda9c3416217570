use convoy_core::agent::AgentId;
use convoy_core::bucket::{Bucket, TimeUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started(AgentId, TimeUS),
    Stopped(AgentId, TimeUS),
}

#[derive(Default, Clone, Debug)]
pub struct MyBucket {
    pub step: TimeUS,
    pub transitions: Vec<Transition>,
    pub initialized: bool,
}

impl Bucket for MyBucket {
    fn initialize(&mut self, step: TimeUS) {
        self.step = step;
        self.initialized = true;
    }

    fn before_agents(&mut self, step: TimeUS) {
        self.step = step;
    }

    fn after_agents(&mut self, step: TimeUS) {
        self.step = step;
    }

    fn terminate(self, step: TimeUS) {
        println!("End in MyBucket at {}", step);
    }
}

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    Start,
    Stop,
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Start => write!(f, "Start"),
            Transition::Stop => write!(f, "Stop"),
        }
    }
}

/// An application being started or stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub time: f64,
    pub app_id: u64,
    pub node_id: u64,
    pub app: String,
    pub transition: Transition,
}

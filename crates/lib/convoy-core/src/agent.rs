use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::Deserialize;

use crate::bucket::{Bucket, TimeUS};

/// A unique ID that is a property of all the agents in the simulation.
#[derive(Deserialize, Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct AgentId(u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<u64>()?;
        Ok(Self(id))
    }
}

impl From<u64> for AgentId {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl AgentId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// The kind of node an agent is attached to. Vehicles move along the road and roadside units
/// stay where they are placed.
#[derive(Deserialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
pub enum AgentKind {
    #[default]
    Vehicle = 0,
    RSU,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Vehicle => write!(f, "Vehicle"),
            AgentKind::RSU => write!(f, "RSU"),
        }
    }
}

/// Agent order indicates the order in which agents that share an instant are started.
///
/// Agents with the lowest order are started first and stopped last. This is what keeps a
/// video server listening before its client dials when both are due at the same time.
#[derive(Deserialize, Debug, Copy, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentOrder(pub u32);

impl From<u32> for AgentOrder {
    fn from(f: u32) -> Self {
        Self(f)
    }
}

pub trait Orderable {
    fn order(&self) -> AgentOrder;
}

/// A trait that allows an agent to be started and stopped by the scheduler at fixed instants.
pub trait Activatable<B> {
    fn activate(&mut self, now: TimeUS, bucket: &mut B);
    fn deactivate(&mut self, now: TimeUS, bucket: &mut B);
    fn is_deactivated(&self) -> bool;
    fn time_of_activation(&self) -> TimeUS;
    fn time_of_deactivation(&self) -> TimeUS;
}

/// A trait that represents an agent. Only types with this trait can be handed to a scheduler.
pub trait Agent<B>: Activatable<B> + Orderable + Send
where
    B: Bucket,
{
    fn id(&self) -> AgentId;
}

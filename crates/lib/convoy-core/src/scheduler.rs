use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};
use typed_builder::TypedBuilder;

use crate::agent::{Agent, AgentId};
use crate::bucket::{Bucket, TimeUS};
use crate::hashbrown::HashMap;

/// A trait used to represent a scheduler. The order of calling the scheduler's functions is
/// important to ensure the correct behavior of the run loop: `initialize` once, then
/// `activate` and `trigger` until `trigger` returns the duration, then `terminate`.
pub trait Scheduler<B: Bucket>: Send {
    fn duration(&self) -> TimeUS;
    fn initialize(&mut self);
    fn activate(&mut self);
    fn trigger(&mut self) -> TimeUS;
    fn active_agents(&self) -> usize;
    fn terminate(self);
}

/// Discrete-event scheduler. Instead of stepping a fixed interval, time jumps straight to the
/// next instant at which some agent starts or stops, or to the end of the simulation.
#[derive(TypedBuilder)]
pub struct EventScheduler<A, B>
where
    A: Agent<B>,
    B: Bucket,
{
    pub bucket: B,
    pub duration: TimeUS,
    pub inactive_agents: HashMap<AgentId, A>,
    #[builder(default)]
    pub active_agents: IndexMap<AgentId, A>,
    #[builder(default)]
    pub start_cache: BTreeMap<TimeUS, Vec<AgentId>>,
    #[builder(default)]
    pub stop_cache: BTreeMap<TimeUS, Vec<AgentId>>,
    #[builder(default)]
    pub now: TimeUS,
    #[builder(default)]
    pub _marker: std::marker::PhantomData<fn() -> B>,
}

impl<A, B> EventScheduler<A, B>
where
    A: Agent<B>,
    B: Bucket,
{
    fn agent_cmp(this_id: &AgentId, this_agent: &A, other_id: &AgentId, other_agent: &A) -> Ordering {
        this_agent
            .order()
            .cmp(&other_agent.order())
            .then_with(|| this_id.cmp(other_id))
    }

    /// Removes every cache entry due at or before `now` and returns the agent IDs in it.
    fn take_due(cache: &mut BTreeMap<TimeUS, Vec<AgentId>>, now: TimeUS) -> Vec<AgentId> {
        let mut due = Vec::new();
        while let Some(entry) = cache.first_entry() {
            if *entry.key() > now {
                break;
            }
            due.extend(entry.remove());
        }
        due
    }

    fn next_instant(&self) -> TimeUS {
        let next_start = self.start_cache.keys().next().copied();
        let next_stop = self.stop_cache.keys().next().copied();
        let next = match (next_start, next_stop) {
            (Some(start), Some(stop)) => start.min(stop),
            (Some(start), None) => start,
            (None, Some(stop)) => stop,
            (None, None) => self.duration,
        };
        next.min(self.duration)
    }
}

impl<A, B> Scheduler<B> for EventScheduler<A, B>
where
    A: Agent<B>,
    B: Bucket,
{
    fn duration(&self) -> TimeUS {
        self.duration
    }

    fn initialize(&mut self) {
        for (agent_id, agent) in self.inactive_agents.iter() {
            let start = agent.time_of_activation();
            if start >= self.duration {
                warn!("Agent {} starts at {}, after the simulation ends", agent_id, start);
                continue;
            }
            debug!("Adding agent {} to the scheduler at {}", agent_id, start);
            self.start_cache.entry(start).or_default().push(*agent_id);
        }
        self.bucket.initialize(self.now);
    }

    fn activate(&mut self) {
        let due = Self::take_due(&mut self.start_cache, self.now);
        if due.is_empty() {
            return;
        }

        let mut starting: IndexMap<AgentId, A> = IndexMap::with_capacity(due.len());
        for agent_id in due.into_iter() {
            if let Some(agent) = self.inactive_agents.remove(&agent_id) {
                starting.insert(agent_id, agent);
            }
        }
        starting.sort_by(Self::agent_cmp);

        for (agent_id, mut agent) in starting.into_iter() {
            debug!("Starting agent {} at {}", agent_id, self.now);
            agent.activate(self.now, &mut self.bucket);
            self.stop_cache
                .entry(agent.time_of_deactivation())
                .or_default()
                .push(agent_id);
            self.active_agents.insert(agent_id, agent);
        }
    }

    fn trigger(&mut self) -> TimeUS {
        self.bucket.before_agents(self.now);

        let due = Self::take_due(&mut self.stop_cache, self.now);
        let mut stopping: IndexMap<AgentId, A> = IndexMap::with_capacity(due.len());
        for agent_id in due.into_iter() {
            if let Some(agent) = self.active_agents.swap_remove(&agent_id) {
                stopping.insert(agent_id, agent);
            }
        }
        stopping.sort_by(Self::agent_cmp);

        for (agent_id, mut agent) in stopping.into_iter().rev() {
            debug!("Stopping agent {} at {}", agent_id, self.now);
            agent.deactivate(self.now, &mut self.bucket);
            self.inactive_agents.insert(agent_id, agent);
        }

        self.bucket.after_agents(self.now);
        self.now = self.next_instant();
        self.now
    }

    fn active_agents(&self) -> usize {
        self.active_agents.len()
    }

    fn terminate(mut self) {
        self.active_agents.sort_by(Self::agent_cmp);
        let now = self.now;
        for (agent_id, agent) in self.active_agents.iter_mut().rev() {
            debug!("Stopping agent {} at teardown", agent_id);
            agent.deactivate(now, &mut self.bucket);
        }
        self.bucket.terminate(now);
    }
}

use hashbrown::HashMap;
use itertools::izip;
use log::{debug, warn};
use serde::Serialize;
use typed_builder::TypedBuilder;

use convoy_core::bucket::TimeUS;

use crate::error::{CollisionKind, ConfigError, PlanError};
use crate::lifecycle::{LifecycleScheduler, LifecycleSettings, LifecycleWindow};
use crate::port::PortAllocator;
use crate::tdma::TdmaAllocator;

/// Converts a setting given in seconds to simulated time. A value below the microsecond
/// resolution is an error, never rounded.
pub fn secs(name: &'static str, value: f64) -> Result<TimeUS, ConfigError> {
    match TimeUS::from_secs(value) {
        Some(time) => Ok(time),
        None if value.is_finite() && value > 0.0 && value <= TimeUS::MAX.as_secs() => {
            Err(ConfigError::TimePrecision { name, value })
        }
        None => Err(ConfigError::InvalidTime { name, value }),
    }
}

/// Names a per-vehicle dump file: the prefix followed by the vehicle index.
pub fn dump_name(prefix: &str, vehicle: usize) -> String {
    format!("{}{}", prefix, vehicle)
}

/// Everything the allocation core needs, in the units the scenario is configured in.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct PlanSettings {
    pub slot_width: f64,
    pub base_port: u16,
    pub port_stride: u16,
    pub horizon: f64,
    pub control_guard: f64,
    pub video_warmup: f64,
    pub session_offset: f64,
    #[builder(default = String::from("agrup_sd_"), setter(into))]
    pub sender_dump_prefix: String,
    #[builder(default = String::from("agrup_rd_"), setter(into))]
    pub receiver_dump_prefix: String,
}

/// The settings validated and turned into allocators, before anything is allocated.
#[derive(Debug, Clone, Copy)]
pub struct Allocators {
    pub tdma: TdmaAllocator,
    pub ports: PortAllocator,
    pub lifecycle: LifecycleScheduler,
}

impl Allocators {
    pub fn with_settings(settings: &PlanSettings) -> Result<Self, ConfigError> {
        let tdma = TdmaAllocator::new(secs("slot_width", settings.slot_width)?)?;
        let ports = PortAllocator::new(settings.base_port, settings.port_stride)?;
        let lifecycle_settings = LifecycleSettings::builder()
            .horizon(secs("horizon", settings.horizon)?)
            .control_guard(secs("control_guard", settings.control_guard)?)
            .video_warmup(secs("video_warmup", settings.video_warmup)?)
            .session_offset(secs("session_offset", settings.session_offset)?)
            .build();
        let lifecycle = LifecycleScheduler::new(lifecycle_settings)?;
        Ok(Self {
            tdma,
            ports,
            lifecycle,
        })
    }
}

/// Everything a single vehicle is assigned before the simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehiclePlan {
    pub vehicle: usize,
    pub tdma_offset: TimeUS,
    pub video_port: u16,
    pub server_window: LifecycleWindow,
    pub client_window: LifecycleWindow,
    pub sender_dump: String,
    pub receiver_dump: String,
}

/// The complete, immutable timing and port layout of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    pub slot_width: TimeUS,
    pub horizon: TimeUS,
    pub control_window: LifecycleWindow,
    pub vehicles: Vec<VehiclePlan>,
}

impl AllocationPlan {
    /// Validates every setting, allocates offsets, ports and windows for `vehicle_count`
    /// vehicles and checks the result for collisions. Nothing is returned unless the whole
    /// plan is valid.
    pub fn compute(settings: &PlanSettings, vehicle_count: usize) -> Result<Self, PlanError> {
        let allocators = Allocators::with_settings(settings)?;
        if vehicle_count == 0 {
            warn!("Computing an allocation plan without any vehicle");
        }

        let offsets = allocators.tdma.allocate(vehicle_count)?;
        let ports = allocators.ports.allocate(vehicle_count)?;
        let sessions = allocators.lifecycle.session_windows(vehicle_count);

        let vehicles: Vec<VehiclePlan> = izip!(offsets, ports, sessions)
            .map(|(offset, port, session)| VehiclePlan {
                vehicle: offset.vehicle,
                tdma_offset: offset.offset,
                video_port: port.port,
                server_window: session.server,
                client_window: session.client,
                sender_dump: dump_name(&settings.sender_dump_prefix, offset.vehicle),
                receiver_dump: dump_name(&settings.receiver_dump_prefix, offset.vehicle),
            })
            .collect();

        let plan = Self {
            slot_width: allocators.tdma.slot_width(),
            horizon: allocators.lifecycle.horizon(),
            control_window: allocators.lifecycle.control_window(),
            vehicles,
        };
        plan.verify()?;
        debug!(
            "Allocated {} vehicles, control window {}..{}",
            plan.fleet_size(),
            plan.control_window.start,
            plan.control_window.stop
        );
        Ok(plan)
    }

    pub fn fleet_size(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicle(&self, vehicle: usize) -> Option<&VehiclePlan> {
        self.vehicles.get(vehicle)
    }

    /// Checks that no two vehicles hold the same TDMA offset or video port.
    pub fn verify(&self) -> Result<(), PlanError> {
        find_collision(
            CollisionKind::TdmaOffset,
            self.vehicles
                .iter()
                .map(|plan| (plan.vehicle, plan.tdma_offset.as_u64())),
        )?;
        find_collision(
            CollisionKind::VideoPort,
            self.vehicles
                .iter()
                .map(|plan| (plan.vehicle, u64::from(plan.video_port))),
        )
    }
}

/// Fails on the first value claimed by two different vehicles.
pub fn find_collision<I>(kind: CollisionKind, claims: I) -> Result<(), PlanError>
where
    I: IntoIterator<Item = (usize, u64)>,
{
    let mut owners: HashMap<u64, usize> = HashMap::new();
    for (vehicle, value) in claims {
        if let Some(first) = owners.insert(value, vehicle) {
            return Err(PlanError::Collision {
                kind,
                value,
                first,
                second: vehicle,
            });
        }
    }
    Ok(())
}

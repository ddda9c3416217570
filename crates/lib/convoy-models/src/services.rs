//! Capability traits of the services a scenario is assembled from. Mobility, the clustering
//! control protocol and video delivery are not modelled here; the scenario only tells them
//! what to install and when to start and stop it.

use std::net::{Ipv4Addr, SocketAddrV4};

use typed_builder::TypedBuilder;

use convoy_core::agent::AgentId;
use convoy_core::bucket::TimeUS;

use crate::error::ServiceError;
use crate::mobility::{MobilityDescriptor, Point3D};

/// Anything the scheduler can start and stop.
pub trait Application: Send {
    fn start(&mut self, now: TimeUS);
    fn stop(&mut self, now: TimeUS);
}

/// Access to the motion model the mobility service installed on a node.
pub trait MobilityHandle: Clone + Send {
    /// Where the node was placed when the scenario was assembled.
    fn position(&self) -> Point3D;
    fn position_at(&self, now: TimeUS) -> Point3D;
    fn set_position(&mut self, position: Point3D);
    fn speed_variation(&self) -> f64;
    fn set_speed_variation(&mut self, variation: f64);
}

pub trait MobilityService {
    type Handle: MobilityHandle;

    fn install(
        &mut self,
        node: AgentId,
        descriptor: &MobilityDescriptor,
    ) -> Result<Self::Handle, ServiceError>;

    fn install_static(
        &mut self,
        node: AgentId,
        position: Point3D,
    ) -> Result<Self::Handle, ServiceError>;
}

/// Everything the control-channel client of one vehicle is configured with.
#[derive(Clone, Debug, TypedBuilder)]
pub struct ControlSetup<H> {
    pub node: AgentId,
    pub broadcast: SocketAddrV4,
    pub local: SocketAddrV4,
    pub mobility: H,
    pub tdma_offset: TimeUS,
    pub fleet_size: usize,
    pub slot_width: TimeUS,
    pub cluster_time_metric: f64,
    pub incident_window: f64,
}

pub fn broadcast_on(port: u16) -> SocketAddrV4 {
    SocketAddrV4::new(Ipv4Addr::BROADCAST, port)
}

pub fn any_on(port: u16) -> SocketAddrV4 {
    SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port)
}

pub trait ControlService<H: MobilityHandle> {
    type Endpoint: Application;

    fn install(&mut self, setup: ControlSetup<H>) -> Result<Self::Endpoint, ServiceError>;
}

/// The video server the roadside unit runs for one vehicle.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct VideoServerSetup {
    pub node: AgentId,
    pub vehicle: usize,
    pub bind_port: u16,
    pub trace_file: String,
    pub sender_dump: String,
    pub packet_payload: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct VideoClientSetup {
    pub node: AgentId,
    pub server: SocketAddrV4,
    pub receiver_dump: String,
}

pub trait VideoService {
    type Server: Application;
    type Client: Application;

    fn install_server(&mut self, setup: VideoServerSetup) -> Result<Self::Server, ServiceError>;
    fn install_client(&mut self, setup: VideoClientSetup) -> Result<Self::Client, ServiceError>;
}

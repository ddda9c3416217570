//! Services the binary assembles scenarios with. They keep enough state to be inspected after a
//! run and log what a full protocol stack would do, without exchanging any packets.

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};

use convoy_core::agent::AgentId;
use convoy_core::bucket::TimeUS;
use convoy_models::dist::{DistError, RngSampler};
use convoy_models::error::ServiceError;
use convoy_models::mobility::{MobilityDescriptor, MotionMode, Point3D, Rectangle};
use convoy_models::services::{
    Application, ControlService, ControlSetup, MobilityHandle, MobilityService, VideoClientSetup,
    VideoServerSetup, VideoService,
};

/// Straight-line motion along the road. A vehicle moves in +x at its sampled speed for the
/// configured duration and is kept inside the bounds. Static nodes have zero speed.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionModel {
    pub node: AgentId,
    pub origin: Point3D,
    pub speed: f64,
    pub speed_variation: f64,
    pub mode: MotionMode,
    pub duration: TimeUS,
    pub bounds: Option<Rectangle>,
}

impl MotionModel {
    pub fn position_at(&self, now: TimeUS) -> Point3D {
        let elapsed = match self.mode {
            MotionMode::Time => now.min(self.duration).as_secs(),
        };
        let moved = Point3D::new(self.origin.x + self.speed * elapsed, self.origin.y, self.origin.z);
        match self.bounds {
            Some(bounds) => bounds.clamp(moved),
            None => moved,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LaneMobility(Arc<RwLock<MotionModel>>);

impl LaneMobility {
    fn new(model: MotionModel) -> Self {
        Self(Arc::new(RwLock::new(model)))
    }

}

impl MobilityHandle for LaneMobility {
    fn position(&self) -> Point3D {
        self.0.read().unwrap_or_else(PoisonError::into_inner).origin
    }

    fn position_at(&self, now: TimeUS) -> Point3D {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .position_at(now)
    }

    fn set_position(&mut self, position: Point3D) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).origin = position;
    }

    fn speed_variation(&self) -> f64 {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .speed_variation
    }

    fn set_speed_variation(&mut self, variation: f64) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .speed_variation = variation;
    }
}

/// Draws one speed per vehicle from a seeded distribution, in installation order.
#[derive(Debug, Clone)]
pub struct LaneMobilityService {
    sampler: RngSampler,
    installed: Vec<LaneMobility>,
}

impl LaneMobilityService {
    pub fn new(descriptor: &MobilityDescriptor) -> Result<Self, DistError> {
        Ok(Self {
            sampler: RngSampler::new(&descriptor.speed)?,
            installed: Vec::new(),
        })
    }

    pub fn installed(&self) -> &[LaneMobility] {
        &self.installed
    }
}

impl MobilityService for LaneMobilityService {
    type Handle = LaneMobility;

    fn install(
        &mut self,
        node: AgentId,
        descriptor: &MobilityDescriptor,
    ) -> Result<Self::Handle, ServiceError> {
        let speed = self.sampler.sample();
        if !speed.is_finite() {
            return Err(ServiceError {
                service: "mobility",
                node: node.as_u64(),
                reason: format!("sampled speed {} is not finite", speed),
            });
        }
        debug!("Installing {} mobility on node {} at speed {}", descriptor.mode, node, speed);
        let handle = LaneMobility::new(MotionModel {
            node,
            origin: Point3D::default(),
            speed,
            speed_variation: 0.0,
            mode: descriptor.mode,
            duration: descriptor.duration,
            bounds: Some(descriptor.bounds),
        });
        self.installed.push(handle.clone());
        Ok(handle)
    }

    fn install_static(
        &mut self,
        node: AgentId,
        position: Point3D,
    ) -> Result<Self::Handle, ServiceError> {
        debug!("Placing node {} at {}", node, position);
        let handle = LaneMobility::new(MotionModel {
            node,
            origin: position,
            speed: 0.0,
            speed_variation: 0.0,
            mode: MotionMode::Time,
            duration: TimeUS::ZERO,
            bounds: None,
        });
        self.installed.push(handle.clone());
        Ok(handle)
    }
}

/// Control-channel client of one vehicle. It only knows its own slot in the TDMA frame.
#[derive(Debug, Clone)]
pub struct BeaconClient<H> {
    pub setup: ControlSetup<H>,
    pub started_at: Option<TimeUS>,
}

impl<H> BeaconClient<H> {
    /// Duration of one TDMA frame: one slot per vehicle.
    pub fn frame(&self) -> TimeUS {
        TimeUS(
            self.setup
                .slot_width
                .as_u64()
                .saturating_mul(self.setup.fleet_size as u64),
        )
    }

    /// The first beacon this client sends after being started at `now`.
    pub fn first_beacon(&self, now: TimeUS) -> TimeUS {
        TimeUS(now.as_u64().saturating_add(self.setup.tdma_offset.as_u64()))
    }
}

impl<H: MobilityHandle> Application for BeaconClient<H> {
    fn start(&mut self, now: TimeUS) {
        self.started_at = Some(now);
        debug!(
            "Control client on node {} beacons to {} from {}, frame {}",
            self.setup.node,
            self.setup.broadcast,
            self.first_beacon(now),
            self.frame()
        );
    }

    fn stop(&mut self, now: TimeUS) {
        debug!(
            "Control client on node {} stopped at {} at position {}",
            self.setup.node,
            now,
            self.setup.mobility.position_at(now)
        );
        self.started_at = None;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BeaconControlService;

impl<H: MobilityHandle> ControlService<H> for BeaconControlService {
    type Endpoint = BeaconClient<H>;

    fn install(&mut self, setup: ControlSetup<H>) -> Result<Self::Endpoint, ServiceError> {
        if setup.fleet_size == 0 {
            return Err(ServiceError {
                service: "control",
                node: setup.node.as_u64(),
                reason: "a control client needs at least one vehicle in the fleet".to_string(),
            });
        }
        Ok(BeaconClient {
            setup,
            started_at: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VideoSender {
    pub setup: VideoServerSetup,
    pub started_at: Option<TimeUS>,
}

impl Application for VideoSender {
    fn start(&mut self, now: TimeUS) {
        self.started_at = Some(now);
        info!(
            "Streaming {} to vehicle {} from port {}",
            self.setup.trace_file, self.setup.vehicle, self.setup.bind_port
        );
    }

    fn stop(&mut self, now: TimeUS) {
        debug!("Video server on port {} stopped at {}", self.setup.bind_port, now);
        self.started_at = None;
    }
}

#[derive(Debug, Clone)]
pub struct VideoReceiver {
    pub setup: VideoClientSetup,
    pub started_at: Option<TimeUS>,
}

impl Application for VideoReceiver {
    fn start(&mut self, now: TimeUS) {
        self.started_at = Some(now);
        debug!(
            "Video client on node {} requesting {} at {}",
            self.setup.node, self.setup.server, now
        );
    }

    fn stop(&mut self, now: TimeUS) {
        debug!(
            "Video client on node {} stopped at {}, dump {}",
            self.setup.node, now, self.setup.receiver_dump
        );
        self.started_at = None;
    }
}

/// Serves the configured trace file. Installation fails on a zero payload or an empty trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceVideoService;

impl VideoService for TraceVideoService {
    type Server = VideoSender;
    type Client = VideoReceiver;

    fn install_server(&mut self, setup: VideoServerSetup) -> Result<Self::Server, ServiceError> {
        if setup.packet_payload == 0 || setup.trace_file.is_empty() {
            return Err(ServiceError {
                service: "video server",
                node: setup.node.as_u64(),
                reason: "a trace file and a non-zero payload are required".to_string(),
            });
        }
        Ok(VideoSender {
            setup,
            started_at: None,
        })
    }

    fn install_client(&mut self, setup: VideoClientSetup) -> Result<Self::Client, ServiceError> {
        Ok(VideoReceiver {
            setup,
            started_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use convoy_models::dist::DistParams;

    use super::*;

    fn descriptor() -> MobilityDescriptor {
        MobilityDescriptor::builder()
            .mode(MotionMode::Time)
            .duration(TimeUS::from(40_000_000))
            .speed(DistParams::constant(30.0))
            .bounds(Rectangle::default())
            .build()
    }

    #[test]
    fn vehicles_move_along_the_road_until_the_duration() {
        let mut service = LaneMobilityService::new(&descriptor()).unwrap();
        let mut handle = service.install(AgentId::from(0), &descriptor()).unwrap();
        handle.set_position(Point3D::new(10.0, 3.0, 0.0));
        assert_eq!(handle.position_at(TimeUS::from(2_000_000)), Point3D::new(70.0, 3.0, 0.0));
        assert_eq!(
            handle.position_at(TimeUS::from(90_000_000)),
            Point3D::new(1210.0, 3.0, 0.0)
        );
    }

    #[test]
    fn static_nodes_stay_put() {
        let mut service = LaneMobilityService::new(&descriptor()).unwrap();
        let handle = service
            .install_static(AgentId::from(10), Point3D::new(300.0, 15.0, 0.0))
            .unwrap();
        assert_eq!(handle.position_at(TimeUS::from(5_000_000)), Point3D::new(300.0, 15.0, 0.0));
        assert_eq!(service.installed().len(), 1);
    }

    #[test]
    fn handles_share_the_motion_model() {
        let mut service = LaneMobilityService::new(&descriptor()).unwrap();
        let mut handle = service.install(AgentId::from(0), &descriptor()).unwrap();
        handle.set_speed_variation(5.0);
        assert_eq!(service.installed()[0].speed_variation(), 5.0);
    }

    #[test]
    fn control_client_follows_its_vehicle() {
        let mut mobility = LaneMobilityService::new(&descriptor()).unwrap();
        let mut handle = mobility.install(AgentId::from(0), &descriptor()).unwrap();
        handle.set_position(Point3D::new(0.0, 3.0, 0.0));
        let setup = ControlSetup::builder()
            .node(AgentId::from(0))
            .broadcast(convoy_models::services::broadcast_on(3999))
            .local(convoy_models::services::any_on(3999))
            .mobility(handle)
            .tdma_offset(TimeUS::from(4_000))
            .fleet_size(10)
            .slot_width(TimeUS::from(1_000))
            .cluster_time_metric(3.0)
            .incident_window(30.0)
            .build();
        let mut client = BeaconControlService.install(setup).unwrap();
        assert_eq!(client.frame(), TimeUS::from(10_000));

        client.start(TimeUS::from(100_000));
        assert_eq!(client.started_at, Some(TimeUS::from(100_000)));
        assert_eq!(client.first_beacon(TimeUS::from(100_000)), TimeUS::from(104_000));
        assert_eq!(
            client.setup.mobility.position_at(TimeUS::from(2_100_000)),
            Point3D::new(63.0, 3.0, 0.0)
        );
        client.stop(TimeUS::from(2_100_000));
        assert_eq!(client.started_at, None);
    }

    #[test]
    fn video_server_needs_a_payload() {
        let setup = VideoServerSetup::builder()
            .node(AgentId::from(10))
            .vehicle(0)
            .bind_port(2000)
            .trace_file("video/st_a03".to_string())
            .sender_dump("agrup_sd_0".to_string())
            .packet_payload(0)
            .build();
        assert!(TraceVideoService.install_server(setup).is_err());
    }
}

use std::sync::{Arc, Mutex};

use convoy_core::agent::AgentId;
use convoy_core::bucket::TimeUS;
use convoy_models::error::ServiceError;
use convoy_models::mobility::{MobilityDescriptor, Point3D};
use convoy_models::services::{
    Application, ControlService, ControlSetup, MobilityHandle, MobilityService, VideoClientSetup,
    VideoServerSetup, VideoService,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCall {
    Start(String, TimeUS),
    Stop(String, TimeUS),
}

pub type CallLog = Arc<Mutex<Vec<AppCall>>>;

/// An application that only writes down when it was started and stopped.
#[derive(Debug, Clone)]
pub struct RecordingApp {
    pub label: String,
    pub calls: CallLog,
}

impl Application for RecordingApp {
    fn start(&mut self, now: TimeUS) {
        self.calls
            .lock()
            .unwrap()
            .push(AppCall::Start(self.label.clone(), now));
    }

    fn stop(&mut self, now: TimeUS) {
        self.calls
            .lock()
            .unwrap()
            .push(AppCall::Stop(self.label.clone(), now));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeMobility {
    pub node: AgentId,
    pub position: Point3D,
    pub speed_variation: f64,
}

impl MobilityHandle for FakeMobility {
    fn position(&self) -> Point3D {
        self.position
    }

    fn position_at(&self, _now: TimeUS) -> Point3D {
        self.position
    }

    fn set_position(&mut self, position: Point3D) {
        self.position = position;
    }

    fn speed_variation(&self) -> f64 {
        self.speed_variation
    }

    fn set_speed_variation(&mut self, variation: f64) {
        self.speed_variation = variation;
    }
}

#[derive(Debug, Default)]
pub struct FakeMobilityService {
    pub moving: Vec<(AgentId, MobilityDescriptor)>,
    pub fixed: Vec<(AgentId, Point3D)>,
}

impl MobilityService for FakeMobilityService {
    type Handle = FakeMobility;

    fn install(
        &mut self,
        node: AgentId,
        descriptor: &MobilityDescriptor,
    ) -> Result<FakeMobility, ServiceError> {
        self.moving.push((node, descriptor.clone()));
        Ok(FakeMobility {
            node,
            ..Default::default()
        })
    }

    fn install_static(
        &mut self,
        node: AgentId,
        position: Point3D,
    ) -> Result<FakeMobility, ServiceError> {
        self.fixed.push((node, position));
        Ok(FakeMobility {
            node,
            position,
            speed_variation: 0.0,
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeControlService {
    pub setups: Vec<ControlSetup<FakeMobility>>,
    pub calls: CallLog,
}

impl ControlService<FakeMobility> for FakeControlService {
    type Endpoint = RecordingApp;

    fn install(&mut self, setup: ControlSetup<FakeMobility>) -> Result<RecordingApp, ServiceError> {
        let label = format!("control-{}", setup.node);
        self.setups.push(setup);
        Ok(RecordingApp {
            label,
            calls: Arc::clone(&self.calls),
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeVideoService {
    pub servers: Vec<VideoServerSetup>,
    pub clients: Vec<VideoClientSetup>,
    pub calls: CallLog,
    pub refuse_clients: bool,
}

impl VideoService for FakeVideoService {
    type Server = RecordingApp;
    type Client = RecordingApp;

    fn install_server(&mut self, setup: VideoServerSetup) -> Result<RecordingApp, ServiceError> {
        let label = format!("server-{}", setup.bind_port);
        self.servers.push(setup);
        Ok(RecordingApp {
            label,
            calls: Arc::clone(&self.calls),
        })
    }

    fn install_client(&mut self, setup: VideoClientSetup) -> Result<RecordingApp, ServiceError> {
        if self.refuse_clients {
            return Err(ServiceError {
                service: "video",
                node: setup.node.as_u64(),
                reason: "client refused".to_string(),
            });
        }
        let label = format!("client-{}", setup.server.port());
        self.clients.push(setup);
        Ok(RecordingApp {
            label,
            calls: Arc::clone(&self.calls),
        })
    }
}

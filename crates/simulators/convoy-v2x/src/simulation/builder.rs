use std::net::SocketAddrV4;
use std::path::{Path, PathBuf};

use log::{debug, info};

use convoy_core::agent::{AgentId, AgentKind};
use convoy_core::hashbrown::HashMap;
use convoy_core::scheduler::EventScheduler;
use convoy_models::dist::DistType;
use convoy_models::error::{AddressError, ConfigError};
use convoy_models::lifecycle::LifecycleWindow;
use convoy_models::medium::{AddressPool, NetDevice, SharedChannel};
use convoy_models::plan::AllocationPlan;
use convoy_models::services::{
    any_on, broadcast_on, Application, ControlService, ControlSetup, MobilityHandle,
    MobilityService, VideoClientSetup, VideoServerSetup, VideoService,
};
use convoy_output::logger::initiate_logger;
use convoy_output::result::Results;
use convoy_output::tables::nodes::NodeRow;
use convoy_output::tables::sessions::SessionRow;

use crate::simulation::config::{BaseConfig, BaseConfigReader};
use crate::simulation::error::ScenarioError;
use crate::v2x::apps::{AppAgent, AppKind};
use crate::v2x::bucket::V2XBucket;
use crate::v2x::topology::{RoadsideUnit, Topology, Vehicle};

pub type V2XScheduler = EventScheduler<AppAgent, V2XBucket>;

/// The services a scenario is installed with.
pub struct Services<M, C, V> {
    pub mobility: M,
    pub control: C,
    pub video: V,
}

/// A fully assembled scenario, ready to be handed to the runner.
pub struct Scenario<H> {
    pub plan: AllocationPlan,
    pub channel: SharedChannel,
    pub vehicles: Vec<Vehicle<H>>,
    pub rsus: Vec<RoadsideUnit<H>>,
    pub scheduler: V2XScheduler,
}

pub struct ScenarioBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
}

impl ScenarioBuilder {
    pub fn new(base_config: BaseConfig) -> Self {
        Self {
            base_config,
            config_path: PathBuf::new(),
        }
    }

    /// Reads the scenario from a TOML file. Relative output and log paths are resolved against
    /// the directory of the file.
    pub fn from_file(base_config_file: &str) -> Result<Self, ScenarioError> {
        let base_config = BaseConfigReader::new(base_config_file).parse()?;
        let config_path = Path::new(base_config_file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self {
            base_config,
            config_path,
        })
    }

    pub fn config(&self) -> &BaseConfig {
        &self.base_config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn apply_overrides(&mut self, vehicle_count: Option<usize>, sim_time: Option<f64>) {
        self.base_config.apply_overrides(vehicle_count, sim_time);
    }

    pub fn initiate_logger(&self) -> Result<PathBuf, ScenarioError> {
        Ok(initiate_logger(
            &self.config_path,
            &self.base_config.log_settings,
        )?)
    }

    pub fn results(&self) -> Result<Results, ScenarioError> {
        Ok(Results::new(
            &self.config_path,
            &self.base_config.output_settings,
        )?)
    }

    /// Assembles the scenario. Every setting is validated and every address handed out before
    /// the first service is called, so a configuration error never leaves half a scenario.
    pub fn build<M, C, V>(
        &self,
        services: &mut Services<M, C, V>,
        mut results: Results,
    ) -> Result<Scenario<M::Handle>, ScenarioError>
    where
        M: MobilityService,
        C: ControlService<M::Handle>,
        C::Endpoint: 'static,
        V: VideoService,
        V::Server: 'static,
        V::Client: 'static,
    {
        let topology_settings = &self.base_config.topology_settings;
        info!("Computing the allocation plan...");
        let plan = AllocationPlan::compute(
            &self.base_config.plan_settings(),
            topology_settings.vehicle_count,
        )?;
        let descriptor = self.base_config.mobility_descriptor()?;
        DistType::new(&descriptor.speed)?;
        let topology = Topology::build(topology_settings.vehicle_count, topology_settings.rsu_count)?;

        info!("Attaching {} devices to the channel...", topology.node_count());
        let mut channel = self.build_channel(&topology)?;
        let devices: Vec<NetDevice> = topology
            .nodes()
            .map(|node| channel.attach(node.node, node.kind))
            .collect::<Result<_, _>>()?;
        let (vehicle_devices, rsu_devices) = devices.split_at(topology.vehicles.len());

        info!("Installing mobility...");
        let mut vehicles = Vec::with_capacity(topology.vehicles.len());
        for (info, device) in topology.vehicles.iter().zip(vehicle_devices) {
            let mut mobility = services.mobility.install(info.node, &descriptor)?;
            mobility.set_position(topology_settings.lane_grid.position_of(info.index));
            mobility.set_speed_variation(self.base_config.mobility_settings.speed_variation);
            vehicles.push(Vehicle {
                info: *info,
                device: *device,
                mobility,
            });
        }
        let mut rsus = Vec::with_capacity(topology.rsus.len());
        for (info, device) in topology.rsus.iter().zip(rsu_devices) {
            let position = topology_settings.rsu_position_of(info.index);
            let mobility = services.mobility.install_static(info.node, position)?;
            rsus.push(RoadsideUnit {
                info: *info,
                device: *device,
                mobility,
            });
        }

        let mut agents = HashMap::new();
        info!("Installing control clients...");
        self.install_control(&mut services.control, &plan, &vehicles, &mut agents)?;
        info!("Installing video sessions...");
        self.install_video(&mut services.video, &plan, &vehicles, &rsus, &mut agents, &mut results)?;

        Self::add_nodes(&vehicles, &rsus, &mut results);
        info!("Scenario ready with {} applications", agents.len());

        let bucket = V2XBucket::builder().results(results).build();
        let scheduler = EventScheduler::builder()
            .bucket(bucket)
            .duration(plan.horizon)
            .inactive_agents(agents)
            .build();

        Ok(Scenario {
            plan,
            channel,
            vehicles,
            rsus,
            scheduler,
        })
    }

    fn build_channel(&self, topology: &Topology) -> Result<SharedChannel, AddressError> {
        let medium = &self.base_config.medium_settings;
        let pool = AddressPool::new(medium.network, medium.netmask)?;
        if (pool.capacity() as usize) < topology.node_count() {
            return Err(AddressError::Exhausted {
                network: medium.network,
                mask: medium.netmask,
            });
        }
        debug!(
            "Radio mode {} for data, control and broadcast",
            medium.radio.non_unicast_mode()
        );
        Ok(SharedChannel::new(medium.radio.clone(), pool))
    }

    fn install_control<H, C>(
        &self,
        control: &mut C,
        plan: &AllocationPlan,
        vehicles: &[Vehicle<H>],
        agents: &mut HashMap<AgentId, AppAgent>,
    ) -> Result<(), ScenarioError>
    where
        H: MobilityHandle,
        C: ControlService<H>,
        C::Endpoint: 'static,
    {
        let settings = &self.base_config.control_settings;
        for (vehicle, vehicle_plan) in vehicles.iter().zip(plan.vehicles.iter()) {
            let setup = ControlSetup::builder()
                .node(vehicle.info.node)
                .broadcast(broadcast_on(settings.port))
                .local(any_on(settings.port))
                .mobility(vehicle.mobility.clone())
                .tdma_offset(vehicle_plan.tdma_offset)
                .fleet_size(plan.fleet_size())
                .slot_width(plan.slot_width)
                .cluster_time_metric(settings.cluster_time_metric)
                .incident_window(settings.incident_window)
                .build();
            let endpoint = control.install(setup)?;
            Self::add_app(
                agents,
                AppKind::Control,
                vehicle.info.node,
                plan.control_window,
                Box::new(endpoint),
            );
        }
        Ok(())
    }

    /// Every video server runs on the first roadside unit, one per vehicle, each on the port
    /// the plan gave that vehicle.
    fn install_video<H, V>(
        &self,
        video: &mut V,
        plan: &AllocationPlan,
        vehicles: &[Vehicle<H>],
        rsus: &[RoadsideUnit<H>],
        agents: &mut HashMap<AgentId, AppAgent>,
        results: &mut Results,
    ) -> Result<(), ScenarioError>
    where
        V: VideoService,
        V::Server: 'static,
        V::Client: 'static,
    {
        let server_rsu = rsus.first().ok_or(ConfigError::NoRoadsideUnit)?;
        let settings = &self.base_config.video_settings;
        for (vehicle, vehicle_plan) in vehicles.iter().zip(plan.vehicles.iter()) {
            let server_setup = VideoServerSetup::builder()
                .node(server_rsu.info.node)
                .vehicle(vehicle_plan.vehicle)
                .bind_port(vehicle_plan.video_port)
                .trace_file(settings.trace_file.clone())
                .sender_dump(vehicle_plan.sender_dump.clone())
                .packet_payload(settings.packet_payload)
                .build();
            let server = video.install_server(server_setup)?;
            Self::add_app(
                agents,
                AppKind::VideoServer,
                server_rsu.info.node,
                vehicle_plan.server_window,
                Box::new(server),
            );

            let client_setup = VideoClientSetup::builder()
                .node(vehicle.info.node)
                .server(SocketAddrV4::new(
                    server_rsu.device.address,
                    vehicle_plan.video_port,
                ))
                .receiver_dump(vehicle_plan.receiver_dump.clone())
                .build();
            let client = video.install_client(client_setup)?;
            Self::add_app(
                agents,
                AppKind::VideoClient,
                vehicle.info.node,
                vehicle_plan.client_window,
                Box::new(client),
            );

            results.add_session(SessionRow {
                vehicle: vehicle_plan.vehicle,
                node_id: vehicle.info.node.as_u64(),
                address: vehicle.device.address.to_string(),
                tdma_offset: vehicle_plan.tdma_offset.as_secs(),
                video_port: vehicle_plan.video_port,
                server_start: vehicle_plan.server_window.start.as_secs(),
                server_stop: vehicle_plan.server_window.stop.as_secs(),
                client_start: vehicle_plan.client_window.start.as_secs(),
                client_stop: vehicle_plan.client_window.stop.as_secs(),
                sender_dump: vehicle_plan.sender_dump.clone(),
                receiver_dump: vehicle_plan.receiver_dump.clone(),
            });
        }
        Ok(())
    }

    fn add_app(
        agents: &mut HashMap<AgentId, AppAgent>,
        kind: AppKind,
        node: AgentId,
        window: LifecycleWindow,
        endpoint: Box<dyn Application>,
    ) {
        let id = AgentId::from(agents.len() as u64);
        debug!(
            "Adding {} {} on node {} for {}..{}",
            kind, id, node, window.start, window.stop
        );
        let app = AppAgent::builder()
            .id(id)
            .node(node)
            .kind(kind)
            .window(window)
            .endpoint(endpoint)
            .build();
        agents.insert(id, app);
    }

    fn add_nodes<H: MobilityHandle>(
        vehicles: &[Vehicle<H>],
        rsus: &[RoadsideUnit<H>],
        results: &mut Results,
    ) {
        for vehicle in vehicles.iter() {
            results.add_node(Self::node_row(
                vehicle.device,
                &vehicle.mobility,
                AgentKind::Vehicle.to_string(),
                (255, 0, 0),
            ));
        }
        for rsu in rsus.iter() {
            results.add_node(Self::node_row(
                rsu.device,
                &rsu.mobility,
                "RSU".to_string(),
                (0, 255, 0),
            ));
        }
    }

    fn node_row<H: MobilityHandle>(
        device: NetDevice,
        mobility: &H,
        description: String,
        colour: (u8, u8, u8),
    ) -> NodeRow {
        let position = mobility.position();
        NodeRow {
            node_id: device.node.as_u64(),
            kind: device.kind.to_string(),
            address: device.address.to_string(),
            x: position.x,
            y: position.y,
            z: position.z,
            description,
            red: colour.0,
            green: colour.1,
            blue: colour.2,
        }
    }
}

use std::net::Ipv4Addr;
use std::path::PathBuf;

use serde::Deserialize;

use convoy_models::dist::DistParams;
use convoy_models::error::ConfigError;
use convoy_models::medium::RadioSettings;
use convoy_models::mobility::{LaneGrid, MobilityDescriptor, MotionMode, Point3D, Rectangle};
use convoy_models::plan::{secs, PlanSettings};
use convoy_output::logger::LogSettings;
use convoy_output::result::OutputSettings;

use crate::simulation::error::ScenarioError;

/// The whole scenario. Every section falls back to the stock scenario, so an empty file (or no
/// file at all) describes ten vehicles and one roadside unit over 40 seconds.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BaseConfig {
    pub simulation_settings: SimSettings,
    pub topology_settings: TopologySettings,
    pub mobility_settings: MobilitySettings,
    pub medium_settings: MediumSettings,
    pub control_settings: ControlSettings,
    pub video_settings: VideoSettings,
    pub log_settings: LogSettings,
    pub output_settings: OutputSettings,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimSettings {
    pub scenario: String,
    pub sim_time: f64,
    pub seed: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            scenario: "v2x-clustering".to_string(),
            sim_time: 40.0,
            seed: 0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TopologySettings {
    pub vehicle_count: usize,
    pub rsu_count: usize,
    pub lane_grid: LaneGrid,
    pub rsu_position: Point3D,
    pub rsu_spacing: f64,
}

impl Default for TopologySettings {
    fn default() -> Self {
        Self {
            vehicle_count: 10,
            rsu_count: 1,
            lane_grid: LaneGrid::default(),
            rsu_position: Point3D::new(300.0, 15.0, 0.0),
            rsu_spacing: 150.0,
        }
    }
}

impl TopologySettings {
    /// Roadside units are lined up along the road, `rsu_spacing` metres apart.
    pub fn rsu_position_of(&self, rsu: usize) -> Point3D {
        Point3D::new(
            self.rsu_position.x + rsu as f64 * self.rsu_spacing,
            self.rsu_position.y,
            self.rsu_position.z,
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MobilitySettings {
    pub mode: MotionMode,
    pub duration: f64,
    pub speed: DistParams,
    pub bounds: Rectangle,
    pub speed_variation: f64,
}

impl Default for MobilitySettings {
    fn default() -> Self {
        Self {
            mode: MotionMode::Time,
            duration: 40.0,
            speed: DistParams::constant(30.0),
            bounds: Rectangle::default(),
            speed_variation: 5.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MediumSettings {
    pub radio: RadioSettings,
    pub network: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl Default for MediumSettings {
    fn default() -> Self {
        Self {
            radio: RadioSettings::default(),
            network: Ipv4Addr::new(10, 1, 1, 0),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ControlSettings {
    pub port: u16,
    pub slot_width: f64,
    pub cluster_time_metric: f64,
    pub incident_window: f64,
    pub guard: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            port: 3999,
            slot_width: 0.001,
            cluster_time_metric: 3.0,
            incident_window: 30.0,
            guard: 0.1,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VideoSettings {
    pub base_port: u16,
    pub port_stride: u16,
    pub warmup: f64,
    pub session_offset: f64,
    pub trace_file: String,
    pub sender_dump_prefix: String,
    pub receiver_dump_prefix: String,
    pub packet_payload: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            base_port: 2000,
            port_stride: 2000,
            warmup: 7.0,
            session_offset: 1.0,
            trace_file: "video/st_a03".to_string(),
            sender_dump_prefix: "resultados/agrup_sd_a01_".to_string(),
            receiver_dump_prefix: "resultados/agrup_rd_a01_".to_string(),
            packet_payload: 1014,
        }
    }
}

impl BaseConfig {
    /// Applies the values given on the command line on top of the file.
    pub fn apply_overrides(&mut self, vehicle_count: Option<usize>, sim_time: Option<f64>) {
        if let Some(count) = vehicle_count {
            self.topology_settings.vehicle_count = count;
        }
        if let Some(seconds) = sim_time {
            self.simulation_settings.sim_time = seconds;
        }
    }

    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings::builder()
            .slot_width(self.control_settings.slot_width)
            .base_port(self.video_settings.base_port)
            .port_stride(self.video_settings.port_stride)
            .horizon(self.simulation_settings.sim_time)
            .control_guard(self.control_settings.guard)
            .video_warmup(self.video_settings.warmup)
            .session_offset(self.video_settings.session_offset)
            .sender_dump_prefix(self.video_settings.sender_dump_prefix.as_str())
            .receiver_dump_prefix(self.video_settings.receiver_dump_prefix.as_str())
            .build()
    }

    pub fn mobility_descriptor(&self) -> Result<MobilityDescriptor, ConfigError> {
        let settings = &self.mobility_settings;
        settings.bounds.validate()?;
        Ok(MobilityDescriptor::builder()
            .mode(settings.mode)
            .duration(secs("mobility_duration", settings.duration)?)
            .speed(settings.speed.clone())
            .bounds(settings.bounds)
            .build())
    }
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub fn parse(&self) -> Result<BaseConfig, ScenarioError> {
        let parsing_result =
            std::fs::read_to_string(&self.file_path).map_err(|source| ScenarioError::ConfigRead {
                path: self.file_path.clone(),
                source,
            })?;
        toml::from_str(&parsing_result).map_err(|source| ScenarioError::ConfigParse {
            path: self.file_path.clone(),
            source,
        })
    }
}

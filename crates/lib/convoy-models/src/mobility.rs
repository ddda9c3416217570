use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use convoy_core::bucket::TimeUS;

use crate::dist::DistParams;
use crate::error::ConfigError;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Display for Point3D {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The area a vehicle is allowed to move in.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Rectangle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 10000.0,
            y_min: -1000.0,
            y_max: 1000.0,
        }
    }
}

impl Rectangle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x_min <= self.x_max && self.y_min <= self.y_max {
            return Ok(());
        }
        Err(ConfigError::InvalidBounds)
    }

    pub fn clamp(&self, point: Point3D) -> Point3D {
        Point3D {
            x: point.x.clamp(self.x_min, self.x_max),
            y: point.y.clamp(self.y_min, self.y_max),
            z: point.z,
        }
    }
}

/// What bounds the motion of a vehicle. In `Time` mode a vehicle keeps moving until the
/// configured duration has elapsed.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionMode {
    #[default]
    Time,
}

impl Display for MotionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionMode::Time => write!(f, "Time"),
        }
    }
}

/// What the mobility service is asked to install on every vehicle.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct MobilityDescriptor {
    pub mode: MotionMode,
    pub duration: TimeUS,
    pub speed: DistParams,
    pub bounds: Rectangle,
}

/// Seeds the initial vehicle positions as a grid of parallel lanes. Vehicle `i` sits
/// `i * spacing` metres down the road, in lane `i % lanes`.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct LaneGrid {
    pub lanes: u32,
    pub spacing: f64,
    pub lane_gap: f64,
}

impl Default for LaneGrid {
    fn default() -> Self {
        Self {
            lanes: 3,
            spacing: 5.0,
            lane_gap: 3.0,
        }
    }
}

impl LaneGrid {
    pub fn lane_of(&self, vehicle: usize) -> u32 {
        (vehicle % self.lanes.max(1) as usize) as u32
    }

    pub fn position_of(&self, vehicle: usize) -> Point3D {
        Point3D {
            x: vehicle as f64 * self.spacing,
            y: f64::from(self.lane_of(vehicle)) * self.lane_gap,
            z: 0.0,
        }
    }
}

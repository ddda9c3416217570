use std::fmt;
use std::net::Ipv4Addr;

use thiserror::Error;

use convoy_core::bucket::TimeUS;

/// Settings that cannot produce a valid scenario. All of them are detected before any
/// assignment is handed out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number of seconds, got {value}")]
    InvalidTime { name: &'static str, value: f64 },

    #[error("{name} of {value} seconds is not a whole number of microseconds")]
    TimePrecision { name: &'static str, value: f64 },

    #[error("TDMA slot width must be positive")]
    NonPositiveSlotWidth,

    #[error("TDMA offset of vehicle {index} does not fit in simulated time")]
    OffsetOverflow { index: usize },

    #[error("video port stride must be at least 1, otherwise every session binds port {base}")]
    ZeroPortStride { base: u16 },

    #[error("video port of vehicle {index} would be {port}, beyond the last UDP port")]
    PortOutOfRange { index: usize, port: u64 },

    #[error("simulation horizon must be positive")]
    NonPositiveHorizon,

    #[error("control guard interval must be positive")]
    NonPositiveGuard,

    #[error("control guard {guard} leaves no control window in a horizon of {horizon}")]
    GuardTooWide { guard: TimeUS, horizon: TimeUS },

    #[error("video warm-up {warmup} is not before the horizon {horizon}")]
    WarmupBeyondHorizon { warmup: TimeUS, horizon: TimeUS },

    #[error("video clients would start at {start}, not before the horizon {horizon}")]
    ClientBeyondHorizon { start: TimeUS, horizon: TimeUS },

    #[error("at least one roadside unit is needed to serve video")]
    NoRoadsideUnit,

    #[error("mobility bounds have a minimum above their maximum")]
    InvalidBounds,
}

/// What two vehicles were found to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    TdmaOffset,
    VideoPort,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::TdmaOffset => write!(f, "TDMA offset"),
            CollisionKind::VideoPort => write!(f, "video port"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("vehicles {first} and {second} share {kind} {value}")]
    Collision {
        kind: CollisionKind,
        value: u64,
        first: usize,
        second: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("netmask {0} is not a contiguous prefix")]
    InvalidMask(Ipv4Addr),

    #[error("network {network} has host bits set for netmask {mask}")]
    InvalidNetwork { network: Ipv4Addr, mask: Ipv4Addr },

    #[error("address block {network}/{mask} is exhausted")]
    Exhausted { network: Ipv4Addr, mask: Ipv4Addr },
}

/// Failure reported by one of the external services while it installs something.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} service refused node {node}: {reason}")]
pub struct ServiceError {
    pub service: &'static str,
    pub node: u64,
    pub reason: String,
}

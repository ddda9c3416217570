use serde::Serialize;

use crate::error::ConfigError;

/// The UDP port on which the roadside unit serves video to one vehicle. The vehicle's client
/// dials the very same port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortAssignment {
    pub vehicle: usize,
    pub port: u16,
}

/// Hands out one video port per vehicle as `stride * index + base`.
///
/// Base and stride are independent settings. The stock scenario uses 2000 for both, which is
/// why vehicle 0 lands on 2000 and vehicle 3 on 8000; nothing relies on the two being equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortAllocator {
    base: u16,
    stride: u16,
}

impl PortAllocator {
    pub fn new(base: u16, stride: u16) -> Result<Self, ConfigError> {
        if stride == 0 {
            return Err(ConfigError::ZeroPortStride { base });
        }
        Ok(Self { base, stride })
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    pub fn stride(&self) -> u16 {
        self.stride
    }

    pub fn port_of(&self, vehicle: usize) -> Result<u16, ConfigError> {
        let port = (vehicle as u64)
            .saturating_mul(u64::from(self.stride))
            .saturating_add(u64::from(self.base));
        u16::try_from(port).map_err(|_| ConfigError::PortOutOfRange {
            index: vehicle,
            port,
        })
    }

    pub fn allocate(&self, vehicle_count: usize) -> Result<Vec<PortAssignment>, ConfigError> {
        if vehicle_count == 0 {
            return Ok(Vec::new());
        }
        // The highest index has the highest port; checking it first keeps a failure atomic.
        self.port_of(vehicle_count - 1)?;
        (0..vehicle_count)
            .map(|vehicle| {
                Ok(PortAssignment {
                    vehicle,
                    port: self.port_of(vehicle)?,
                })
            })
            .collect()
    }
}

use serde::Serialize;

use convoy_core::bucket::TimeUS;

use crate::error::ConfigError;

/// The instant at which a vehicle starts its control-channel synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TdmaAssignment {
    pub vehicle: usize,
    pub offset: TimeUS,
}

/// Staggers control-channel broadcasts. Vehicle `i` gets the offset `(i + 1) * slot_width`, so
/// the first vehicle never transmits at time zero and neighbouring vehicles are exactly one
/// slot apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TdmaAllocator {
    slot_width: TimeUS,
}

impl TdmaAllocator {
    pub fn new(slot_width: TimeUS) -> Result<Self, ConfigError> {
        if slot_width.is_zero() {
            return Err(ConfigError::NonPositiveSlotWidth);
        }
        Ok(Self { slot_width })
    }

    pub fn slot_width(&self) -> TimeUS {
        self.slot_width
    }

    pub fn offset_of(&self, vehicle: usize) -> Result<TimeUS, ConfigError> {
        (vehicle as u64)
            .checked_add(1)
            .and_then(|slot| self.slot_width.checked_mul(slot))
            .ok_or(ConfigError::OffsetOverflow { index: vehicle })
    }

    pub fn allocate(&self, vehicle_count: usize) -> Result<Vec<TdmaAssignment>, ConfigError> {
        if vehicle_count == 0 {
            return Ok(Vec::new());
        }
        // Offsets grow with the index, so the last one is the only one that can overflow.
        self.offset_of(vehicle_count - 1)?;
        (0..vehicle_count)
            .map(|vehicle| {
                Ok(TdmaAssignment {
                    vehicle,
                    offset: self.offset_of(vehicle)?,
                })
            })
            .collect()
    }
}

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const MICROS_PER_SEC: f64 = 1_000_000.0;
/// Largest error the seconds-to-microseconds multiplication introduces for a whole input.
const CONVERSION_TOLERANCE: f64 = 1e-6;

/// Simulated time in microseconds. Integer time keeps offsets and windows exact, so two
/// instants are either equal or ordered without any rounding tolerance.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeUS(pub u64);

impl Display for TimeUS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.as_secs())
    }
}

impl FromStr for TimeUS {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let micros = s.parse::<u64>()?;
        Ok(Self(micros))
    }
}

impl From<u64> for TimeUS {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl TimeUS {
    pub const ZERO: TimeUS = TimeUS(0);
    pub const MAX: TimeUS = TimeUS(u64::MAX);

    /// Converts seconds to simulated time. Only whole numbers of microseconds have an exact
    /// representation: fractions of a microsecond, negative, NaN and infinite values give `None`.
    pub fn from_secs(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let micros = secs * MICROS_PER_SEC;
        let whole = micros.round();
        if whole > u64::MAX as f64 {
            return None;
        }
        if (micros - whole).abs() > CONVERSION_TOLERANCE.max(whole * 1e-12) {
            return None;
        }
        Some(Self(whole as u64))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_mul(self, factor: u64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }
}

impl Add for TimeUS {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeUS {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// A trait passed to the agents so that they can reach the models shared by the whole
/// simulation. Anything common to all agents irrespective of type lives in a struct that
/// implements this trait.
pub trait Bucket: Send {
    fn initialize(&mut self, step: TimeUS);
    fn before_agents(&mut self, step: TimeUS);
    fn after_agents(&mut self, step: TimeUS);
    fn terminate(self, step: TimeUS);
}

#[cfg(test)]
mod tests {
    use super::TimeUS;

    #[test]
    fn whole_microseconds_convert_exactly() {
        assert_eq!(TimeUS::from_secs(0.001), Some(TimeUS(1_000)));
        assert_eq!(TimeUS::from_secs(40.0), Some(TimeUS(40_000_000)));
        assert_eq!(TimeUS::from_secs(0.1), Some(TimeUS(100_000)));
        assert_eq!(TimeUS::from_secs(0.000123), Some(TimeUS(123)));
        assert_eq!(TimeUS::from_secs(3e-6), Some(TimeUS(3)));
        assert_eq!(TimeUS(4_000).as_secs(), 0.004);
    }

    #[test]
    fn fractions_of_a_microsecond_are_rejected() {
        assert_eq!(TimeUS::from_secs(4e-7), None);
        assert_eq!(TimeUS::from_secs(1.5e-6), None);
        assert_eq!(TimeUS::from_secs(0.0010005), None);
    }

    #[test]
    fn negative_and_nan_seconds_are_rejected() {
        assert_eq!(TimeUS::from_secs(-0.5), None);
        assert_eq!(TimeUS::from_secs(f64::NAN), None);
        assert_eq!(TimeUS::from_secs(f64::INFINITY), None);
    }
}
